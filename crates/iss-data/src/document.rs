//! Decoding of source documents into generic nested values.
//!
//! Both datasets ship as XML. An XML document is converted into a
//! [`serde_json::Value`] tree with the usual dictionary-style mapping:
//!
//! - an element holding only text becomes a string
//! - an empty element becomes `null`
//! - attributes become `@name` keys, and text next to attributes or child
//!   elements is kept under `#text`
//! - repeated sibling elements with the same name collapse into a list in
//!   document order
//!
//! JSON documents with the same shape are accepted as well, which keeps
//! fixtures and hand-edited datasets simple.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::{DocumentError, LoadError};

/// Key under which element text is stored when the element also has
/// attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Prefix applied to attribute names.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Read and decode the document at `path`, choosing the format by file
/// extension (`.xml` or `.json`).
pub fn decode_file(path: &Path) -> Result<Value, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let decoded = match extension.as_deref() {
        Some("xml") => decode_xml(&contents),
        Some("json") => decode_json(&contents),
        _ => Err(DocumentError::UnsupportedFormat(extension)),
    };

    decoded.map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a JSON document.
pub fn decode_json(contents: &str) -> Result<Value, DocumentError> {
    Ok(serde_json::from_str(contents)?)
}

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let decoder = reader.decoder();
        let name = decoder
            .decode(start.name().as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();

        let mut children = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decoder
                .decode(attribute.key.as_ref())
                .map_err(quick_xml::Error::from)?;
            let value = attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?;
            children.insert(
                format!("{ATTRIBUTE_PREFIX}{key}"),
                Value::String(value.into_owned()),
            );
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let Self {
            name,
            mut children,
            text,
        } = self;

        let value = if children.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            }
        } else {
            if !text.is_empty() {
                children.insert(TEXT_KEY.to_owned(), Value::String(text));
            }
            Value::Object(children)
        };

        (name, value)
    }
}

/// Insert `value` under `key`, turning repeated keys into a list.
fn attach(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Decode an XML document into a nested value whose single top-level key
/// is the root element name.
pub fn decode_xml(contents: &str) -> Result<Value, DocumentError> {
    let mut reader = Reader::from_str(contents);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&reader, &start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&reader, &start)?.close();
                match stack.last_mut() {
                    Some(parent) => attach(&mut parent.children, name, value),
                    None => attach(&mut root, name, value),
                }
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    let (name, value) = frame.close();
                    match stack.last_mut() {
                        Some(parent) => attach(&mut parent.children, name, value),
                        None => attach(&mut root, name, value),
                    }
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(quick_xml::Error::from)?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    let data = reader
                        .decoder()
                        .decode(&data)
                        .map_err(quick_xml::Error::from)?;
                    frame.text.push_str(&data);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(DocumentError::Unclosed(frame.name));
    }
    if root.is_empty() {
        return Err(DocumentError::Empty);
    }

    Ok(Value::Object(root))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::io::Write as _;

    use serde_json::json;

    use super::*;

    #[test]
    fn text_only_elements_become_strings() {
        let doc = decode_xml("<a><b>hello</b><c> padded </c></a>").unwrap();
        assert_eq!(doc, json!({"a": {"b": "hello", "c": "padded"}}));
    }

    #[test]
    fn repeated_siblings_become_a_list_in_order() {
        let doc = decode_xml("<r><x>1</x><y>a</y><x>2</x><x>3</x></r>").unwrap();
        assert_eq!(doc, json!({"r": {"x": ["1", "2", "3"], "y": "a"}}));
    }

    #[test]
    fn single_child_stays_a_mapping() {
        let doc = decode_xml("<r><item><k>v</k></item></r>").unwrap();
        assert_eq!(doc, json!({"r": {"item": {"k": "v"}}}));
    }

    #[test]
    fn attributes_and_text_are_both_kept() {
        let doc = decode_xml(r#"<r><X units="km">-4945.1</X></r>"#).unwrap();
        assert_eq!(doc, json!({"r": {"X": {"@units": "km", "#text": "-4945.1"}}}));
    }

    #[test]
    fn empty_elements_become_null() {
        let doc = decode_xml("<r><a/><b></b></r>").unwrap();
        assert_eq!(doc, json!({"r": {"a": null, "b": null}}));
    }

    #[test]
    fn declarations_comments_and_cdata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <!-- header -->
            <r><note><![CDATA[a < b]]></note><esc>x &amp; y</esc></r>"#;
        let doc = decode_xml(xml).unwrap();
        assert_eq!(doc, json!({"r": {"note": "a < b", "esc": "x & y"}}));
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        assert!(matches!(
            decode_xml("<a><b></a>"),
            Err(DocumentError::Xml(_))
        ));
    }

    #[test]
    fn unclosed_root_is_rejected() {
        assert!(decode_xml("<a><b>1</b>").is_err());
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            decode_xml("<?xml version=\"1.0\"?>"),
            Err(DocumentError::Empty)
        ));
    }

    #[test]
    fn decode_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let xml_path = dir.path().join("doc.xml");
        std::fs::File::create(&xml_path)
            .unwrap()
            .write_all(b"<a><b>1</b></a>")
            .unwrap();
        assert_eq!(decode_file(&xml_path).unwrap(), json!({"a": {"b": "1"}}));

        let json_path = dir.path().join("doc.JSON");
        std::fs::write(&json_path, r#"{"a": {"b": ["1"]}}"#).unwrap();
        assert_eq!(decode_file(&json_path).unwrap(), json!({"a": {"b": ["1"]}}));
    }

    #[test]
    fn decode_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.csv");
        std::fs::write(&path, "a,b").unwrap();

        let err = decode_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Decode {
                source: DocumentError::UnsupportedFormat(Some(_)),
                ..
            }
        ));
    }

    #[test]
    fn decode_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_file(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
