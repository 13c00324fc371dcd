//! Rendering of successful JSON payloads.
//!
//! Payloads are pretty-printed with a one-space indent and end with a
//! newline, which keeps `curl` output readable without a formatter.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::ApiError;

/// Serialize `value` into the wire format.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| ApiError::Internal(format!("non-UTF-8 JSON output: {e}")))
}

/// Build a `200 OK` JSON response from `value`.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Response, ApiError> {
    let body = to_pretty_string(value)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use iss_data::Labeled;

    use super::*;

    #[test]
    fn one_space_indent_and_trailing_newline() {
        let labeled = Labeled::new("Country", vec!["USA".to_owned(), "Canada".to_owned()]);
        assert_eq!(
            to_pretty_string(&labeled).unwrap(),
            "{\n \"Country 1\": \"USA\",\n \"Country 2\": \"Canada\"\n}\n"
        );
    }

    #[test]
    fn empty_mapping() {
        let labeled = Labeled::new("EPOCH", Vec::new());
        assert_eq!(to_pretty_string(&labeled).unwrap(), "{}\n");
    }
}
