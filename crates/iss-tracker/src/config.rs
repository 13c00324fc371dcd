//! Configuration loading and typed config structures for the ISS tracker.
//!
//! Configuration lives in `iss-config.yaml` (path overridable with
//! `ISS_CONFIG`). Every field has a default, so a missing file or a
//! partial file is fine.

use std::path::{Path, PathBuf};

use iss_api::ServerConfig;
use iss_data::DataSources;
use iss_data::loader::{DEFAULT_POSITIONAL_PATH, DEFAULT_SIGHTING_PATH};
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "iss-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override has an unusable value.
    #[error("invalid {var}: {message}")]
    Env {
        /// The environment variable name.
        var: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Source document settings.
    #[serde(default)]
    pub data: DataSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl TrackerConfig {
    /// Load configuration from a YAML file, or defaults if it does not
    /// exist, then apply environment overrides.
    ///
    /// Environment variables override YAML values:
    /// - `ISS_HOST` overrides `server.host`
    /// - `ISS_PORT` overrides `server.port`
    /// - `ISS_POSITIONAL_PATH` overrides `data.positional_path`
    /// - `ISS_SIGHTING_PATH` overrides `data.sighting_path`
    /// - `ISS_PRELOAD` overrides `data.preload`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::parse(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ISS_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ISS_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Env {
                var: "ISS_PORT",
                message: format!("{val:?}: {e}"),
            })?;
        }
        if let Some(val) = lookup("ISS_POSITIONAL_PATH") {
            self.data.positional_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("ISS_SIGHTING_PATH") {
            self.data.sighting_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("ISS_PRELOAD") {
            self.data.preload = val.parse().map_err(|e| ConfigError::Env {
                var: "ISS_PRELOAD",
                message: format!("{val:?}: {e}"),
            })?;
        }
        Ok(())
    }

    /// The HTTP server settings in the form the API crate expects.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }

    /// The source document locations.
    pub fn data_sources(&self) -> DataSources {
        DataSources {
            positional: self.data.positional_path.clone(),
            sighting: self.data.sighting_path.clone(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Source document configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSection {
    /// Positional (OEM ephemeris) document, `.xml` or `.json`.
    #[serde(default = "default_positional_path")]
    pub positional_path: PathBuf,

    /// Sighting document, `.xml` or `.json`.
    #[serde(default = "default_sighting_path")]
    pub sighting_path: PathBuf,

    /// Load both documents before accepting requests.
    #[serde(default)]
    pub preload: bool,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            positional_path: default_positional_path(),
            sighting_path: default_sighting_path(),
            preload: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_positional_path() -> PathBuf {
    PathBuf::from(DEFAULT_POSITIONAL_PATH)
}

fn default_sighting_path() -> PathBuf {
    PathBuf::from(DEFAULT_SIGHTING_PATH)
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn empty_yaml_is_all_defaults() {
        let config = TrackerConfig::parse("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.data.preload);
        assert_eq!(config.data_sources(), DataSources::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "
server:
  port: 8080
data:
  sighting_path: data/sightings.json
  preload: true
";
        let config = TrackerConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.sighting_path, PathBuf::from("data/sightings.json"));
        assert_eq!(config.data.positional_path, PathBuf::from("ISS.OEM_J2K_EPH.xml"));
        assert!(config.data.preload);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let err = TrackerConfig::parse("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn env_overrides_win_over_yaml() {
        let env: BTreeMap<&str, &str> = [
            ("ISS_HOST", "127.0.0.1"),
            ("ISS_PORT", "9000"),
            ("ISS_POSITIONAL_PATH", "/srv/oem.xml"),
            ("ISS_PRELOAD", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = TrackerConfig::parse("server:\n  port: 8080\n").unwrap();
        config
            .apply_overrides(|var| env.get(var).map(|v| (*v).to_owned()))
            .unwrap();

        let server = config.server_config();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 9000);
        assert_eq!(config.data_sources().positional, PathBuf::from("/srv/oem.xml"));
        assert!(config.data.preload);
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let mut config = TrackerConfig::default();
        let err = config
            .apply_overrides(|var| (var == "ISS_PORT").then(|| String::from("http")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "ISS_PORT", .. }));
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TrackerConfig::load(&dir.path().join("absent.yaml")).unwrap();
        // Neutralize whatever the test environment sets.
        config.apply_overrides(|_| None).unwrap();
        assert_eq!(config.server.port, default_port());
    }
}
