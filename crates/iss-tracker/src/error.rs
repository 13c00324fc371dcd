//! Error types for the tracker binary.

/// Top-level error for the tracker binary.
///
/// Each variant wraps a specific startup or serving failure, giving
/// `main` a single error type to propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Preloading the source documents failed.
    #[error("preload failed: {source}")]
    Preload {
        /// The underlying load error.
        #[from]
        source: iss_data::LoadError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: iss_api::ServerError,
    },
}
