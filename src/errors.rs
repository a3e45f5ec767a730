use thiserror::Error;

/// Errors that can occur while loading, configuring, or driving the converter.
///
/// The resolution pass itself never fails; dangling references and shape
/// mismatches are degraded outcomes, not errors.
#[derive(Error, Debug)]
pub enum DocLinkError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("model error: {message}")]
    Model { message: String },

    #[error("plugin error: {message} (plugin: {name})")]
    Plugin { name: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `DocLinkError`.
pub type Result<T> = std::result::Result<T, DocLinkError>;
