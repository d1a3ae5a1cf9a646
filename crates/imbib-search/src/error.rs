//! Error types
//!
//! The search pipeline itself is infallible. Errors only come from the
//! surfaces around it: configuration, snapshot parsing, and field-name lookup.

/// Errors raised while loading configuration or record snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown field name: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
