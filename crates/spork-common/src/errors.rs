use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("native allocation failed: {0}")]
    Allocation(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid UTF-16 in native string: {0}")]
    InvalidUtf16(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Reasons a single inbound notification is dropped by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] NativeError),

    #[error("unresolved target: {0}")]
    Unresolved(String),
}

/// Why a bridge failed to start.
#[derive(Debug, thiserror::Error)]
pub enum SporkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
