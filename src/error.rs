use thiserror::Error;
use xss::{StyleId, XssError};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Style resolution failed: {0}")]
    Resolve(#[from] XssError),

    #[error("No style named `{0}` has been registered")]
    UnknownStyle(String),

    #[error("No style is registered under identity {0}")]
    UnknownIdentity(StyleId),

    #[error("A logger was already installed")]
    LoggerAlreadySet,
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, HostError>;
