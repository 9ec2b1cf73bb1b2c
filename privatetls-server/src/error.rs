use privatetls_core::CredentialError;
use thiserror::Error;

/// Listener-level error. Credential failures pass through unchanged.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(err.to_string())
    }
}

/// Convenience alias for listener results.
pub type Result<T> = std::result::Result<T, ServerError>;
