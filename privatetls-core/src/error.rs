use thiserror::Error;

/// Failure of one stage of credential synthesis.
///
/// Every stage fails fast. Nothing is retried and no partial credential is
/// ever returned.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Serial number generation failed: {0}")]
    SerialNumberGeneration(String),

    #[error("Certificate creation failed: {0}")]
    CertificateCreation(String),

    #[error("Credential assembly failed: {0}")]
    CredentialAssembly(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, CredentialError>;
