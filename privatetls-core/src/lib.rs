//! In-memory generation of self-signed TLS server credentials.
//!
//! Every call produces a fresh RSA key pair and a certificate signed by that
//! same key. Nothing is cached and nothing touches the filesystem, so the
//! result can be handed straight to a rustls server.

pub mod error;
pub mod constants;
pub mod traits;
pub mod platform;
pub mod config;
pub mod cert;

#[cfg(test)]
pub(crate) mod testutil;

pub use cert::credential::TlsCredential;
pub use cert::factory::{generate_self_signed_credential, CredentialFactory};
pub use config::{CredentialConfig, SubjectAltName};
pub use error::{CredentialError, Result};
