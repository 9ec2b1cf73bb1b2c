use std::sync::Arc;

use tracing::{debug, info};

use super::credential::TlsCredential;
use super::{keygen, signer, template};
use crate::config::CredentialConfig;
use crate::error::Result;
use crate::platform::{OsRandom, SystemClock};
use crate::traits::clock::Clock;
use crate::traits::random::SecureRandom;

/// Produces fresh self-signed TLS credentials.
///
/// Holds only immutable configuration and platform handles. Every call to
/// [`generate`](Self::generate) creates a new key pair and certificate;
/// nothing is cached between calls, so concurrent use needs no locking.
#[derive(Clone)]
pub struct CredentialFactory {
    config: CredentialConfig,
    rng: Arc<dyn SecureRandom>,
    clock: Arc<dyn Clock>,
}

impl CredentialFactory {
    /// Factory backed by the OS random source and system clock.
    pub fn new(config: CredentialConfig) -> Self {
        Self::with_platform(config, Arc::new(OsRandom::new()), Arc::new(SystemClock::new()))
    }

    pub fn with_platform(
        config: CredentialConfig,
        rng: Arc<dyn SecureRandom>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { config, rng, clock }
    }

    pub fn config(&self) -> &CredentialConfig {
        &self.config
    }

    /// Generate key, build template, self-sign, and assemble the credential.
    ///
    /// The first failing stage ends the call; no partial credential is
    /// returned and the caller must start over to retry.
    pub fn generate(&self) -> Result<TlsCredential> {
        self.config.validate()?;

        let key_pair = keygen::generate_key_pair(self.rng.as_ref(), self.config.key_bits)?;
        debug!(bits = key_pair.bits(), "key pair generated");

        let now = self.clock.now_utc()?;
        let template = template::build_template(self.rng.as_ref(), now, &self.config)?;
        debug!(
            serial = %hex::encode(template.serial_number()),
            sans = template.subject_alt_names().len(),
            "certificate template built"
        );

        let signed = signer::sign_template(template, &key_pair)?;
        let key_pem = signer::encode_private_key(&key_pair)?;
        let credential = TlsCredential::assemble(signed, key_pem)?;

        info!(
            serial = %credential.serial_number_hex(),
            fingerprint = %credential.fingerprint_sha256(),
            not_after = %credential.not_after(),
            "self-signed credential generated"
        );

        Ok(credential)
    }
}

impl Default for CredentialFactory {
    fn default() -> Self {
        Self::new(CredentialConfig::default())
    }
}

/// Generate a self-signed credential with the default parameters:
/// RSA-2048, SHA-256, one year, valid for 127.0.0.1.
pub fn generate_self_signed_credential() -> Result<TlsCredential> {
    CredentialFactory::default().generate()
}
