use std::env;

use privatetls_core::config::is_supported_key_size;
use privatetls_core::{CredentialConfig, SubjectAltName};
use time::Duration;

use crate::error::{Result, ServerError};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address. Empty means all interfaces on the HTTPS port.
    pub address: String,
    /// Parameters for the generated certificate.
    pub credential: CredentialConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `PRIVATETLS_ADDR` (optional, default empty = `0.0.0.0:443`): `host:port` or `:port`.
    /// - `PRIVATETLS_KEY_BITS` (optional, default 2048): RSA modulus size.
    /// - `PRIVATETLS_VALIDITY_DAYS` (optional, default 365): certificate lifetime.
    /// - `PRIVATETLS_ORGANIZATION` (optional, default "PrivateTLS"): subject organization.
    /// - `PRIVATETLS_SANS` (optional): comma-separated extra IPs or DNS names.
    ///   127.0.0.1 is always included.
    ///
    /// A variable that is set but does not hold a valid value is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = CredentialConfig::default();

        let address = lookup("PRIVATETLS_ADDR").unwrap_or_default();

        let key_bits = match lookup("PRIVATETLS_KEY_BITS") {
            Some(raw) => parse_key_bits(&raw)?,
            None => defaults.key_bits,
        };

        let validity = match lookup("PRIVATETLS_VALIDITY_DAYS") {
            Some(raw) => parse_validity_days(&raw)?,
            None => defaults.validity,
        };

        let organization = match lookup("PRIVATETLS_ORGANIZATION") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ServerError::Config(
                    "PRIVATETLS_ORGANIZATION must not be blank".to_string(),
                ))
            }
            Some(raw) => raw.trim().to_string(),
            None => defaults.organization.clone(),
        };

        let subject_alt_names = match lookup("PRIVATETLS_SANS") {
            Some(list) => parse_subject_alt_names(&list)?,
            None => defaults.subject_alt_names.clone(),
        };

        Ok(Self {
            address,
            credential: CredentialConfig {
                key_bits,
                validity,
                organization,
                subject_alt_names,
            },
        })
    }
}

fn parse_key_bits(raw: &str) -> Result<usize> {
    let bits = raw.trim().parse::<usize>().map_err(|e| {
        ServerError::Config(format!("PRIVATETLS_KEY_BITS={raw:?} is not a number: {e}"))
    })?;
    if !is_supported_key_size(bits) {
        return Err(ServerError::Config(format!(
            "PRIVATETLS_KEY_BITS={bits} is not a supported RSA key size"
        )));
    }
    Ok(bits)
}

fn parse_validity_days(raw: &str) -> Result<Duration> {
    let days = raw.trim().parse::<i64>().map_err(|e| {
        ServerError::Config(format!("PRIVATETLS_VALIDITY_DAYS={raw:?} is not a number: {e}"))
    })?;
    if days <= 0 {
        return Err(ServerError::Config(format!(
            "PRIVATETLS_VALIDITY_DAYS must be positive, got {days}"
        )));
    }
    Ok(Duration::days(days))
}

fn parse_subject_alt_names(list: &str) -> Result<Vec<SubjectAltName>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<SubjectAltName>().map_err(|e| {
                ServerError::Config(format!("PRIVATETLS_SANS entry {s:?} is invalid: {e}"))
            })
        })
        .collect()
}
