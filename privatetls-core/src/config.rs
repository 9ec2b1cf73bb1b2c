use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use time::Duration;

use crate::constants::{
    DEFAULT_ORGANIZATION, MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS, RSA_KEY_BITS, RSA_KEY_BITS_STEP,
    VALIDITY_DAYS,
};
use crate::error::{CredentialError, Result};

/// An identity the certificate is valid for besides its subject name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectAltName {
    Ip(IpAddr),
    Dns(String),
}

impl SubjectAltName {
    /// The IPv4 loopback address, present in every issued certificate.
    pub fn loopback() -> Self {
        SubjectAltName::Ip(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

impl FromStr for SubjectAltName {
    type Err = CredentialError;

    /// Parses an IP address if possible, otherwise treats the input as a DNS name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CredentialError::InvalidConfig(
                "subject alternative name must not be empty".to_string(),
            ));
        }

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(SubjectAltName::Ip(ip));
        }

        let valid_dns = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '*'));
        if !valid_dns {
            return Err(CredentialError::InvalidConfig(format!(
                "{s:?} is neither an IP address nor an ASCII DNS name"
            )));
        }
        Ok(SubjectAltName::Dns(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for SubjectAltName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectAltName::Ip(ip) => write!(f, "{ip}"),
            SubjectAltName::Dns(name) => f.write_str(name),
        }
    }
}

/// Parameters for a generated credential.
///
/// `Default` reproduces the fixed behaviour: 2048-bit RSA, one year of
/// validity, organization "PrivateTLS", loopback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub key_bits: usize,
    pub validity: Duration,
    pub organization: String,
    pub subject_alt_names: Vec<SubjectAltName>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            key_bits: RSA_KEY_BITS,
            validity: Duration::days(VALIDITY_DAYS),
            organization: DEFAULT_ORGANIZATION.to_string(),
            subject_alt_names: vec![SubjectAltName::loopback()],
        }
    }
}

impl CredentialConfig {
    pub fn with_key_bits(mut self, key_bits: usize) -> Self {
        self.key_bits = key_bits;
        self
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Replace the SAN list. Loopback is kept even if `names` omits it.
    pub fn with_subject_alt_names(mut self, names: Vec<SubjectAltName>) -> Self {
        self.subject_alt_names = names;
        self
    }

    /// SANs as they will be written: loopback first, duplicates removed.
    pub fn effective_subject_alt_names(&self) -> Vec<SubjectAltName> {
        let mut names = vec![SubjectAltName::loopback()];
        for name in &self.subject_alt_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Check the options that can be rejected before any entropy is spent.
    ///
    /// Key size is checked by the key generator so that it surfaces as a
    /// key generation failure.
    pub fn validate(&self) -> Result<()> {
        if !self.validity.is_positive() {
            return Err(CredentialError::InvalidConfig(format!(
                "validity must be positive, got {}",
                self.validity
            )));
        }

        if self.organization.trim().is_empty() {
            return Err(CredentialError::InvalidConfig(
                "organization must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Whether `bits` is a key size the generator and signer both accept.
pub fn is_supported_key_size(bits: usize) -> bool {
    (MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&bits) && bits % RSA_KEY_BITS_STEP == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_fixed_parameters() {
        let config = CredentialConfig::default();
        assert_eq!(config.key_bits, 2048);
        assert_eq!(config.validity, Duration::days(365));
        assert_eq!(config.organization, "PrivateTLS");
        assert_eq!(config.subject_alt_names, vec![SubjectAltName::loopback()]);
        config.validate().unwrap();
    }

    #[test]
    fn test_san_parse_ip_and_dns() {
        assert_eq!(
            "10.0.0.7".parse::<SubjectAltName>().unwrap(),
            SubjectAltName::Ip("10.0.0.7".parse().unwrap())
        );
        assert_eq!(
            "::1".parse::<SubjectAltName>().unwrap(),
            SubjectAltName::Ip("::1".parse().unwrap())
        );
        assert_eq!(
            " Dev.Example.Internal ".parse::<SubjectAltName>().unwrap(),
            SubjectAltName::Dns("dev.example.internal".to_string())
        );
        assert!("   ".parse::<SubjectAltName>().is_err());
    }

    #[test]
    fn test_san_parse_rejects_malformed_names() {
        for raw in ["bad name", "bücher.example", "host/path", "a_b.example"] {
            assert!(
                matches!(raw.parse::<SubjectAltName>(), Err(CredentialError::InvalidConfig(_))),
                "{raw:?} should be rejected"
            );
        }
        assert_eq!(
            "*.dev.example".parse::<SubjectAltName>().unwrap(),
            SubjectAltName::Dns("*.dev.example".to_string())
        );
    }

    #[test]
    fn test_effective_sans_always_include_loopback_once() {
        let config = CredentialConfig::default().with_subject_alt_names(vec![
            SubjectAltName::Dns("localhost".to_string()),
            SubjectAltName::loopback(),
            SubjectAltName::Dns("localhost".to_string()),
        ]);
        assert_eq!(
            config.effective_subject_alt_names(),
            vec![
                SubjectAltName::loopback(),
                SubjectAltName::Dns("localhost".to_string()),
            ]
        );

        let empty = CredentialConfig::default().with_subject_alt_names(Vec::new());
        assert_eq!(empty.effective_subject_alt_names(), vec![SubjectAltName::loopback()]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = CredentialConfig::default().with_validity(Duration::ZERO);
        assert!(matches!(zero.validate(), Err(CredentialError::InvalidConfig(_))));

        let negative = CredentialConfig::default().with_validity(Duration::days(-1));
        assert!(matches!(negative.validate(), Err(CredentialError::InvalidConfig(_))));

        let blank = CredentialConfig::default().with_organization("  ");
        assert!(matches!(blank.validate(), Err(CredentialError::InvalidConfig(_))));
    }

    #[test]
    fn test_supported_key_sizes() {
        assert!(is_supported_key_size(2048));
        assert!(is_supported_key_size(3072));
        assert!(is_supported_key_size(8192));
        assert!(!is_supported_key_size(1024));
        assert!(!is_supported_key_size(2049));
        assert!(!is_supported_key_size(16384));
    }
}
