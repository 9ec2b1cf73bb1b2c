use privatetls_core::TlsCredential;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Public facts about the served certificate, shared with handlers.
///
/// Holds no key material.
#[derive(Debug, Clone)]
pub struct AppState {
    pub certificate_pem: String,
    pub fingerprint_sha256: String,
    pub serial_number: String,
    pub not_before: String,
    pub not_after: String,
}

impl AppState {
    pub fn from_credential(credential: &TlsCredential) -> Self {
        Self {
            certificate_pem: credential.certificate_pem().to_string(),
            fingerprint_sha256: credential.fingerprint_sha256(),
            serial_number: credential.serial_number_hex(),
            not_before: rfc3339(credential.not_before()),
            not_after: rfc3339(credential.not_after()),
        }
    }
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}
