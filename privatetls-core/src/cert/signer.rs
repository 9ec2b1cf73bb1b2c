use rcgen::PKCS_RSA_SHA256;
use rustls::pki_types::{CertificateDer, PrivatePkcs8KeyDer};
use time::OffsetDateTime;
use tracing::debug;
use x509_parser::prelude::{FromDer, X509Certificate};
use x509_parser::public_key::PublicKey;
use zeroize::Zeroizing;

use super::keygen::KeyPair;
use super::template::CertificateTemplate;
use crate::error::{CredentialError, Result};

/// A certificate signed by its own key, already checked and PEM-encoded.
#[derive(Debug, Clone)]
pub struct SignedCertificate {
    pub der: CertificateDer<'static>,
    pub pem: String,
    pub serial_number: Vec<u8>,
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

/// Sign `template` with `key_pair`, making issuer and subject the same entity.
///
/// The output is re-parsed and verified before it is returned. A failed
/// check is reported as `CertificateCreation` and never retried.
pub fn sign_template(template: CertificateTemplate, key_pair: &KeyPair) -> Result<SignedCertificate> {
    let pkcs8 = key_pair.to_pkcs8_der()?;
    let signing_key = rcgen::KeyPair::from_pkcs8_der_and_sign_algo(
        &PrivatePkcs8KeyDer::from(pkcs8.as_bytes()),
        &PKCS_RSA_SHA256,
    )
    .map_err(|e| CredentialError::CertificateCreation(format!("signer rejected key: {e}")))?;

    let serial_number = template.serial_number().to_vec();
    let not_before = template.not_before();
    let not_after = template.not_after();

    let cert = template
        .params
        .self_signed(&signing_key)
        .map_err(|e| CredentialError::CertificateCreation(format!("signer rejected template: {e}")))?;

    verify_self_signed(cert.der(), key_pair)?;
    debug!(der_len = cert.der().len(), "certificate signed and verified");

    Ok(SignedCertificate {
        der: cert.der().clone(),
        pem: cert.pem(),
        serial_number,
        not_before,
        not_after,
    })
}

/// PEM-encode the private key as PKCS#8.
pub fn encode_private_key(key_pair: &KeyPair) -> Result<Zeroizing<String>> {
    key_pair.to_pkcs8_pem()
}

/// Check that `der` is a well-formed certificate issued by and for `key_pair`.
///
/// Requires a clean parse with no trailing bytes, identical issuer and
/// subject, an embedded RSA modulus equal to the pair's, and a signature that
/// verifies against the embedded public key.
pub fn verify_self_signed(der: &[u8], key_pair: &KeyPair) -> Result<()> {
    let (rest, cert) = X509Certificate::from_der(der)
        .map_err(|e| self_check_failed(format!("certificate does not parse: {e}")))?;

    if !rest.is_empty() {
        return Err(self_check_failed(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }

    if cert.issuer().as_raw() != cert.subject().as_raw() {
        return Err(self_check_failed("issuer differs from subject".to_string()));
    }

    let embedded = match cert.public_key().parsed() {
        Ok(PublicKey::RSA(rsa)) => strip_leading_zeros(rsa.modulus).to_vec(),
        Ok(_) => return Err(self_check_failed("embedded key is not RSA".to_string())),
        Err(e) => return Err(self_check_failed(format!("embedded key does not parse: {e}"))),
    };

    if embedded != key_pair.modulus() {
        return Err(self_check_failed(
            "embedded public key does not match the signing key".to_string(),
        ));
    }

    cert.verify_signature(None)
        .map_err(|e| self_check_failed(format!("signature does not verify: {e}")))
}

pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

fn self_check_failed(reason: String) -> CredentialError {
    CredentialError::CertificateCreation(format!("self-check failed: {reason}"))
}
