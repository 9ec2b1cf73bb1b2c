//! Client-side trust for a single self-signed certificate.
//!
//! WebPKI path building refuses a CA certificate presented as the end entity,
//! so clients of a generated credential pin the exact certificate instead.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, ClientConfig, DigitallySignedStruct, SignatureScheme};

use super::credential::certificate_fingerprint;
use crate::error::{CredentialError, Result};

/// Accepts exactly one server certificate, compared byte for byte.
///
/// Handshake signatures are still verified against that certificate's key.
#[derive(Debug)]
pub struct PinnedCertVerifier {
    pinned: CertificateDer<'static>,
    provider: Arc<CryptoProvider>,
}

impl PinnedCertVerifier {
    pub fn new(pinned: CertificateDer<'static>) -> Self {
        Self {
            pinned,
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        }
    }

    pub fn fingerprint_sha256(&self) -> String {
        certificate_fingerprint(&self.pinned)
    }
}

impl ServerCertVerifier for PinnedCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        if end_entity.as_ref() == self.pinned.as_ref() {
            Ok(ServerCertVerified::assertion())
        } else {
            tracing::warn!(
                expected = %self.fingerprint_sha256(),
                got = %certificate_fingerprint(end_entity),
                "server certificate does not match pin"
            );
            Err(rustls::Error::InvalidCertificate(CertificateError::UnknownIssuer))
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Client configuration that trusts only `pinned`.
pub fn pinned_client_config(pinned: CertificateDer<'static>) -> Result<Arc<ClientConfig>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| CredentialError::CredentialAssembly(format!("protocol versions rejected: {e}")))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(PinnedCertVerifier::new(pinned)))
        .with_no_client_auth();

    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::factory::generate_self_signed_credential;

    #[test]
    fn test_pin_accepts_only_its_certificate() {
        let a = generate_self_signed_credential().unwrap();
        let b = generate_self_signed_credential().unwrap();
        let verifier = PinnedCertVerifier::new(a.certificate_der().clone());
        let name = ServerName::try_from("127.0.0.1").unwrap();

        verifier
            .verify_server_cert(a.certificate_der(), &[], &name, &[], UnixTime::now())
            .unwrap();

        let err = verifier
            .verify_server_cert(b.certificate_der(), &[], &name, &[], UnixTime::now())
            .unwrap_err();
        assert!(matches!(
            err,
            rustls::Error::InvalidCertificate(CertificateError::UnknownIssuer)
        ));
    }

    #[test]
    fn test_pinned_fingerprint_matches_credential() {
        let credential = generate_self_signed_credential().unwrap();
        let verifier = PinnedCertVerifier::new(credential.certificate_der().clone());
        assert_eq!(verifier.fingerprint_sha256(), credential.fingerprint_sha256());
    }
}
