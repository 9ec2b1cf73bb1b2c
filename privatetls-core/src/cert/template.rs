use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, Ia5String,
    IsCa, KeyUsagePurpose, SanType, SerialNumber,
};
use time::{Duration, OffsetDateTime};

use crate::config::{CredentialConfig, SubjectAltName};
use crate::constants::SERIAL_NUMBER_LEN;
use crate::error::{CredentialError, Result};
use crate::traits::random::SecureRandom;

/// Declarative description of the certificate to be issued.
pub struct CertificateTemplate {
    pub(crate) params: CertificateParams,
    serial_number: [u8; SERIAL_NUMBER_LEN],
    not_before: OffsetDateTime,
    not_after: OffsetDateTime,
    subject_alt_names: Vec<SubjectAltName>,
}

impl CertificateTemplate {
    /// Big-endian serial, exactly 128 bits wide including leading zeros.
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    pub fn not_before(&self) -> OffsetDateTime {
        self.not_before
    }

    pub fn not_after(&self) -> OffsetDateTime {
        self.not_after
    }

    pub fn subject_alt_names(&self) -> &[SubjectAltName] {
        &self.subject_alt_names
    }
}

/// Draw a serial number uniformly from [0, 2^128).
pub fn generate_serial_number(rng: &dyn SecureRandom) -> Result<[u8; SERIAL_NUMBER_LEN]> {
    let mut serial = [0u8; SERIAL_NUMBER_LEN];
    rng.fill_bytes(&mut serial)
        .map_err(|e| CredentialError::SerialNumberGeneration(format!("entropy source failed: {e}")))?;
    Ok(serial)
}

/// Build the template for a certificate issued at `now`.
///
/// The certificate is its own CA, may sign and authenticate in both TLS
/// roles, and is valid for loopback plus any configured names.
pub fn build_template(
    rng: &dyn SecureRandom,
    now: OffsetDateTime,
    config: &CredentialConfig,
) -> Result<CertificateTemplate> {
    let serial_number = generate_serial_number(rng)?;

    // X.509 validity has one-second resolution.
    let not_before = now - Duration::nanoseconds(i64::from(now.nanosecond()));
    let not_after = not_before
        .checked_add(config.validity)
        .ok_or_else(|| {
            CredentialError::CertificateCreation(format!(
                "validity of {} overflows the calendar",
                config.validity
            ))
        })?;

    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::OrganizationName, config.organization.as_str());

    let subject_alt_names = config.effective_subject_alt_names();
    let san_types = subject_alt_names
        .iter()
        .map(to_san_type)
        .collect::<Result<Vec<_>>>()?;

    let mut params = CertificateParams::default();
    params.serial_number = Some(SerialNumber::from_slice(&serial_number));
    params.distinguished_name = distinguished_name;
    params.not_before = not_before;
    params.not_after = not_after;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::DigitalSignature];
    params.extended_key_usages = vec![
        ExtendedKeyUsagePurpose::ServerAuth,
        ExtendedKeyUsagePurpose::ClientAuth,
    ];
    params.subject_alt_names = san_types;

    Ok(CertificateTemplate {
        params,
        serial_number,
        not_before,
        not_after,
        subject_alt_names,
    })
}

fn to_san_type(name: &SubjectAltName) -> Result<SanType> {
    match name {
        SubjectAltName::Ip(ip) => Ok(SanType::IpAddress(*ip)),
        SubjectAltName::Dns(dns) => {
            let ia5: Ia5String = dns.clone().try_into().map_err(|e: rcgen::Error| {
                CredentialError::CertificateCreation(format!("invalid DNS name {dns:?}: {e}"))
            })?;
            Ok(SanType::DnsName(ia5))
        }
    }
}
