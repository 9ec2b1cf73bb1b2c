use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::pkcs8::{EncodePrivateKey, LineEnding, SecretDocument};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::config::is_supported_key_size;
use crate::constants::{KEYGEN_SEED_LEN, MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS, RSA_KEY_BITS_STEP};
use crate::error::{CredentialError, Result};
use crate::traits::random::SecureRandom;

/// A freshly generated RSA key pair. Exists only in memory.
pub struct KeyPair {
    private_key: RsaPrivateKey,
}

impl KeyPair {
    pub fn bits(&self) -> usize {
        self.private_key.size() * 8
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Big-endian modulus without leading zero bytes.
    pub fn modulus(&self) -> Vec<u8> {
        self.private_key.n().to_bytes_be()
    }

    pub(crate) fn to_pkcs8_der(&self) -> Result<SecretDocument> {
        self.private_key
            .to_pkcs8_der()
            .map_err(|e| CredentialError::CertificateCreation(format!("PKCS#8 encoding failed: {e}")))
    }

    pub(crate) fn to_pkcs8_pem(&self) -> Result<Zeroizing<String>> {
        self.private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CredentialError::CertificateCreation(format!("PEM encoding failed: {e}")))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair").field("bits", &self.bits()).finish_non_exhaustive()
    }
}

/// Generate an RSA key pair of `bits`.
///
/// A seed is drawn from `rng` and expanded by a ChaCha-based CSPRNG for the
/// prime search, so an exhausted entropy source fails here instead of
/// partway through generation.
pub fn generate_key_pair(rng: &dyn SecureRandom, bits: usize) -> Result<KeyPair> {
    if !is_supported_key_size(bits) {
        return Err(CredentialError::KeyGeneration(format!(
            "unsupported RSA key size {bits}: expected a multiple of {RSA_KEY_BITS_STEP} \
             between {MIN_RSA_KEY_BITS} and {MAX_RSA_KEY_BITS} bits"
        )));
    }

    let mut seed = Zeroizing::new([0u8; KEYGEN_SEED_LEN]);
    rng.fill_bytes(&mut seed[..])
        .map_err(|e| CredentialError::KeyGeneration(format!("entropy source failed: {e}")))?;

    let mut csprng = StdRng::from_seed(*seed);
    let private_key = RsaPrivateKey::new(&mut csprng, bits)
        .map_err(|e| CredentialError::KeyGeneration(format!("RSA-{bits} generation failed: {e}")))?;

    Ok(KeyPair { private_key })
}
