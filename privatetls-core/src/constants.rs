/// Default RSA modulus length in bits.
pub const RSA_KEY_BITS: usize = 2048;

/// Smallest RSA modulus accepted. Never fall back to anything weaker.
pub const MIN_RSA_KEY_BITS: usize = 2048;

/// Largest RSA modulus the signing backend can load.
pub const MAX_RSA_KEY_BITS: usize = 8192;

/// RSA key sizes must be a multiple of this many bits.
pub const RSA_KEY_BITS_STEP: usize = 1024;

/// Width of the random serial number space.
pub const SERIAL_NUMBER_BITS: usize = 128;

/// Serial number length in bytes.
pub const SERIAL_NUMBER_LEN: usize = SERIAL_NUMBER_BITS / 8;

/// Default certificate lifetime.
pub const VALIDITY_DAYS: i64 = 365;

/// Subject organization written into every certificate by default.
pub const DEFAULT_ORGANIZATION: &str = "PrivateTLS";

/// Seed length for the key generation CSPRNG.
pub const KEYGEN_SEED_LEN: usize = 32;

/// Port used when the listener address is left empty.
pub const DEFAULT_HTTPS_PORT: u16 = 443;
