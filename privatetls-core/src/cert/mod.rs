//! Certificate synthesis: key generation, template construction, self-signing
//! and assembly into a rustls credential.

pub mod keygen;
pub mod template;
pub mod signer;
pub mod credential;
pub mod factory;
pub mod pinning;
