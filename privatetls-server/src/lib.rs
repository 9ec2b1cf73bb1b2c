//! HTTPS listener bootstrapped with a freshly generated self-signed credential.

pub mod api;
pub mod config;
pub mod error;
pub mod listener;
pub mod state;

pub use listener::{
    generate_credential, resolve_address, serve_with_credential, start_secure_listener,
    start_secure_listener_with,
};
