//! Platform seams for entropy and time, so synthesis can be driven by test doubles.

pub mod random;
pub mod clock;
