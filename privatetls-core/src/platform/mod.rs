pub mod os_random;
pub mod system_clock;

pub use os_random::OsRandom;
pub use system_clock::SystemClock;
