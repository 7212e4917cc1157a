//! System-level modules
//!
//! - Logging initialization
//! - PID lockfile guarding the data document

pub mod lockfile;
pub mod logging;

pub use lockfile::PidLock;
pub use logging::init_logging;
