//! Logging setup
//!
//! Modules log through the `log` macros directly; this only installs the
//! `env_logger` backend.

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Panics if a logger is already installed.
pub fn init() {
    env_logger::init();
}

/// Initialize logging for unit tests
///
/// Safe to call from every test; only the first call installs the logger.
pub fn try_init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
