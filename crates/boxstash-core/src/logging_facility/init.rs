//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Map a configured log format ("text" / "json") onto a profile
    pub fn from_format(format: &str) -> Self {
        if format.eq_ignore_ascii_case("json") {
            Profile::Production
        } else {
            Profile::Development
        }
    }

    fn default_level(self) -> &'static str {
        match self {
            Profile::Development => "debug",
            Profile::Production | Profile::Test => "info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default level
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
pub fn init(profile: Profile) {
    init_with_level(profile, profile.default_level());
}

/// Initialize the logging facility with an explicit level for `boxstash*` targets
///
/// Output goes to stderr so stdout stays free for command results.
///
/// `RUST_LOG`, when set, takes precedence over `level`. Only the first call
/// in a process has any effect.
///
/// # Example
///
/// ```
/// use boxstash_core::logging_facility::{init_with_level, Profile};
///
/// init_with_level(Profile::Production, "error");
/// ```
pub fn init_with_level(profile: Profile, level: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("boxstash={}", level)));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                // Test capture is initialized separately via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}
