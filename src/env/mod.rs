// Typed environment configuration
// Fallback accessors with defaults; parse failures warn and fall back instead of failing

mod duration;

pub use duration::{parse_duration, ParseDurationError};

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Errors surfaced by the required-configuration accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// A required environment variable is unset or empty. Unrecoverable at
    /// startup; the entry point is expected to propagate it and exit.
    #[error("required environment variable {0} is not set")]
    MissingRequired(String),
}

/// Read an integer from the environment, falling back to `default` when the
/// variable is unset, empty, or unparseable.
pub fn int(key: &str, default: i64) -> i64 {
    match non_empty(key) {
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    key,
                    value = %raw,
                    default,
                    "could not parse environment variable as an integer, using default"
                );
                default
            }
        },
        None => default,
    }
}

/// Read a 32-bit integer from the environment, falling back to `default`
/// when the variable is unset, empty, or unparseable.
pub fn int32(key: &str, default: i32) -> i32 {
    match non_empty(key) {
        Some(raw) => match raw.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    key,
                    value = %raw,
                    default,
                    "could not parse environment variable as a 32-bit integer, using default"
                );
                default
            }
        },
        None => default,
    }
}

/// Read a duration from the environment, falling back to `default` when the
/// variable is unset, empty, or unparseable.
///
/// Accepts unit-suffixed strings such as "1h", "30m", "5s", "100ms"; see
/// [`parse_duration`] for the full grammar.
pub fn duration(key: &str, default: Duration) -> Duration {
    match non_empty(key) {
        Some(raw) => match parse_duration(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    key,
                    value = %raw,
                    default = ?default,
                    error = %err,
                    "could not parse environment variable as a duration, using default"
                );
                default
            }
        },
        None => default,
    }
}

/// Read a string from the environment, falling back to `default` when the
/// variable is unset or empty.
pub fn string(key: &str, default: &str) -> String {
    non_empty(key).unwrap_or_else(|| default.to_string())
}

/// Read a required string from the environment.
///
/// An unset or empty variable is a fatal configuration error; callers
/// bubble it up to the entry point rather than substituting a default.
pub fn require_string(key: &str) -> Result<String, EnvError> {
    non_empty(key).ok_or_else(|| EnvError::MissingRequired(key.to_string()))
}

// An empty value is treated the same as an unset variable throughout.
fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_int_reads_value() {
        std::env::set_var("SVC_TEST_INT", "42");
        assert_eq!(int("SVC_TEST_INT", 7), 42);

        std::env::set_var("SVC_TEST_INT", "-9000000000");
        assert_eq!(int("SVC_TEST_INT", 7), -9_000_000_000);

        std::env::remove_var("SVC_TEST_INT");
    }

    #[test]
    #[serial]
    fn test_int_falls_back_on_unset_empty_and_garbage() {
        std::env::remove_var("SVC_TEST_INT_FALLBACK");
        assert_eq!(int("SVC_TEST_INT_FALLBACK", 7), 7);

        std::env::set_var("SVC_TEST_INT_FALLBACK", "");
        assert_eq!(int("SVC_TEST_INT_FALLBACK", 7), 7);

        std::env::set_var("SVC_TEST_INT_FALLBACK", "not-a-number");
        assert_eq!(int("SVC_TEST_INT_FALLBACK", 7), 7);

        std::env::remove_var("SVC_TEST_INT_FALLBACK");
    }

    #[test]
    #[serial]
    fn test_int32_reads_value_and_falls_back_on_overflow() {
        std::env::set_var("SVC_TEST_INT32", "123");
        assert_eq!(int32("SVC_TEST_INT32", 5), 123);

        // Does not fit in 32 bits.
        std::env::set_var("SVC_TEST_INT32", "4000000000");
        assert_eq!(int32("SVC_TEST_INT32", 5), 5);

        std::env::remove_var("SVC_TEST_INT32");
        assert_eq!(int32("SVC_TEST_INT32", 5), 5);
    }

    #[test]
    #[serial]
    fn test_duration_reads_suffixed_values() {
        for (raw, expected) in [
            ("1h", Duration::from_secs(3_600)),
            ("30m", Duration::from_secs(1_800)),
            ("5s", Duration::from_secs(5)),
            ("100ms", Duration::from_millis(100)),
        ] {
            std::env::set_var("SVC_TEST_DURATION", raw);
            assert_eq!(
                duration("SVC_TEST_DURATION", Duration::ZERO),
                expected,
                "raw value {raw:?}"
            );
        }
        std::env::remove_var("SVC_TEST_DURATION");
    }

    #[test]
    #[serial]
    fn test_duration_falls_back_on_unset_and_garbage() {
        let default = Duration::from_secs(30);

        std::env::remove_var("SVC_TEST_DURATION_FALLBACK");
        assert_eq!(duration("SVC_TEST_DURATION_FALLBACK", default), default);

        std::env::set_var("SVC_TEST_DURATION_FALLBACK", "soon");
        assert_eq!(duration("SVC_TEST_DURATION_FALLBACK", default), default);

        std::env::set_var("SVC_TEST_DURATION_FALLBACK", "-5s");
        assert_eq!(duration("SVC_TEST_DURATION_FALLBACK", default), default);

        std::env::remove_var("SVC_TEST_DURATION_FALLBACK");
    }

    #[test]
    #[serial]
    fn test_string_reads_value_and_falls_back() {
        std::env::set_var("SVC_TEST_STRING", "hello");
        assert_eq!(string("SVC_TEST_STRING", "fallback"), "hello");

        std::env::set_var("SVC_TEST_STRING", "");
        assert_eq!(string("SVC_TEST_STRING", "fallback"), "fallback");

        std::env::remove_var("SVC_TEST_STRING");
        assert_eq!(string("SVC_TEST_STRING", "fallback"), "fallback");
    }

    #[test]
    #[serial]
    fn test_require_string_present() {
        std::env::set_var("SVC_TEST_REQUIRED", "set");
        assert_eq!(require_string("SVC_TEST_REQUIRED").unwrap(), "set");
        std::env::remove_var("SVC_TEST_REQUIRED");
    }

    #[test]
    #[serial]
    fn test_require_string_missing_or_empty_is_fatal() {
        std::env::remove_var("SVC_TEST_REQUIRED_MISSING");
        assert_eq!(
            require_string("SVC_TEST_REQUIRED_MISSING"),
            Err(EnvError::MissingRequired(
                "SVC_TEST_REQUIRED_MISSING".to_string()
            ))
        );

        std::env::set_var("SVC_TEST_REQUIRED_MISSING", "");
        assert_eq!(
            require_string("SVC_TEST_REQUIRED_MISSING"),
            Err(EnvError::MissingRequired(
                "SVC_TEST_REQUIRED_MISSING".to_string()
            ))
        );
        std::env::remove_var("SVC_TEST_REQUIRED_MISSING");
    }
}
