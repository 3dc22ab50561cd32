//! Logging setup for poll control
//!
//! Installs a `tracing` subscriber for applications embedding the controller.
//! Libraries should not call this; binaries and tests pick a mode once.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber installed
    Silent,
    /// Compact stderr output at info level
    Development,
    /// Verbose diagnostics with source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Environment variable selecting the mode for `init_logging_from_env`
pub const ENV_LOG_MODE: &str = "ZWAVE_LOG_MODE";

/// Environment variable holding a filter directive; wins over `RUST_LOG`
pub const ENV_LOG_LEVEL: &str = "ZWAVE_LOG_LEVEL";

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `ZWAVE_LOG_LEVEL`: filter directive, e.g. `poll_control=debug`
/// - `RUST_LOG`: used when `ZWAVE_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    init_logging_with(mode, env_var)
}

/// Initialize logging from `ZWAVE_LOG_MODE`
///
/// - "silent" -> LoggingMode::Silent
/// - "development" -> LoggingMode::Development
/// - "debug" -> LoggingMode::Debug
///
/// Unset means silent; any other value is an error.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = mode_from_lookup(env_var)?;
    init_logging_with(mode, env_var)
}

fn env_var(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

fn init_logging_with<F>(mode: LoggingMode, lookup: F) -> Result<(), LoggingError>
where
    F: Fn(&str) -> Option<String>,
{
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info", lookup)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug", lookup)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

fn mode_from_lookup<F>(lookup: F) -> Result<LoggingMode, LoggingError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_LOG_MODE) {
        Some(raw) => parse_mode(&raw),
        None => Ok(LoggingMode::Silent),
    }
}

fn parse_mode(raw: &str) -> Result<LoggingMode, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "silent" => Ok(LoggingMode::Silent),
        "development" => Ok(LoggingMode::Development),
        "debug" => Ok(LoggingMode::Debug),
        other => Err(LoggingError::InvalidEnv(format!("{ENV_LOG_MODE}={other}"))),
    }
}

/// Filter directive: `ZWAVE_LOG_LEVEL`, then `RUST_LOG`, then `default_level`
fn filter_directive<F>(default_level: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LOG_LEVEL)
        .or_else(|| lookup("RUST_LOG"))
        .unwrap_or_else(|| default_level.to_string())
}

/// Create an environment filter with fallback to default level
fn create_env_filter<F>(default_level: &str, lookup: F) -> Result<EnvFilter, LoggingError>
where
    F: Fn(&str) -> Option<String>,
{
    let directive = filter_directive(default_level, lookup);

    EnvFilter::try_new(&directive)
        .map_err(|e| LoggingError::InvalidEnv(format!("{directive}: {e}")))
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

/// Equivalent to `init_logging(LoggingMode::Silent)`
pub fn init_silent() -> Result<(), LoggingError> {
    init_logging(LoggingMode::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_silent_mode() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
        assert!(init_silent().is_ok());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("silent").unwrap(), LoggingMode::Silent);
        assert_eq!(parse_mode(" Debug ").unwrap(), LoggingMode::Debug);
        assert_eq!(parse_mode("development").unwrap(), LoggingMode::Development);
        assert!(matches!(parse_mode("loud"), Err(LoggingError::InvalidEnv(_))));
    }

    #[test]
    fn test_mode_from_lookup() {
        assert_eq!(mode_from_lookup(lookup(&[])).unwrap(), LoggingMode::Silent);
        assert_eq!(
            mode_from_lookup(lookup(&[(ENV_LOG_MODE, "debug")])).unwrap(),
            LoggingMode::Debug
        );

        let err = mode_from_lookup(lookup(&[(ENV_LOG_MODE, "loud")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable: ZWAVE_LOG_MODE=loud"
        );
    }

    #[test]
    fn test_filter_directive_precedence() {
        let both = lookup(&[(ENV_LOG_LEVEL, "poll_control=trace"), ("RUST_LOG", "warn")]);
        assert_eq!(filter_directive("info", both), "poll_control=trace");

        let rust_log_only = lookup(&[("RUST_LOG", "warn")]);
        assert_eq!(filter_directive("info", rust_log_only), "warn");

        assert_eq!(filter_directive("debug", lookup(&[])), "debug");
    }

    #[test]
    fn test_create_env_filter() {
        assert!(create_env_filter("info", lookup(&[])).is_ok());
        assert!(create_env_filter("info", lookup(&[(ENV_LOG_LEVEL, "poll_control=debug")])).is_ok());
    }

    #[test]
    fn test_create_env_filter_bad_directive() {
        let err = create_env_filter("info", lookup(&[(ENV_LOG_LEVEL, "poll_control=loud")]))
            .unwrap_err();
        match err {
            LoggingError::InvalidEnv(msg) => assert!(msg.starts_with("poll_control=loud: ")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_directive_fails_before_install() {
        let err = init_logging_with(
            LoggingMode::Development,
            lookup(&[(ENV_LOG_LEVEL, "poll_control=loud")]),
        )
        .unwrap_err();
        assert!(matches!(err, LoggingError::InvalidEnv(_)));
    }
}
