//! Logging configuration from environment variables

use super::events::LogLevel;
use std::env;

/// Minimum log level (ISQ_LOG_LEVEL: error | warn | info | debug)
pub fn get_min_log_level() -> LogLevel {
    match env::var("ISQ_LOG_LEVEL").as_deref() {
        Ok("error") => LogLevel::Error,
        Ok("warn") => LogLevel::Warning,
        Ok("debug") => LogLevel::Debug,
        _ => LogLevel::Info,
    }
}

/// Whether to emit JSON events (ISQ_LOG_FORMAT=json)
pub fn use_structured_logging() -> bool {
    matches!(env::var("ISQ_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Validate the logging configuration values
pub fn validate_config() -> Result<(), String> {
    if let Ok(level) = env::var("ISQ_LOG_LEVEL") {
        if !matches!(level.as_str(), "error" | "warn" | "info" | "debug") {
            return Err(format!("Invalid ISQ_LOG_LEVEL value: {}", level));
        }
    }
    if let Ok(format) = env::var("ISQ_LOG_FORMAT") {
        if !matches!(format.as_str(), "text" | "json") {
            return Err(format!("Invalid ISQ_LOG_FORMAT value: {}", format));
        }
    }
    Ok(())
}

/// Human-readable configuration summary
pub fn get_config_summary() -> String {
    format!(
        "Log level: {}\nStructured: {}\n",
        get_min_log_level().as_str(),
        use_structured_logging()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_info() {
        // Only meaningful when the variable is unset in the test environment
        if std::env::var("ISQ_LOG_LEVEL").is_err() {
            assert_eq!(get_min_log_level(), LogLevel::Info);
        }
    }

    #[test]
    fn test_validate_config_accepts_defaults() {
        if std::env::var("ISQ_LOG_LEVEL").is_err() && std::env::var("ISQ_LOG_FORMAT").is_err() {
            assert!(validate_config().is_ok());
        }
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.contains("Log level:"));
    }
}
