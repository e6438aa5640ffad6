// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to collect detailed token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log per-token debug events while tokenizing
    pub log_token_events: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("ISQ_LEXICAL_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_token_events: env::var("ISQ_LEXICAL_LOG_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserPreferences {
    /// Whether to record parse errors in the parser's error history
    pub record_error_history: bool,

    /// Whether to log each backtracking attempt (very noisy)
    pub log_backtracking: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            record_error_history: env::var("ISQ_PARSER_ERROR_HISTORY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_backtracking: env::var("ISQ_PARSER_LOG_BACKTRACKING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingPreferences {
    /// Whether to warn (once per compile) about unknown attribute names
    pub warn_unknown_attributes: bool,
}

impl Default for MatchingPreferences {
    fn default() -> Self {
        Self {
            warn_unknown_attributes: env::var("ISQ_MATCHING_WARN_UNKNOWN_ATTRS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// All runtime preferences, loadable from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub parser: ParserPreferences,
    pub matching: MatchingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from a TOML file; missing sections fall back to
    /// defaults (which themselves honor ISQ_* environment overrides)
    pub fn from_toml_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse preferences from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        // Defaults hold unless env overrides flip them
        if std::env::var("ISQ_PARSER_ERROR_HISTORY").is_err() {
            assert!(config.parser.record_error_history);
        }
        if std::env::var("ISQ_MATCHING_WARN_UNKNOWN_ATTRS").is_err() {
            assert!(config.matching.warn_unknown_attributes);
        }
    }

    #[test]
    fn test_from_toml_str() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            collect_detailed_metrics = false
            log_token_events = true

            [parser]
            record_error_history = false
            log_backtracking = false
            "#,
        )
        .unwrap();

        assert!(!config.lexical.collect_detailed_metrics);
        assert!(config.lexical.log_token_events);
        assert!(!config.parser.record_error_history);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\nwarn_unknown_attributes = false").unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert!(!config.matching.warn_unknown_attributes);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(RuntimeConfig::from_toml_str("[lexical\nbroken").is_err());
    }
}
