//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions. Code constants and their behavioral metadata
//! live together in this module.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_QUOTE: Code = Code::new("E021");
    pub const QUERY_TOO_LONG: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const MISSING_EOF: Code = Code::new("E040");
    pub const EMPTY_TOKEN_STREAM: Code = Code::new("E041");
    pub const UNMATCHED_GROUP_DELIMITER: Code = Code::new("E042");
    pub const GRAMMAR_VIOLATION: Code = Code::new("E043");
    pub const DANGLING_OPERATOR: Code = Code::new("E044");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Matching / attribute resolution codes
pub mod matching {
    use super::Code;

    pub const UNKNOWN_ATTRIBUTE: Code = Code::new("E180");
    pub const INVALID_NUMERIC_LITERAL: Code = Code::new("E181");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I002");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I003");
    pub const QUERY_COMPILATION_SUCCESS: Code = Code::new("I004");
    pub const FALLBACK_FILTER_APPLIED: Code = Code::new("I005");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

fn metadata_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    static REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let entries = [
            ErrorMetadata {
                code: "ERR001",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Internal engine error",
                recommended_action: "Report this as a bug with the offending query",
            },
            ErrorMetadata {
                code: "ERR002",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Engine initialization failure",
                recommended_action: "Check logging configuration before compiling queries",
            },
            ErrorMetadata {
                code: "E021",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Quoted literal is missing its closing quote",
                recommended_action: "Close the quote or remove the opening one",
            },
            ErrorMetadata {
                code: "E022",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Query exceeds the maximum allowed length",
                recommended_action: "Shorten the query",
            },
            ErrorMetadata {
                code: "E027",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Query produced more tokens than the configured limit",
                recommended_action: "Simplify the query",
            },
            ErrorMetadata {
                code: "E040",
                category: "Syntax",
                severity: Severity::High,
                recoverable: true,
                requires_halt: false,
                description: "Token stream is missing its EOF marker",
                recommended_action: "Tokenize through the lexical module, not by hand",
            },
            ErrorMetadata {
                code: "E041",
                category: "Syntax",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "No tokens to parse",
                recommended_action: "Empty queries compile to the match-all filter",
            },
            ErrorMetadata {
                code: "E042",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Group delimiter has no matching counterpart",
                recommended_action: "Balance '(' with ')' and '[' with ']'",
            },
            ErrorMetadata {
                code: "E043",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Input does not match any grammar production",
                recommended_action: "Check the query against the search grammar",
            },
            ErrorMetadata {
                code: "E044",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Operator with no operand ('!' or '~' at end of input)",
                recommended_action: "Supply the missing operand or remove the operator",
            },
            ErrorMetadata {
                code: "E050",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Token cannot start an expression at this position",
                recommended_action: "Remove or reposition the offending token",
            },
            ErrorMetadata {
                code: "E086",
                category: "Syntax",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Parser reached an inconsistent internal state",
                recommended_action: "Report this as a bug with the offending query",
            },
            ErrorMetadata {
                code: "E087",
                category: "Syntax",
                severity: Severity::High,
                recoverable: false,
                requires_halt: true,
                description: "Maximum parse recursion depth exceeded",
                recommended_action: "Reduce group nesting depth",
            },
            ErrorMetadata {
                code: "E180",
                category: "Matching",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Attribute name is not recognized; comparison never matches",
                recommended_action: "Use one of: category, name, quality, tag, quantity",
            },
            ErrorMetadata {
                code: "E181",
                category: "Matching",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Literal cannot be parsed as a number for a numeric attribute",
                recommended_action: "Use an integer literal for quantity comparisons",
            },
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

/// Look up complete metadata for a code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    metadata_registry().get(code)
}

/// Get severity for a code (unknown codes default to Medium)
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check whether a code requires halting the pipeline
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}

/// Check whether a code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.recoverable)
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_error_codes_registered() {
        let required = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::UNTERMINATED_QUOTE,
            lexical::QUERY_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            syntax::MISSING_EOF,
            syntax::EMPTY_TOKEN_STREAM,
            syntax::UNMATCHED_GROUP_DELIMITER,
            syntax::GRAMMAR_VIOLATION,
            syntax::DANGLING_OPERATOR,
            syntax::UNEXPECTED_TOKEN,
            syntax::INTERNAL_PARSER_ERROR,
            syntax::MAX_RECURSION_DEPTH,
            matching::UNKNOWN_ATTRIBUTE,
            matching::INVALID_NUMERIC_LITERAL,
        ];

        for code in &required {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification_lookups() {
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("E087"));
        assert!(!requires_halt("E042"));
        assert!(is_recoverable("E021"));
        assert!(!is_recoverable("E086"));
        assert_eq!(get_category("E180"), "Matching");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(!requires_halt("E999"));
        assert!(is_recoverable("E999"));
    }

    #[test]
    fn test_code_display() {
        assert_eq!(format!("{}", syntax::UNEXPECTED_TOKEN), "E050");
        assert_eq!(syntax::UNEXPECTED_TOKEN.as_str(), "E050");
    }
}
