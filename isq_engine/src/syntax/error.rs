//! Error types for the token-to-AST transformation
//!
//! Each variant maps to a registered error code so parse failures flow
//! through the global logging system with span-accurate reporting.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Syntax transformation errors with error code mapping
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of query: expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    #[error("Empty token stream - no tokens to parse")]
    EmptyTokenStream,

    #[error("Missing EOF token in token stream")]
    MissingEof,

    #[error("Grammar violation: {message} at {span}")]
    GrammarViolation { message: String, span: Span },

    #[error("Unmatched group delimiter '{delimiter}' at {span}")]
    UnmatchedGroupDelimiter { delimiter: String, span: Span },

    #[error("Dangling '{operator}' operator at {span}")]
    DanglingOperator { operator: String, span: Span },

    #[error("Maximum recursion depth exceeded at {span}")]
    MaxRecursionDepth { span: Span },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },

    #[error("Parse error: {message} at {span}")]
    ParseError { message: String, span: Span },
}

impl SyntaxError {
    /// Create unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Create unexpected end of query error
    pub fn unexpected_end_of_input(expected: &str) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.to_string(),
        }
    }

    /// Create empty token stream error
    pub fn empty_token_stream() -> Self {
        Self::EmptyTokenStream
    }

    /// Create missing EOF error
    pub fn missing_eof() -> Self {
        Self::MissingEof
    }

    /// Create grammar violation error
    pub fn grammar_violation(message: &str, span: Span) -> Self {
        Self::GrammarViolation {
            message: message.to_string(),
            span,
        }
    }

    /// Create unmatched group delimiter error
    pub fn unmatched_delimiter(delimiter: &str, span: Span) -> Self {
        Self::UnmatchedGroupDelimiter {
            delimiter: delimiter.to_string(),
            span,
        }
    }

    /// Create dangling operator error
    pub fn dangling_operator(operator: &str, span: Span) -> Self {
        Self::DanglingOperator {
            operator: operator.to_string(),
            span,
        }
    }

    /// Create max recursion depth error
    pub fn max_recursion_depth(span: Span) -> Self {
        Self::MaxRecursionDepth { span }
    }

    /// Create internal parser error
    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Create parse error
    pub fn parse_error(message: &str, span: Span) -> Self {
        Self::ParseError {
            message: message.to_string(),
            span,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::MISSING_EOF,
            Self::EmptyTokenStream => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MissingEof => codes::syntax::MISSING_EOF,
            Self::GrammarViolation { .. } => codes::syntax::GRAMMAR_VIOLATION,
            Self::UnmatchedGroupDelimiter { .. } => codes::syntax::UNMATCHED_GROUP_DELIMITER,
            Self::DanglingOperator { .. } => codes::syntax::DANGLING_OPERATOR,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
            Self::ParseError { .. } => codes::syntax::GRAMMAR_VIOLATION,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::GrammarViolation { span, .. }
            | Self::UnmatchedGroupDelimiter { span, .. }
            | Self::DanglingOperator { span, .. }
            | Self::MaxRecursionDepth { span }
            | Self::ParseError { span, .. } => Some(*span),
            Self::UnexpectedEndOfInput { .. }
            | Self::EmptyTokenStream
            | Self::MissingEof
            | Self::InternalParserError { .. } => None,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        matches!(
            self,
            Self::InternalParserError { .. } | Self::MaxRecursionDepth { .. }
        )
    }

    /// Check if this error is recoverable by the fallback filter
    pub fn is_recoverable(&self) -> bool {
        !self.requires_halt()
    }

    /// Get error severity from the code registry
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get recommended action from the code registry
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// Create enhanced error message with recovery guidance
    pub fn enhanced_message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => format!(
                "Expected {} but found '{}'. {}",
                expected,
                found,
                self.recommended_action()
            ),
            Self::UnexpectedEndOfInput { expected } => format!(
                "Query ended while expecting {}. {}",
                expected,
                self.recommended_action()
            ),
            Self::UnmatchedGroupDelimiter { delimiter, .. } => format!(
                "Unmatched '{}' delimiter. {}",
                delimiter,
                self.recommended_action()
            ),
            Self::DanglingOperator { operator, .. } => format!(
                "Dangling '{}' operator. {}",
                operator,
                self.recommended_action()
            ),
            _ => format!("{} ({})", self, self.recommended_action()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            SyntaxError::empty_token_stream().error_code().as_str(),
            "E041"
        );
        assert_eq!(
            SyntaxError::unmatched_delimiter(")", Span::new(0, 1))
                .error_code()
                .as_str(),
            "E042"
        );
        assert_eq!(
            SyntaxError::dangling_operator("!", Span::new(0, 1))
                .error_code()
                .as_str(),
            "E044"
        );
        assert_eq!(
            SyntaxError::max_recursion_depth(Span::dummy())
                .error_code()
                .as_str(),
            "E087"
        );
    }

    #[test]
    fn test_halt_and_recoverability() {
        assert!(SyntaxError::internal_parser_error("bad state").requires_halt());
        assert!(!SyntaxError::internal_parser_error("bad state").is_recoverable());
        assert!(SyntaxError::missing_eof().is_recoverable());
        assert!(SyntaxError::unexpected_token("term", "~", Span::new(0, 1)).is_recoverable());
    }

    #[test]
    fn test_span_availability() {
        assert_eq!(
            SyntaxError::grammar_violation("bad", Span::new(2, 5)).span(),
            Some(Span::new(2, 5))
        );
        assert_eq!(SyntaxError::empty_token_stream().span(), None);
    }

    #[test]
    fn test_enhanced_message_includes_action() {
        let error = SyntaxError::unmatched_delimiter("(", Span::new(0, 1));
        let message = error.enhanced_message();
        assert!(message.contains("Unmatched '('"));
        assert!(message.len() > error.to_string().len());
    }
}
