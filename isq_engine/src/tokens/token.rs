//! Token system for the search query grammar
//!
//! Every reserved character gets a dedicated symbol token; everything else is
//! a bareword or quoted literal. There is no context sensitivity: whether a
//! `~` forms an attribute comparison is decided by the parser, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reserved structural characters of the query grammar
pub const RESERVED_CHARS: [char; 7] = ['(', ')', '[', ']', '!', '~', '"'];

/// Tokens produced from a search query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // === GROUP DELIMITERS ===
    /// '(' - opens an all-of group
    OpenAll,
    /// ')' - closes an all-of group
    CloseAll,
    /// '[' - opens an any-of group
    OpenAny,
    /// ']' - closes an any-of group
    CloseAny,

    // === OPERATORS ===
    /// '!' - negation prefix
    Not,
    /// '~' - attribute/literal infix
    Tilde,

    // === TERMS ===
    /// Quoted literal ("content") with quotes stripped
    Quoted(String),
    /// Unquoted run of non-reserved, non-space characters
    Bareword(String),

    // === WHITESPACE AND STRUCTURE ===
    /// Run of whitespace characters
    Space,
    /// End of query marker
    Eof,
}

impl Token {
    /// Check if this token can begin a term
    pub fn is_term(&self) -> bool {
        matches!(self, Self::Quoted(_) | Self::Bareword(_))
    }

    /// Check if this token opens a group of either kind
    pub fn is_group_open(&self) -> bool {
        matches!(self, Self::OpenAll | Self::OpenAny)
    }

    /// Check if this token closes a group of either kind
    pub fn is_group_close(&self) -> bool {
        matches!(self, Self::CloseAll | Self::CloseAny)
    }

    /// Get the closing delimiter matching an opening one
    pub fn matching_close(&self) -> Option<Token> {
        match self {
            Self::OpenAll => Some(Self::CloseAll),
            Self::OpenAny => Some(Self::CloseAny),
            _ => None,
        }
    }

    /// Get the literal text if this token is a term
    pub fn term_text(&self) -> Option<&str> {
        match self {
            Self::Quoted(text) | Self::Bareword(text) => Some(text),
            _ => None,
        }
    }

    /// Check if this token is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Space)
    }

    /// Check if this token should be ignored during parsing
    pub fn is_ignorable(&self) -> bool {
        self.is_whitespace()
    }

    /// Check if this token participates in parsing decisions
    pub fn is_significant(&self) -> bool {
        !self.is_ignorable()
    }

    /// Get the token as it appears in query source
    pub fn as_query_string(&self) -> String {
        match self {
            Self::OpenAll => "(".to_string(),
            Self::CloseAll => ")".to_string(),
            Self::OpenAny => "[".to_string(),
            Self::CloseAny => "]".to_string(),
            Self::Not => "!".to_string(),
            Self::Tilde => "~".to_string(),
            Self::Quoted(text) => format!("\"{}\"", text),
            Self::Bareword(text) => text.clone(),
            Self::Space => " ".to_string(),
            Self::Eof => "<EOF>".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query_string())
    }
}

/// Token classification for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Group delimiters
    Structural,
    /// Operator symbols
    Operator,
    /// Term literals
    Term,
    /// Whitespace and formatting
    Whitespace,
    /// Special tokens (EOF)
    Special,
}

impl Token {
    /// Get the classification of this token
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::OpenAll | Self::CloseAll | Self::OpenAny | Self::CloseAny => {
                TokenClass::Structural
            }
            Self::Not | Self::Tilde => TokenClass::Operator,
            Self::Quoted(_) | Self::Bareword(_) => TokenClass::Term,
            Self::Space => TokenClass::Whitespace,
            Self::Eof => TokenClass::Special,
        }
    }
}

/// Check if a character is reserved by the grammar
pub fn is_reserved_char(ch: char) -> bool {
    RESERVED_CHARS.contains(&ch)
}

/// Map a reserved character to its symbol token
pub fn classify_reserved_char(ch: char) -> Option<Token> {
    match ch {
        '(' => Some(Token::OpenAll),
        ')' => Some(Token::CloseAll),
        '[' => Some(Token::OpenAny),
        ']' => Some(Token::CloseAny),
        '!' => Some(Token::Not),
        '~' => Some(Token::Tilde),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_classification() {
        assert!(Token::Bareword("wood".to_string()).is_term());
        assert!(Token::Quoted("gold star".to_string()).is_term());
        assert!(!Token::Tilde.is_term());
        assert!(!Token::Eof.is_term());
    }

    #[test]
    fn test_group_delimiter_pairing() {
        assert_eq!(Token::OpenAll.matching_close(), Some(Token::CloseAll));
        assert_eq!(Token::OpenAny.matching_close(), Some(Token::CloseAny));
        assert_eq!(Token::Not.matching_close(), None);
    }

    #[test]
    fn test_significance() {
        assert!(!Token::Space.is_significant());
        assert!(Token::Eof.is_significant());
        assert!(Token::Bareword("wood".to_string()).is_significant());
    }

    #[test]
    fn test_query_string_rendering() {
        assert_eq!(Token::OpenAny.as_query_string(), "[");
        assert_eq!(
            Token::Quoted("gold star".to_string()).as_query_string(),
            "\"gold star\""
        );
        assert_eq!(Token::Bareword("wood".to_string()).as_query_string(), "wood");
    }

    #[test]
    fn test_reserved_char_classification() {
        assert!(is_reserved_char('~'));
        assert!(!is_reserved_char('w'));
        assert_eq!(classify_reserved_char('!'), Some(Token::Not));
        // '"' is reserved but handled by quoted-literal lexing, not as a symbol
        assert_eq!(classify_reserved_char('"'), None);
    }

    #[test]
    fn test_token_classes() {
        assert_eq!(Token::OpenAll.token_class(), TokenClass::Structural);
        assert_eq!(Token::Tilde.token_class(), TokenClass::Operator);
        assert_eq!(
            Token::Bareword("x".to_string()).token_class(),
            TokenClass::Term
        );
        assert_eq!(Token::Space.token_class(), TokenClass::Whitespace);
        assert_eq!(Token::Eof.token_class(), TokenClass::Special);
    }
}
