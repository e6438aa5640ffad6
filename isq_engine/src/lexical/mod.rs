//! Lexical analysis stage
//!
//! Turns a raw query string into a span-accurate `TokenStream`. The grammar
//! is deliberately tiny: seven reserved characters, quoted literals, and
//! barewords. Everything position-sensitive (whether a tilde is an attribute
//! comparison, whether a `!` has an operand) belongs to the syntax stage.

pub mod analyzer;

pub use analyzer::{LexerError, LexicalMetrics, QueryLexer};

use crate::tokens::TokenStream;

/// Tokenize a query string with default preferences
pub fn tokenize_query(query: &str) -> Result<TokenStream, LexerError> {
    QueryLexer::new().tokenize(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_entry_point() {
        let stream = tokenize_query("quality~gold").unwrap();
        assert_eq!(stream.len(), 4); // quality, ~, gold, eof
    }

    #[test]
    fn test_empty_query_yields_only_eof() {
        let stream = tokenize_query("").unwrap();
        assert_eq!(stream.len(), 1);
    }
}
