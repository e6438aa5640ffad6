//! Span-accurate token stream management for the query parser
//!
//! Whitespace tokens are kept with their original spans but filtered out of
//! the significant-token index the parser navigates, so error reporting can
//! still point at exact byte offsets in the query string.

use crate::{
    tokens::token::Token,
    utils::{Span, Spanned},
};
use thiserror::Error;

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Errors raised by token stream navigation
#[derive(Debug, Clone, Error)]
pub enum TokenStreamError {
    #[error("Unexpected token: expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of stream: expected {expected}")]
    UnexpectedEndOfStream { expected: String },
}

/// Span-accurate token stream that maintains precise source locations
/// even when filtering out whitespace for parsing.
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including whitespace) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant (non-whitespace) tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
    /// Original query text for diagnostics
    query: Option<String>,
}

impl TokenStream {
    /// Create a new token stream with automatic whitespace filtering
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            query: None,
        };
        stream.rebuild_significant_indices();
        stream
    }

    /// Create stream carrying the original query text for diagnostics
    pub fn with_query(tokens: Vec<SpannedToken>, query: &str) -> Self {
        let mut stream = Self::new(tokens);
        stream.query = Some(query.to_string());
        stream
    }

    fn rebuild_significant_indices(&mut self) {
        self.significant_indices.clear();
        for (i, spanned_token) in self.all_tokens.iter().enumerate() {
            if spanned_token.value.is_significant() {
                self.significant_indices.push(i);
            }
        }
        self.position = 0;
    }

    // === CORE NAVIGATION WITH ACCURATE SPANS ===

    /// Get the current significant token with accurate span
    pub fn current(&self) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Get the current token value (without span)
    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    /// Get the accurate span of the current token
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Peek ahead by n positions in significant tokens (0 = current)
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Check if we're at the end of significant tokens
    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Get the number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Check if the stream has no significant tokens
    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    /// Get the current significant position
    pub fn position(&self) -> usize {
        self.position
    }

    // === BACKTRACKING SUPPORT ===

    /// Save current position for later restoration
    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Restore a previously saved position
    pub fn restore_position(&mut self, position: usize) {
        self.position = position.min(self.significant_indices.len());
    }

    // === SPAN ACCURACY METHODS ===

    /// Get span at a specific position in significant tokens
    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.significant_indices
            .get(position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
            .map(|spanned| spanned.span)
    }

    /// Get span covering a range of significant token positions
    pub fn span_range(&self, start_pos: usize, end_pos: usize) -> Span {
        let start_span = self.span_at_position(start_pos);
        let end_span = self.span_at_position(end_pos);

        match (start_span, end_span) {
            (Some(start), Some(end)) => start.merge(end),
            (Some(start), None) => start,
            (None, Some(end)) => end,
            (None, None) => Span::dummy(),
        }
    }

    // === EXPECTATION HELPERS ===

    /// Consume the current token if it matches, otherwise error
    pub fn expect_token(&mut self, expected: Token) -> Result<SpannedToken, TokenStreamError> {
        match self.current() {
            Some(spanned) if spanned.value == expected => {
                let taken = spanned.clone();
                self.advance();
                Ok(taken)
            }
            Some(spanned) => Err(TokenStreamError::UnexpectedToken {
                expected: expected.as_query_string(),
                found: spanned.value.as_query_string(),
                span: spanned.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream {
                expected: expected.as_query_string(),
            }),
        }
    }

    // === DIAGNOSTICS ===

    /// Get the tokens surrounding the current position for error context
    pub fn context_snippet(&self, radius: usize) -> Vec<&SpannedToken> {
        let start = self.position.saturating_sub(radius);
        let end = (self.position + radius + 1).min(self.significant_indices.len());
        (start..end)
            .filter_map(|pos| {
                self.significant_indices
                    .get(pos)
                    .and_then(|&i| self.all_tokens.get(i))
            })
            .collect()
    }

    /// Get the original query text, if the stream carries it
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// All tokens including whitespace (for metrics)
    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    /// Summarize the stream state for diagnostics
    pub fn diagnostic(&self) -> String {
        format!(
            "position {}/{} ({} raw tokens)",
            self.position,
            self.significant_indices.len(),
            self.all_tokens.len()
        )
    }
}

/// Stream integrity validation
pub mod validation {
    use super::TokenStream;
    use crate::tokens::token::Token;

    /// Validate that a stream is well-formed: ends with EOF and has no
    /// significant tokens after it
    pub fn validate_token_stream(stream: &TokenStream) -> Result<(), String> {
        let significant: Vec<_> = stream
            .all_tokens()
            .iter()
            .filter(|t| t.value.is_significant())
            .collect();

        match significant.last() {
            Some(last) if matches!(last.value, Token::Eof) => Ok(()),
            Some(last) => Err(format!(
                "Token stream must end with EOF, found '{}'",
                last.value.as_query_string()
            )),
            None => Ok(()), // empty stream is valid; the parser rejects it itself
        }
    }
}

/// Builder for token streams (primarily for tests)
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn push_token_with_span(mut self, token: Token, span: Span) -> Self {
        self.tokens.push(Spanned::new(token, span));
        self
    }

    pub fn push_token(self, token: Token) -> Self {
        let offset = self.tokens.len();
        self.push_token_with_span(token, Span::new(offset, offset + 1))
    }

    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stream() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token_with_span(Token::OpenAll, Span::new(0, 1))
            .push_token_with_span(Token::Bareword("wood".to_string()), Span::new(1, 5))
            .push_token_with_span(Token::Space, Span::new(5, 6))
            .push_token_with_span(Token::Not, Span::new(6, 7))
            .push_token_with_span(Token::Bareword("plank".to_string()), Span::new(7, 12))
            .push_token_with_span(Token::CloseAll, Span::new(12, 13))
            .push_token_with_span(Token::Eof, Span::new(13, 13))
            .build()
    }

    #[test]
    fn test_whitespace_is_filtered_but_spans_survive() {
        let stream = sample_stream();
        // 7 raw tokens, 6 significant (space filtered)
        assert_eq!(stream.all_tokens().len(), 7);
        assert_eq!(stream.len(), 6);
    }

    #[test]
    fn test_navigation() {
        let mut stream = sample_stream();
        assert_eq!(stream.current_token(), Some(&Token::OpenAll));

        stream.advance();
        assert_eq!(
            stream.current_token(),
            Some(&Token::Bareword("wood".to_string()))
        );
        assert_eq!(stream.current_span(), Some(Span::new(1, 5)));

        // Space at 5..6 is skipped
        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::Not));
    }

    #[test]
    fn test_peek_ahead() {
        let stream = sample_stream();
        assert_eq!(stream.peek_ahead(0).map(|t| &t.value), Some(&Token::OpenAll));
        assert_eq!(
            stream.peek_ahead(2).map(|t| &t.value),
            Some(&Token::Not),
            "peek must skip whitespace"
        );
    }

    #[test]
    fn test_save_restore_position() {
        let mut stream = sample_stream();
        stream.advance();
        stream.advance();
        let saved = stream.save_position();

        stream.advance();
        stream.advance();
        assert_ne!(stream.position(), saved);

        stream.restore_position(saved);
        assert_eq!(stream.current_token(), Some(&Token::Not));
    }

    #[test]
    fn test_expect_token() {
        let mut stream = sample_stream();
        assert!(stream.expect_token(Token::OpenAll).is_ok());
        let err = stream.expect_token(Token::CloseAll).unwrap_err();
        assert!(matches!(err, TokenStreamError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_span_range() {
        let stream = sample_stream();
        let span = stream.span_range(0, 5);
        assert_eq!(span, Span::new(0, 13));
    }

    #[test]
    fn test_validation_requires_eof() {
        let good = sample_stream();
        assert!(validation::validate_token_stream(&good).is_ok());

        let bad = TokenStreamBuilder::new()
            .push_token_with_span(Token::Bareword("wood".to_string()), Span::new(0, 4))
            .build();
        assert!(validation::validate_token_stream(&bad).is_err());
    }

    #[test]
    fn test_context_snippet() {
        let mut stream = sample_stream();
        stream.advance();
        stream.advance();
        let snippet = stream.context_snippet(1);
        assert_eq!(snippet.len(), 3);
    }
}
