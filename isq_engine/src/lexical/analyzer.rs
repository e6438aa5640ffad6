//! Query tokenizer with security limits and metrics
//!
//! Single forward scan over the query string. Reserved characters become
//! dedicated symbol tokens, `"` opens a quoted literal, and any other run of
//! non-reserved, non-whitespace characters becomes a bareword. Whitespace is
//! emitted as tokens (with spans) and filtered later by the token stream.

use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{classify_reserved_char, SpannedToken, Token, TokenStream};
use crate::utils::{Span, Spanned};
use crate::{log_debug, log_error, log_success};
use thiserror::Error;

/// Errors raised during tokenization
#[derive(Debug, Clone, Error)]
pub enum LexerError {
    #[error("Unterminated quoted literal starting at {span}")]
    UnterminatedQuote { span: Span },

    #[error("Query length {length} exceeds maximum {limit}")]
    QueryTooLong { length: usize, limit: usize },

    #[error("Quoted literal length {length} exceeds maximum {limit} at {span}")]
    QuotedLiteralTooLong {
        length: usize,
        limit: usize,
        span: Span,
    },

    #[error("Query produced {count} tokens, exceeding maximum {limit}")]
    TooManyTokens { count: usize, limit: usize },
}

impl LexerError {
    /// Get error code for the global logging system
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::UnterminatedQuote { .. } => codes::lexical::UNTERMINATED_QUOTE,
            Self::QueryTooLong { .. } | Self::QuotedLiteralTooLong { .. } => {
                codes::lexical::QUERY_TOO_LONG
            }
            Self::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnterminatedQuote { span } | Self::QuotedLiteralTooLong { span, .. } => {
                Some(*span)
            }
            Self::QueryTooLong { .. } | Self::TooManyTokens { .. } => None,
        }
    }
}

/// Token distribution metrics collected while tokenizing
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub term_tokens: usize,
    pub quoted_tokens: usize,
    pub operator_tokens: usize,
    pub group_tokens: usize,
    pub whitespace_tokens: usize,
    pub max_term_length: usize,
}

impl LexicalMetrics {
    /// Record a token into the metrics
    pub fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token {
            Token::Quoted(text) => {
                self.term_tokens += 1;
                self.quoted_tokens += 1;
                self.max_term_length = self.max_term_length.max(text.len());
            }
            Token::Bareword(text) => {
                self.term_tokens += 1;
                self.max_term_length = self.max_term_length.max(text.len());
            }
            Token::Not | Token::Tilde => self.operator_tokens += 1,
            Token::OpenAll | Token::CloseAll | Token::OpenAny | Token::CloseAny => {
                self.group_tokens += 1
            }
            Token::Space => self.whitespace_tokens += 1,
            Token::Eof => {}
        }
    }

    /// Count of tokens that participate in parsing
    pub fn significant_tokens(&self) -> usize {
        self.total_tokens - self.whitespace_tokens
    }
}

/// Query tokenizer
pub struct QueryLexer {
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
}

impl QueryLexer {
    /// Create a new lexer with default preferences
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    /// Create lexer with custom runtime preferences
    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            preferences,
            metrics: LexicalMetrics::default(),
        }
    }

    /// Get the preferences this lexer was built with
    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Get metrics from the most recent tokenization
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize a query string into a span-accurate token stream
    pub fn tokenize(&mut self, query: &str) -> Result<TokenStream, LexerError> {
        if query.len() > MAX_QUERY_LENGTH {
            let error = LexerError::QueryTooLong {
                length: query.len(),
                limit: MAX_QUERY_LENGTH,
            };
            log_error!(error.error_code(), "Query exceeds length limit",
                "length" => query.len(),
                "limit" => MAX_QUERY_LENGTH
            );
            return Err(error);
        }

        self.metrics = LexicalMetrics::default();
        let mut tokens: Vec<SpannedToken> = Vec::new();
        let mut chars = query.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            let token = if ch.is_whitespace() {
                self.scan_whitespace(offset, ch, &mut chars)
            } else if ch == '"' {
                self.scan_quoted(query, offset, &mut chars)?
            } else if let Some(symbol) = classify_reserved_char(ch) {
                Spanned::new(symbol, Span::new(offset, offset + ch.len_utf8()))
            } else {
                self.scan_bareword(offset, ch, &mut chars)
            };

            if self.preferences.log_token_events {
                log_debug!("Token scanned",
                    "token" => token.value,
                    "span" => token.span
                );
            }

            self.metrics.record_token(&token.value, &self.preferences);
            tokens.push(token);

            if tokens.len() > MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len(),
                    limit: MAX_TOKEN_COUNT,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }
        }

        let end = query.len();
        let eof = Spanned::new(Token::Eof, Span::new(end, end));
        self.metrics.record_token(&eof.value, &self.preferences);
        tokens.push(eof);

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Query tokenized",
            "tokens" => tokens.len(),
            "significant" => self.metrics.significant_tokens()
        );

        Ok(TokenStream::with_query(tokens, query))
    }

    fn scan_whitespace(
        &self,
        start: usize,
        first: char,
        chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ) -> SpannedToken {
        let mut end = start + first.len_utf8();
        while let Some(&(offset, ch)) = chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            end = offset + ch.len_utf8();
            chars.next();
        }
        Spanned::new(Token::Space, Span::new(start, end))
    }

    /// Scan the body of a quoted literal; `start` is the offset of the
    /// already-consumed opening quote
    fn scan_quoted(
        &self,
        query: &str,
        start: usize,
        chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ) -> Result<SpannedToken, LexerError> {
        for (offset, ch) in chars.by_ref() {
            if ch == '"' {
                let content = &query[start + 1..offset];
                let span = Span::new(start, offset + 1);
                if content.len() > MAX_QUOTED_LENGTH {
                    let error = LexerError::QuotedLiteralTooLong {
                        length: content.len(),
                        limit: MAX_QUOTED_LENGTH,
                        span,
                    };
                    log_error!(error.error_code(), "Quoted literal exceeds length limit",
                        span = span,
                        "limit" => MAX_QUOTED_LENGTH
                    );
                    return Err(error);
                }
                return Ok(Spanned::new(Token::Quoted(content.to_string()), span));
            }
        }

        let span = Span::new(start, query.len());
        let error = LexerError::UnterminatedQuote { span };
        log_error!(error.error_code(), "Unterminated quoted literal", span = span);
        Err(error)
    }

    fn scan_bareword(
        &self,
        start: usize,
        first: char,
        chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ) -> SpannedToken {
        let mut end = start + first.len_utf8();
        let mut text = String::from(first);

        while let Some(&(offset, ch)) = chars.peek() {
            if ch.is_whitespace() || crate::tokens::is_reserved_char(ch) {
                break;
            }
            text.push(ch);
            end = offset + ch.len_utf8();
            chars.next();
        }

        Spanned::new(Token::Bareword(text), Span::new(start, end))
    }
}

impl Default for QueryLexer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn tokenize(query: &str) -> Vec<Token> {
        QueryLexer::new()
            .tokenize(query)
            .unwrap()
            .all_tokens()
            .iter()
            .map(|t| t.value.clone())
            .collect()
    }

    #[test]
    fn test_simple_group() {
        let tokens = tokenize("(wood !plank)");
        assert_eq!(
            tokens,
            vec![
                Token::OpenAll,
                Token::Bareword("wood".to_string()),
                Token::Space,
                Token::Not,
                Token::Bareword("plank".to_string()),
                Token::CloseAll,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comparable_splits_at_tilde() {
        let tokens = tokenize("quality~gold");
        assert_eq!(
            tokens,
            vec![
                Token::Bareword("quality".to_string()),
                Token::Tilde,
                Token::Bareword("gold".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_literal_preserves_spaces_and_reserved_chars_are_plain() {
        let tokens = tokenize("\"gold (star)\"");
        assert_eq!(
            tokens,
            vec![Token::Quoted("gold (star)".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_empty_quoted_literal() {
        let tokens = tokenize("\"\"");
        assert_eq!(tokens, vec![Token::Quoted(String::new()), Token::Eof]);
    }

    #[test]
    fn test_whitespace_runs_collapse_to_one_token() {
        let tokens = tokenize("wood   stone");
        assert_eq!(
            tokens,
            vec![
                Token::Bareword("wood".to_string()),
                Token::Space,
                Token::Bareword("stone".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        let result = QueryLexer::new().tokenize("\"unterminated");
        assert_matches!(result, Err(LexerError::UnterminatedQuote { .. }));
    }

    #[test]
    fn test_query_too_long() {
        let query = "a".repeat(MAX_QUERY_LENGTH + 1);
        let result = QueryLexer::new().tokenize(&query);
        assert_matches!(result, Err(LexerError::QueryTooLong { .. }));
    }

    #[test]
    fn test_spans_are_byte_accurate() {
        let stream = QueryLexer::new().tokenize("[wood stone]").unwrap();
        let spans: Vec<_> = stream.all_tokens().iter().map(|t| t.span).collect();
        assert_eq!(spans[0], Span::new(0, 1)); // [
        assert_eq!(spans[1], Span::new(1, 5)); // wood
        assert_eq!(spans[2], Span::new(5, 6)); // space
        assert_eq!(spans[3], Span::new(6, 11)); // stone
        assert_eq!(spans[4], Span::new(11, 12)); // ]
        assert_eq!(spans[5], Span::new(12, 12)); // eof
    }

    #[test]
    fn test_unicode_barewords() {
        let tokens = tokenize("épée");
        assert_eq!(
            tokens,
            vec![Token::Bareword("épée".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_metrics_collection() {
        let mut lexer = QueryLexer::new();
        lexer.tokenize("(wood \"gold star\" !plank)").unwrap();
        let metrics = lexer.metrics();

        assert_eq!(metrics.term_tokens, 3);
        assert_eq!(metrics.quoted_tokens, 1);
        assert_eq!(metrics.operator_tokens, 1);
        assert_eq!(metrics.group_tokens, 2);
        assert_eq!(metrics.max_term_length, "gold star".len());
    }

    #[test]
    fn test_error_code_mapping() {
        let error = LexerError::UnterminatedQuote {
            span: Span::new(0, 5),
        };
        assert_eq!(error.error_code().as_str(), "E021");
        assert_eq!(error.span(), Some(Span::new(0, 5)));

        let error = LexerError::TooManyTokens {
            count: 2000,
            limit: 1024,
        };
        assert_eq!(error.error_code().as_str(), "E027");
        assert_eq!(error.span(), None);
    }
}
