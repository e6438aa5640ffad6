//! Parser driver with global logging integration
//!
//! Maintains precise source location tracking, a bounded diagnostic context
//! stack, and a bounded error history while the grammar builders do the
//! actual production work through the `Parser` trait.

use crate::config::constants::compile_time::syntax::*;
use crate::config::runtime::ParserPreferences;
use crate::grammar::{
    ast::nodes::Expression,
    builders::{atomic::Parser, parse_query},
};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{token_stream::validation, Token, TokenStream};
use crate::utils::{underline, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::VecDeque;

/// Recursive-descent parser over a significant-token stream
pub struct QueryParser {
    tokens: TokenStream,
    context_stack: Vec<&'static str>,
    /// Pushes suppressed after the context stack hit its depth limit
    context_overflow: usize,
    error_history: VecDeque<SyntaxError>,
    parse_depth: usize,
    preferences: ParserPreferences,
}

impl QueryParser {
    /// Create new parser with default preferences
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, ParserPreferences::default())
    }

    /// Create parser with custom runtime preferences
    pub fn with_preferences(tokens: TokenStream, preferences: ParserPreferences) -> Self {
        log_debug!("Creating query parser", "tokens" => tokens.len());

        Self {
            tokens,
            context_stack: Vec::new(),
            context_overflow: 0,
            error_history: VecDeque::new(),
            parse_depth: 0,
            preferences,
        }
    }

    /// Parse the token stream into an expression tree
    pub fn parse(&mut self) -> SyntaxResult<Expression> {
        self.push_context("query");

        if self.tokens.is_empty() {
            let error = SyntaxError::empty_token_stream();
            log_error!(error.error_code(), "Cannot parse empty token stream");
            self.pop_context();
            return Err(error);
        }

        if validation::validate_token_stream(&self.tokens).is_err() {
            let error = SyntaxError::missing_eof();
            log_error!(error.error_code(), "Token stream missing EOF token");
            self.pop_context();
            return Err(error);
        }

        let result = parse_query(self);

        match result {
            Ok(expression) => {
                log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
                    "Query parsing completed",
                    "nodes" => expression.node_count(),
                    "depth" => expression.depth()
                );
                self.pop_context();
                Ok(expression)
            }
            Err(builder_error) => {
                let error = self.classify_builder_error(&builder_error);
                self.record_error(error.clone());

                let span = error.span().unwrap_or_else(|| self.current_span());
                if let Some(query) = self.tokens.query() {
                    log_debug!("Parse error location",
                        "caret" => format!("\n{}", underline(query, &span))
                    );
                }

                log_error!(error.error_code(), "Query parsing failed",
                    span = span,
                    "context" => self.current_context(),
                    "detail" => builder_error,
                    "near" => self.surrounding_tokens().join(" "),
                    "position" => self.tokens.position()
                );

                self.pop_context();
                Err(error)
            }
        }
    }

    /// Map a builder error message onto a typed syntax error with span
    fn classify_builder_error(&self, message: &str) -> SyntaxError {
        let span = self.current_span();

        if message.contains("recursion depth") {
            SyntaxError::max_recursion_depth(span)
        } else if message.contains("Unclosed") || message.contains("Unmatched") {
            SyntaxError::unmatched_delimiter(&extract_quoted(message), span)
        } else if message.contains("Dangling") {
            SyntaxError::dangling_operator(&extract_quoted(message), span)
        } else if message.contains("end of query") {
            SyntaxError::unexpected_end_of_input("expression")
        } else if message.contains("Expected") || message.contains("Unexpected token") {
            SyntaxError::parse_error(message, span)
        } else {
            SyntaxError::grammar_violation(message, span)
        }
    }

    /// Record error in bounded history
    fn record_error(&mut self, error: SyntaxError) {
        if !self.preferences.record_error_history {
            return;
        }
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error);
    }

    /// Get recent error history for diagnostics
    pub fn error_history(&self) -> Vec<&SyntaxError> {
        self.error_history.iter().collect()
    }

    /// Get the current diagnostic context path
    pub fn current_context(&self) -> String {
        if self.context_stack.is_empty() {
            "root".to_string()
        } else {
            self.context_stack.join(" > ")
        }
    }

    /// Get the tokens surrounding the current position for error context
    pub fn surrounding_tokens(&self) -> Vec<String> {
        self.tokens
            .context_snippet(3)
            .iter()
            .map(|t| t.value.as_query_string())
            .collect()
    }
}

impl Parser for QueryParser {
    fn current_token(&self) -> Option<&Token> {
        self.tokens.current_token()
    }

    fn advance(&mut self) {
        self.tokens.advance();
    }

    fn current_span(&self) -> Span {
        self.tokens.current_span().unwrap_or_else(|| {
            // Past the last token: report at the end of the stream
            self.tokens
                .span_at_position(self.tokens.len().saturating_sub(1))
                .unwrap_or_else(Span::dummy)
        })
    }

    fn save_checkpoint(&self) -> usize {
        self.tokens.save_position()
    }

    fn restore_checkpoint(&mut self, checkpoint: usize) {
        if self.preferences.log_backtracking {
            log_debug!("Parser backtracking",
                "from" => self.tokens.position(),
                "to" => checkpoint,
                "context" => self.current_context()
            );
        }
        self.tokens.restore_position(checkpoint);
    }

    fn enter_recursion(&mut self) -> Result<(), String> {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            return Err(format!(
                "Maximum recursion depth {} exceeded",
                MAX_PARSE_DEPTH
            ));
        }
        self.parse_depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.parse_depth = self.parse_depth.saturating_sub(1);
    }

    fn push_context(&mut self, context: &'static str) {
        if self.context_stack.len() >= MAX_CONTEXT_STACK_DEPTH {
            self.context_overflow += 1;
        } else {
            self.context_stack.push(context);
        }
    }

    fn pop_context(&mut self) {
        if self.context_overflow > 0 {
            self.context_overflow -= 1;
        } else {
            self.context_stack.pop();
        }
    }
}

/// Extract the first single-quoted fragment of a message, for delimiter and
/// operator error variants
fn extract_quoted(message: &str) -> String {
    let mut parts = message.split('\'');
    match (parts.next(), parts.next()) {
        (Some(_), Some(quoted)) => quoted.to_string(),
        _ => "?".to_string(),
    }
}
