//! Atomic builders for the leaf productions of the query grammar
//!
//! All structural characters are dedicated symbol tokens, so the only
//! grammatical ambiguity left is whether a term begins a comparable. That
//! decision is made here with a checkpoint: try the comparable production
//! first, and fall back to a plain term when no tilde follows.

use crate::grammar::ast::nodes::{Expression, Term};
use crate::tokens::Token;
use crate::utils::Span;

/// Parser capabilities that builders expect
pub trait Parser {
    // === BASIC NAVIGATION ===
    fn current_token(&self) -> Option<&Token>;
    fn advance(&mut self);

    // === SPAN REPORTING ===
    fn current_span(&self) -> Span;

    // === BACKTRACKING ===
    fn save_checkpoint(&self) -> usize;
    fn restore_checkpoint(&mut self, checkpoint: usize);

    // === RECURSION GUARD ===
    fn enter_recursion(&mut self) -> Result<(), String>;
    fn exit_recursion(&mut self);

    // === DIAGNOSTIC CONTEXT ===
    fn push_context(&mut self, context: &'static str);
    fn pop_context(&mut self);
}

/// Parse term ::= quoted_literal | bareword
pub fn parse_term(parser: &mut dyn Parser) -> Result<Term, String> {
    match parser.current_token() {
        Some(Token::Quoted(text)) => {
            let term = Term::quoted(text.clone());
            parser.advance();
            Ok(term)
        }
        Some(Token::Bareword(text)) => {
            let term = Term::bareword(text.clone());
            parser.advance();
            Ok(term)
        }
        Some(token) => Err(format!(
            "Expected search term, found '{}'",
            token.as_query_string()
        )),
        None => Err("Expected search term, reached end of query".to_string()),
    }
}

/// Parse comparable ::= term "~" term, falling back to a plain term when no
/// tilde follows the first term
pub fn parse_comparable_or_term(parser: &mut dyn Parser) -> Result<Expression, String> {
    let checkpoint = parser.save_checkpoint();
    let first = parse_term(parser)?;

    match parser.current_token() {
        Some(Token::Tilde) => {
            parser.advance();
            match parse_term(parser) {
                Ok(value) => Ok(Expression::Comparable {
                    attribute: first.text,
                    value,
                }),
                Err(_) => {
                    // Tilde with no right-hand term; nothing to fall back to
                    parser.restore_checkpoint(checkpoint);
                    Err(format!(
                        "Dangling '~' after '{}': an attribute comparison needs a value",
                        first.text
                    ))
                }
            }
        }
        _ => Ok(Expression::Term(first)),
    }
}
