//! Builders for the composite productions of the query grammar
//!
//! expression ::= group_all | group_any | negation | comparable | term
//! group_all  ::= "(" expression* ")"
//! group_any  ::= "[" expression* "]"
//! negation   ::= "!" expression
//! query      ::= expression* EOF
//!
//! The query root is an implicit all-of group: a bare sequence of expressions
//! at the top level must all match.

use crate::grammar::ast::nodes::Expression;
use crate::grammar::builders::atomic::{parse_comparable_or_term, Parser};
use crate::tokens::Token;

/// Parse the full query: expression* wrapped in an implicit all-of group
pub fn parse_query(parser: &mut dyn Parser) -> Result<Expression, String> {
    parser.push_context("query");
    let mut children = Vec::new();

    loop {
        match parser.current_token() {
            Some(Token::Eof) | None => break,
            _ => children.push(parse_expression(parser)?),
        }
    }

    parser.pop_context();
    Ok(Expression::All(children))
}

/// Parse a single expression, dispatching on the current token
pub fn parse_expression(parser: &mut dyn Parser) -> Result<Expression, String> {
    parser.enter_recursion()?;
    let result = match parser.current_token() {
        Some(Token::OpenAll) => parse_group(parser, Token::OpenAll),
        Some(Token::OpenAny) => parse_group(parser, Token::OpenAny),
        Some(Token::Not) => parse_negation(parser),
        Some(Token::Quoted(_)) | Some(Token::Bareword(_)) => parse_comparable_or_term(parser),
        Some(token @ (Token::CloseAll | Token::CloseAny)) => Err(format!(
            "Unmatched '{}' without an opening delimiter",
            token.as_query_string()
        )),
        Some(Token::Tilde) => {
            Err("Dangling '~': an attribute comparison needs a left-hand attribute".to_string())
        }
        Some(Token::Eof) | None => Err("Expected expression, reached end of query".to_string()),
        Some(token) => Err(format!(
            "Unexpected token '{}' in expression position",
            token.as_query_string()
        )),
    };
    parser.exit_recursion();
    result
}

/// Parse a delimited group. `open` must be `Token::OpenAll` or
/// `Token::OpenAny`; the group kind follows from the delimiter.
pub fn parse_group(parser: &mut dyn Parser, open: Token) -> Result<Expression, String> {
    let close = open
        .matching_close()
        .ok_or_else(|| format!("'{}' does not open a group", open.as_query_string()))?;

    parser.push_context(match open {
        Token::OpenAll => "all_group",
        _ => "any_group",
    });

    // Consume the opening delimiter
    match parser.current_token() {
        Some(token) if *token == open => parser.advance(),
        Some(token) => {
            let found = token.as_query_string();
            parser.pop_context();
            return Err(format!(
                "Expected '{}', found '{}'",
                open.as_query_string(),
                found
            ));
        }
        None => {
            parser.pop_context();
            return Err(format!(
                "Expected '{}', reached end of query",
                open.as_query_string()
            ));
        }
    }

    let mut children = Vec::new();
    let result = loop {
        match parser.current_token() {
            Some(token) if *token == close => {
                parser.advance();
                break Ok(match close {
                    Token::CloseAll => Expression::All(children),
                    _ => Expression::Any(children),
                });
            }
            Some(Token::Eof) | None => {
                break Err(format!(
                    "Unclosed group: expected '{}' before end of query",
                    close.as_query_string()
                ));
            }
            _ => match parse_expression(parser) {
                Ok(child) => children.push(child),
                Err(error) => break Err(error),
            },
        }
    };

    parser.pop_context();
    result
}

/// Parse negation ::= "!" expression
pub fn parse_negation(parser: &mut dyn Parser) -> Result<Expression, String> {
    parser.push_context("negation");

    let result = match parser.current_token() {
        Some(Token::Not) => {
            parser.advance();
            match parser.current_token() {
                Some(Token::Eof) | None => {
                    Err("Dangling '!': negation needs an expression to negate".to_string())
                }
                Some(token) if token.is_group_close() => Err(format!(
                    "Dangling '!' before '{}': negation needs an expression to negate",
                    token.as_query_string()
                )),
                _ => parse_expression(parser).map(|child| Expression::Not(Box::new(child))),
            }
        }
        Some(token) => Err(format!(
            "Expected '!', found '{}'",
            token.as_query_string()
        )),
        None => Err("Expected '!', reached end of query".to_string()),
    };

    parser.pop_context();
    result
}
