//! Syntax analysis stage: token stream to expression tree

pub mod error;
pub mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::QueryParser;

use crate::grammar::ast::nodes::Expression;
use crate::tokens::TokenStream;

/// Parse a token stream into an expression tree with default preferences
pub fn parse_query_tokens(tokens: TokenStream) -> SyntaxResult<Expression> {
    QueryParser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_query;

    #[test]
    fn test_entry_point() {
        let tokens = tokenize_query("[wood stone] !fence").unwrap();
        let expr = parse_query_tokens(tokens).unwrap();
        assert_eq!(expr.to_string(), "([wood stone] !fence)");
    }
}
