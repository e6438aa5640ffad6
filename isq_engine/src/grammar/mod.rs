//! Grammar definition for search queries: AST nodes and production builders

pub mod ast;
pub mod builders;

pub use ast::{Expression, ExpressionKind, Term};
pub use builders::Parser;
