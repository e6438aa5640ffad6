//! Abstract syntax tree for compiled search expressions

pub mod nodes;

pub use nodes::{Expression, ExpressionKind, Term};
