//! Builder functions for the query grammar productions

pub mod atomic;
pub mod expressions;

pub use atomic::{parse_comparable_or_term, parse_term, Parser};
pub use expressions::{parse_expression, parse_group, parse_negation, parse_query};
