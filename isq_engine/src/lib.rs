// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod matching;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::{Expression, ExpressionKind, Term};
pub use matching::{Container, Item, ItemAttribute, MatchMode, Quality};
pub use pipeline::{compile_or_match_all, compile_query, CompiledQuery, PipelineError};
