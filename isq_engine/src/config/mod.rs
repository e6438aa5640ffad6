//! Configuration module for the query engine
//!
//! Compile-time security limits live in `constants`; user-tunable behavior
//! lives in `runtime` (environment overrides plus an optional TOML file).

pub mod constants;
pub mod runtime;

pub use runtime::{LexicalPreferences, MatchingPreferences, ParserPreferences, RuntimeConfig};
