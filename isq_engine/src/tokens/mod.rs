//! Token system for search query lexical analysis
//!
//! Converts a raw query string into a structured stream of tokens the parser
//! can consume. The query grammar has only seven reserved characters
//! (`(` `)` `[` `]` `!` `~` `"`); everything else lexes into barewords.
//!
//! ## Token Types
//!
//! - **Group delimiters**: `(`/`)` (all-of) and `[`/`]` (any-of)
//! - **Operators**: `!` (negation prefix), `~` (attribute infix)
//! - **Terms**: quoted literals and barewords
//! - **Whitespace**: kept in the raw stream, filtered out of parsing
//!
//! ## Token Stream Management
//!
//! The `TokenStream` provides navigation with:
//! - **Lookahead**: peek at upcoming tokens without advancing
//! - **Filtering**: significant tokens separated from whitespace
//! - **Checkpoints**: save and restore positions for backtracking
//!
//! All tokens carry span information for precise error reporting.

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder, TokenStreamError};

// Re-export classification functions for the lexical analyzer
pub use token::{classify_reserved_char, is_reserved_char, RESERVED_CHARS};

// Re-export span types from utils
pub use crate::utils::{Span, Spanned};
