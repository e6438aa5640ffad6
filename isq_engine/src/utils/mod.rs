//! Shared utility types for the query engine

pub mod span;

pub use span::{underline, Span, Spanned};
