//! Expression evaluation stage
//!
//! Matches compiled expressions against items, containers, and raw text in
//! exact or partial mode, and provides the sort-comparator view. Evaluation
//! is pure and side-effect-free apart from diagnostic logging; a compiled
//! tree can be evaluated concurrently by multiple readers.

pub mod attribute;
pub mod comparator;
pub mod evaluator;
pub mod item;

pub use attribute::{AttributeValue, ItemAttribute};
pub use evaluator::MatchMode;
pub use item::{Container, Item, Quality};

use crate::config::runtime::MatchingPreferences;
use std::sync::OnceLock;

static MATCHING_PREFERENCES: OnceLock<MatchingPreferences> = OnceLock::new();

/// Matching preferences, resolved from the environment once per process
pub fn matching_preferences() -> &'static MatchingPreferences {
    MATCHING_PREFERENCES.get_or_init(MatchingPreferences::default)
}
