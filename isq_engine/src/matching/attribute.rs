//! Attribute resolution for comparable expressions
//!
//! Maps the left-hand side of `attribute~value` onto an item property.
//! Unknown attribute names are a matching-time condition, not a parse
//! error: the comparable simply never matches.

use crate::matching::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item attributes addressable in a comparable expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemAttribute {
    Category,
    Name,
    Quality,
    Tag,
    Quantity,
}

impl ItemAttribute {
    /// Parse attribute name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "category" => Some(Self::Category),
            "name" => Some(Self::Name),
            "quality" => Some(Self::Quality),
            "tag" => Some(Self::Tag),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Name => "name",
            Self::Quality => "quality",
            Self::Tag => "tag",
            Self::Quantity => "quantity",
        }
    }

    /// All recognized attribute names, for diagnostics
    pub fn all() -> [Self; 5] {
        [
            Self::Category,
            Self::Name,
            Self::Quality,
            Self::Tag,
            Self::Quantity,
        ]
    }

    /// Resolve this attribute's current value from an item
    pub fn resolve<'a>(&self, item: &'a Item) -> AttributeValue<'a> {
        match self {
            Self::Category => AttributeValue::Text(&item.category),
            Self::Name => AttributeValue::Text(&item.display_name),
            Self::Quality => AttributeValue::Text(item.quality.label()),
            Self::Tag => AttributeValue::Tags(&item.tags),
            Self::Quantity => AttributeValue::Number(item.quantity),
        }
    }
}

impl fmt::Display for ItemAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved attribute value, borrowed from the candidate item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    /// Single text value
    Text(&'a str),
    /// Tag set; matching succeeds if any tag matches
    Tags(&'a [String]),
    /// Numeric value (quantity)
    Number(u32),
}

/// Parse a numeric literal for comparison against a numeric attribute
pub fn parse_numeric_literal(literal: &str) -> Option<u32> {
    literal.trim().parse().ok()
}
