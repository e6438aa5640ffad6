//! Candidate types expressions are evaluated against
//!
//! An `Item` is a single inventory entry; a `Container` is a labeled
//! collection of items. Both are plain data: the evaluator never mutates
//! them, and the engine never owns them beyond a match call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item quality tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Normal,
    Silver,
    Gold,
    Iridium,
}

impl Quality {
    /// Parse quality from its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "iridium" => Some(Self::Iridium),
            _ => None,
        }
    }

    /// Get the display label of this quality tier
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Iridium => "Iridium",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single inventory entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Internal name
    pub name: String,
    /// Player-facing display name
    pub display_name: String,
    /// Category label
    pub category: String,
    /// Quality tier
    pub quality: Quality,
    /// Stack size
    pub quantity: u32,
    /// Context tags
    pub tags: Vec<String>,
}

impl Item {
    /// Create an item with internal and display names; other fields default
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            quantity: 1,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A labeled collection of items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// The container's own label
    pub label: String,
    /// Contained items
    pub items: Vec<Item>,
}

impl Container {
    /// Create a container with a label and items
    pub fn new(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// Create an empty container with a label
    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parse_round_trip() {
        assert_eq!(Quality::parse("gold"), Some(Quality::Gold));
        assert_eq!(Quality::parse("GOLD"), Some(Quality::Gold));
        assert_eq!(Quality::parse("wooden"), None);
        assert_eq!(Quality::Iridium.label(), "Iridium");
    }

    #[test]
    fn test_item_builder() {
        let item = Item::new("wood_door", "Wood Door")
            .with_category("furniture")
            .with_quality(Quality::Silver)
            .with_quantity(4)
            .with_tag("wood_item");

        assert_eq!(item.name, "wood_door");
        assert_eq!(item.quality, Quality::Silver);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.tags, vec!["wood_item"]);
    }

    #[test]
    fn test_default_quantity_is_one() {
        assert_eq!(Item::new("stone", "Stone").quantity, 1);
    }
}
