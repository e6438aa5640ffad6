//! Expression evaluation against items, containers, and raw text
//!
//! Two modes thread through every node: exact (case-insensitive equality)
//! and partial (case-insensitive substring). Only the leaf comparison
//! primitive differs between modes; group and negation logic is identical.
//! Negation applies the requested mode to its child in every context shape.
//!
//! Evaluation never fails: malformed comparables, unknown attributes, and
//! empty containers all resolve to a non-match.

use crate::grammar::ast::nodes::{Expression, Term};
use crate::logging::codes;
use crate::matching::attribute::{parse_numeric_literal, AttributeValue, ItemAttribute};
use crate::matching::item::{Container, Item};
use crate::matching::matching_preferences;
use crate::{log_debug, log_warning};
use serde::{Deserialize, Serialize};

/// How leaf comparisons are performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Case-insensitive full equality, for definitive filter decisions
    Exact,
    /// Case-insensitive substring, for search-as-you-type
    Partial,
}

impl MatchMode {
    /// The leaf comparison primitive: equality or substring
    pub fn compare(&self, candidate: &str, literal: &str) -> bool {
        let candidate = candidate.to_lowercase();
        let literal = literal.to_lowercase();
        match self {
            Self::Exact => candidate == literal,
            Self::Partial => candidate.contains(&literal),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
        }
    }
}

impl Expression {
    /// Match this expression against a single item
    pub fn matches_item(&self, item: &Item, mode: MatchMode) -> bool {
        match self {
            Self::All(children) => children.iter().all(|c| c.matches_item(item, mode)),
            Self::Any(children) => children.iter().any(|c| c.matches_item(item, mode)),
            Self::Not(child) => !child.matches_item(item, mode),
            Self::Comparable { attribute, value } => match_comparable(attribute, value, item, mode),
            Self::Term(term) => match_term_item(term, item, mode),
        }
    }

    /// Match this expression against a container: its label or its contents
    pub fn matches_container(&self, container: &Container, mode: MatchMode) -> bool {
        match self {
            Self::All(children) => children.iter().all(|c| c.matches_container(container, mode)),
            Self::Any(children) => children.iter().any(|c| c.matches_container(container, mode)),
            Self::Not(child) => !child.matches_container(container, mode),
            Self::Comparable { attribute, value } => container
                .items
                .iter()
                .any(|item| match_comparable(attribute, value, item, mode)),
            Self::Term(term) => {
                mode.compare(&container.label, &term.text)
                    || container
                        .items
                        .iter()
                        .any(|item| match_term_item(term, item, mode))
            }
        }
    }

    /// Match this expression against a raw text value, such as a container
    /// label on its own. Comparables cannot resolve an attribute here and
    /// never match.
    pub fn matches_text(&self, text: &str, mode: MatchMode) -> bool {
        match self {
            Self::All(children) => children.iter().all(|c| c.matches_text(text, mode)),
            Self::Any(children) => children.iter().any(|c| c.matches_text(text, mode)),
            Self::Not(child) => !child.matches_text(text, mode),
            Self::Comparable { .. } => false,
            Self::Term(term) => mode.compare(text, &term.text),
        }
    }
}

/// Term vs item: internal name, display name, or any context tag
fn match_term_item(term: &Term, item: &Item, mode: MatchMode) -> bool {
    mode.compare(&item.name, &term.text)
        || mode.compare(&item.display_name, &term.text)
        || item.tags.iter().any(|tag| mode.compare(tag, &term.text))
}

/// Comparable vs item: resolve the attribute and compare the literal
fn match_comparable(attribute: &str, value: &Term, item: &Item, mode: MatchMode) -> bool {
    let Some(attribute) = ItemAttribute::parse(attribute) else {
        if matching_preferences().warn_unknown_attributes {
            log_warning!("Unknown attribute in comparable, treating as non-match",
                "code" => codes::matching::UNKNOWN_ATTRIBUTE,
                "attribute" => attribute
            );
        }
        return false;
    };

    match attribute.resolve(item) {
        AttributeValue::Text(text) => mode.compare(text, &value.text),
        AttributeValue::Tags(tags) => tags.iter().any(|tag| mode.compare(tag, &value.text)),
        AttributeValue::Number(number) => match mode {
            MatchMode::Exact => match parse_numeric_literal(&value.text) {
                Some(wanted) => wanted == number,
                None => {
                    log_debug!("Non-numeric literal against numeric attribute",
                        "code" => codes::matching::INVALID_NUMERIC_LITERAL,
                        "literal" => value.text
                    );
                    false
                }
            },
            MatchMode::Partial => number.to_string().contains(value.text.trim()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_query;
    use crate::matching::item::Quality;
    use crate::syntax::parse_query_tokens;

    fn compile(query: &str) -> Expression {
        parse_query_tokens(tokenize_query(query).unwrap()).unwrap()
    }

    fn wood_door() -> Item {
        Item::new("wood_door", "Wood Door").with_tag("door_item")
    }

    fn wood_plank() -> Item {
        Item::new("wood_plank", "Wood Plank")
    }

    #[test]
    fn test_all_group_with_negation_partial() {
        let expr = compile("(wood !plank)");
        assert!(expr.matches_item(&wood_door(), MatchMode::Partial));
        assert!(!expr.matches_item(&wood_plank(), MatchMode::Partial));
    }

    #[test]
    fn test_any_group_partial() {
        let expr = compile("[wood stone]");
        let fence = Item::new("stone_fence", "Stone Fence");
        assert!(expr.matches_item(&fence, MatchMode::Partial));
        assert!(!expr.matches_item(&Item::new("iron_bar", "Iron Bar"), MatchMode::Partial));
    }

    #[test]
    fn test_vacuous_groups() {
        let item = wood_door();
        assert!(Expression::All(vec![]).matches_item(&item, MatchMode::Exact));
        assert!(!Expression::Any(vec![]).matches_item(&item, MatchMode::Exact));
        assert!(Expression::All(vec![]).matches_text("anything", MatchMode::Partial));
        assert!(!Expression::Any(vec![]).matches_container(
            &Container::empty("chest"),
            MatchMode::Partial
        ));
    }

    #[test]
    fn test_double_negation_is_identity() {
        let inner = compile("wood");
        let double = compile("!!wood");
        for item in [wood_door(), Item::new("stone", "Stone")] {
            for mode in [MatchMode::Exact, MatchMode::Partial] {
                assert_eq!(
                    inner.matches_item(&item, mode),
                    double.matches_item(&item, mode)
                );
            }
        }
    }

    #[test]
    fn test_exact_is_subset_of_partial() {
        let items = [
            wood_door(),
            wood_plank(),
            Item::new("wood", "Wood"),
            Item::new("stone", "Stone"),
        ];
        let expr = compile("wood");
        for item in &items {
            if expr.matches_item(item, MatchMode::Exact) {
                assert!(expr.matches_item(item, MatchMode::Partial));
            }
        }
        // And exact really is stricter here
        assert!(!expr.matches_item(&wood_door(), MatchMode::Exact));
        assert!(expr.matches_item(&wood_door(), MatchMode::Partial));
    }

    #[test]
    fn test_term_matches_tags() {
        let expr = compile("door_item");
        assert!(expr.matches_item(&wood_door(), MatchMode::Exact));
    }

    #[test]
    fn test_quality_comparable_exact() {
        let expr = compile("quality~gold");
        let gold = Item::new("melon", "Melon").with_quality(Quality::Gold);
        let normal = Item::new("melon", "Melon");
        assert!(expr.matches_item(&gold, MatchMode::Exact));
        assert!(!expr.matches_item(&normal, MatchMode::Exact));
    }

    #[test]
    fn test_quantity_comparable() {
        let expr = compile("quantity~12");
        let stack = Item::new("stone", "Stone").with_quantity(12);
        let single = Item::new("stone", "Stone");
        assert!(expr.matches_item(&stack, MatchMode::Exact));
        assert!(!expr.matches_item(&single, MatchMode::Exact));

        // Partial numeric match is a substring of the decimal rendering
        let expr = compile("quantity~2");
        assert!(expr.matches_item(&stack, MatchMode::Partial));
        assert!(!expr.matches_item(&stack, MatchMode::Exact));
    }

    #[test]
    fn test_non_numeric_quantity_literal_never_matches() {
        let expr = compile("quantity~dozen");
        let stack = Item::new("stone", "Stone").with_quantity(12);
        assert!(!expr.matches_item(&stack, MatchMode::Exact));
        assert!(!expr.matches_item(&stack, MatchMode::Partial));
    }

    #[test]
    fn test_unknown_attribute_never_matches() {
        let expr = compile("weight~5");
        assert!(!expr.matches_item(&wood_door(), MatchMode::Exact));
        assert!(!expr.matches_item(&wood_door(), MatchMode::Partial));
        // Negation of an unknown attribute matches everything
        let expr = compile("!weight~5");
        assert!(expr.matches_item(&wood_door(), MatchMode::Partial));
    }

    #[test]
    fn test_container_matches_label_or_contents() {
        let expr = compile("wood");
        let by_label = Container::empty("Wood Shed");
        let by_content = Container::new("Chest", vec![wood_door()]);
        let neither = Container::new("Chest", vec![Item::new("stone", "Stone")]);

        assert!(expr.matches_container(&by_label, MatchMode::Partial));
        assert!(expr.matches_container(&by_content, MatchMode::Partial));
        assert!(!expr.matches_container(&neither, MatchMode::Partial));
    }

    #[test]
    fn test_container_negation_uses_requested_mode() {
        // Partial-mode negation must negate the partial match, not the exact one
        let expr = compile("!wood");
        let container = Container::new("Chest", vec![wood_door()]);
        assert!(!expr.matches_container(&container, MatchMode::Partial));
        assert!(expr.matches_container(&container, MatchMode::Exact));
    }

    #[test]
    fn test_empty_container_fails_content_match() {
        let expr = compile("wood");
        assert!(!expr.matches_container(&Container::empty("Chest"), MatchMode::Partial));
    }

    #[test]
    fn test_raw_text_matching() {
        let expr = compile("[wood stone]");
        assert!(expr.matches_text("Wood Shed", MatchMode::Partial));
        assert!(!expr.matches_text("Iron Vault", MatchMode::Partial));
        // Comparables cannot resolve against raw text
        assert!(!compile("quality~gold").matches_text("gold", MatchMode::Exact));
    }

    #[test]
    fn test_case_insensitivity() {
        let expr = compile("WOOD");
        assert!(expr.matches_item(&Item::new("wood", "wood"), MatchMode::Exact));
        assert!(compile("quality~GOLD").matches_item(
            &Item::new("melon", "Melon").with_quality(Quality::Gold),
            MatchMode::Exact
        ));
    }
}
