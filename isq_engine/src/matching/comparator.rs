//! Sort-comparator view of a compiled expression
//!
//! Items matching the expression order before items that do not. Ties keep
//! the collection's original relative order, which requires a stable sort.

use crate::grammar::ast::nodes::Expression;
use crate::matching::evaluator::MatchMode;
use crate::matching::item::Item;
use std::cmp::Ordering;

impl Expression {
    /// Compare two items: matching items order before non-matching ones
    pub fn compare_items(&self, a: &Item, b: &Item, mode: MatchMode) -> Ordering {
        let a_matches = self.matches_item(a, mode);
        let b_matches = self.matches_item(b, mode);
        // true sorts before false
        b_matches.cmp(&a_matches)
    }

    /// Stable-sort items so that matching ones come first
    pub fn sort_items(&self, items: &mut [Item], mode: MatchMode) {
        items.sort_by(|a, b| self.compare_items(a, b, mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_query;
    use crate::syntax::parse_query_tokens;

    fn compile(query: &str) -> Expression {
        parse_query_tokens(tokenize_query(query).unwrap()).unwrap()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_matching_items_sort_first() {
        let expr = compile("wood");
        let mut items = vec![
            Item::new("stone", "Stone"),
            Item::new("wood_door", "Wood Door"),
            Item::new("iron_bar", "Iron Bar"),
            Item::new("wood_plank", "Wood Plank"),
        ];
        expr.sort_items(&mut items, MatchMode::Partial);
        assert_eq!(names(&items), ["wood_door", "wood_plank", "stone", "iron_bar"]);
    }

    #[test]
    fn test_sort_is_stable_within_groups() {
        let expr = compile("wood");
        let mut items = vec![
            Item::new("stone_a", "Stone"),
            Item::new("stone_b", "Stone"),
            Item::new("wood_a", "Wood"),
            Item::new("wood_b", "Wood"),
        ];
        expr.sort_items(&mut items, MatchMode::Partial);
        assert_eq!(names(&items), ["wood_a", "wood_b", "stone_a", "stone_b"]);
    }

    #[test]
    fn test_match_all_expression_keeps_original_order() {
        let expr = Expression::match_all();
        let mut items = vec![
            Item::new("c", "C"),
            Item::new("a", "A"),
            Item::new("b", "B"),
        ];
        expr.sort_items(&mut items, MatchMode::Exact);
        assert_eq!(names(&items), ["c", "a", "b"]);
    }

    #[test]
    fn test_comparator_ordering_values() {
        let expr = compile("wood");
        let wood = Item::new("wood", "Wood");
        let stone = Item::new("stone", "Stone");

        assert_eq!(
            expr.compare_items(&wood, &stone, MatchMode::Exact),
            Ordering::Less
        );
        assert_eq!(
            expr.compare_items(&stone, &wood, MatchMode::Exact),
            Ordering::Greater
        );
        assert_eq!(
            expr.compare_items(&wood, &wood, MatchMode::Exact),
            Ordering::Equal
        );
    }
}
