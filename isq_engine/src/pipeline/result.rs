use crate::grammar::ast::nodes::Expression;
use crate::lexical::LexicalMetrics;
use crate::matching::{Container, Item, MatchMode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Duration;

/// A compiled query: the expression tree plus compilation metadata
#[derive(Debug, Clone, Serialize)]
pub struct CompiledQuery {
    /// The original query text
    pub query: String,
    /// The compiled expression tree
    pub expression: Expression,
    /// When compilation completed
    pub compiled_at: DateTime<Utc>,
    /// Whether this is a fallback filter standing in for a failed parse
    pub is_fallback: bool,
    /// Token distribution from the lexical stage
    #[serde(skip)]
    pub lexical_metrics: LexicalMetrics,
    /// Total compilation time
    #[serde(skip)]
    pub compile_duration: Duration,
}

impl CompiledQuery {
    pub fn new(
        query: &str,
        expression: Expression,
        lexical_metrics: LexicalMetrics,
        compile_duration: Duration,
    ) -> Self {
        Self {
            query: query.to_string(),
            expression,
            compiled_at: Utc::now(),
            is_fallback: false,
            lexical_metrics,
            compile_duration,
        }
    }

    /// Create the always-matching fallback for an unparsable query
    pub fn fallback(query: &str) -> Self {
        Self {
            query: query.to_string(),
            expression: Expression::match_all(),
            compiled_at: Utc::now(),
            is_fallback: true,
            lexical_metrics: LexicalMetrics::default(),
            compile_duration: Duration::ZERO,
        }
    }

    // === MATCHING OPERATIONS ===

    pub fn matches_item(&self, item: &Item, mode: MatchMode) -> bool {
        self.expression.matches_item(item, mode)
    }

    pub fn matches_container(&self, container: &Container, mode: MatchMode) -> bool {
        self.expression.matches_container(container, mode)
    }

    pub fn matches_text(&self, text: &str, mode: MatchMode) -> bool {
        self.expression.matches_text(text, mode)
    }

    // === SORTING OPERATIONS ===

    pub fn compare_items(&self, a: &Item, b: &Item, mode: MatchMode) -> Ordering {
        self.expression.compare_items(a, b, mode)
    }

    pub fn sort_items(&self, items: &mut [Item], mode: MatchMode) {
        self.expression.sort_items(items, mode)
    }

    /// Filter items in place, keeping exact matches
    pub fn filter_items(&self, items: &mut Vec<Item>) {
        items.retain(|item| self.matches_item(item, MatchMode::Exact));
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::QUERY_COMPILATION_SUCCESS,
            "Query compilation succeeded",
            "nodes" => self.expression.node_count(),
            "depth" => self.expression.depth(),
            "tokens" => self.lexical_metrics.total_tokens,
            "duration_us" => self.compile_duration.as_micros()
        );
    }
}
