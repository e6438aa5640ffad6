//! AST node definitions for compiled search expressions
//!
//! The tree is immutable after parsing: evaluation never mutates nodes, so a
//! compiled expression can be shared and reused across match passes.
//!
//! Design principles:
//! - Grammar compliant: every production has a corresponding node
//! - Serde compatible: full serialization support for caching/debugging
//! - Display round-trips: rendering a tree produces a query that reparses
//!   into an equivalent tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The literal text, with surrounding quotes stripped
    pub text: String,
    /// Whether the term was quoted in the source query
    pub quoted: bool,
}

impl Term {
    /// Create a bareword term
    pub fn bareword(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    /// Create a quoted term
    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Get the literal text of this term
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// A compiled search expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// All children must match (conjunction); vacuously true when empty
    All(Vec<Expression>),
    /// At least one child must match (disjunction); vacuously false when empty
    Any(Vec<Expression>),
    /// Negation of the child expression
    Not(Box<Expression>),
    /// Attribute comparison (`attribute ~ value`)
    Comparable { attribute: String, value: Term },
    /// Literal term match
    Term(Term),
}

/// Discriminant for expression nodes, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionKind {
    All,
    Any,
    Not,
    Comparable,
    Term,
}

impl ExpressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all_group",
            Self::Any => "any_group",
            Self::Not => "negation",
            Self::Comparable => "comparable",
            Self::Term => "term",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Expression {
    /// Get the discriminant of this node
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Self::All(_) => ExpressionKind::All,
            Self::Any(_) => ExpressionKind::Any,
            Self::Not(_) => ExpressionKind::Not,
            Self::Comparable { .. } => ExpressionKind::Comparable,
            Self::Term(_) => ExpressionKind::Term,
        }
    }

    /// An expression that matches everything
    pub fn match_all() -> Self {
        Self::All(Vec::new())
    }

    /// Check whether this expression matches everything unconditionally
    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::All(children) if children.is_empty())
    }

    /// Count the nodes in this expression tree
    pub fn node_count(&self) -> usize {
        1 + match self {
            Self::All(children) | Self::Any(children) => {
                children.iter().map(Expression::node_count).sum()
            }
            Self::Not(child) => child.node_count(),
            Self::Comparable { .. } | Self::Term(_) => 0,
        }
    }

    /// Maximum nesting depth of this expression tree
    pub fn depth(&self) -> usize {
        1 + match self {
            Self::All(children) | Self::Any(children) => {
                children.iter().map(Expression::depth).max().unwrap_or(0)
            }
            Self::Not(child) => child.depth(),
            Self::Comparable { .. } | Self::Term(_) => 0,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Expression]) -> fmt::Result {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", child)?;
            }
            Ok(())
        }

        match self {
            Self::All(children) => {
                write!(f, "(")?;
                join(f, children)?;
                write!(f, ")")
            }
            Self::Any(children) => {
                write!(f, "[")?;
                join(f, children)?;
                write!(f, "]")
            }
            Self::Not(child) => write!(f, "!{}", child),
            Self::Comparable { attribute, value } => write!(f, "{}~{}", attribute, value),
            Self::Term(term) => write!(f, "{}", term),
        }
    }
}
