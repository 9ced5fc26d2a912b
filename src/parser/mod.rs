//! # Pair Notation Parser
//!
//! Turns free text containing pairs such as `(1,2), (a, b)` into a [`Relation`].
//!
//! The grammar (see `relation.pest`) scans the input left to right and picks up
//! every non-overlapping `(x,y)` group, where `x` and `y` are ASCII alphanumeric
//! tokens and whitespace may surround either token. Everything outside a group is
//! skipped, so the set notation produced by [`Relation`]'s `Display` impl parses
//! back into the same relation.
//!
//! Tokens stay opaque: `01` and `1` are different elements and nothing is ever
//! read as a number.
//!
//! - Blank input is the empty relation.
//! - Non-blank input without a single pair is [`ParseError::MalformedInput`].
//! - [`parse_with_limits`] also rejects relations whose carrier is larger than
//!   [`Limits::max_elements`].
//!
//! ```rust
//! use relgraph::parser::parse;
//!
//! let r = parse("(1,2), ( 2 , 3 )").unwrap();
//! assert_eq!(r.to_string(), "{ (1,2), (2,3) }");
//! assert!(parse("not a relation").unwrap_err().is_malformed());
//! ```

use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::relation::{Element, Pair, Relation};

pub mod error;

pub use error::ParseError;

#[derive(Parser)]
#[grammar = "parser/relation.pest"]
struct PairGrammar;

/// Upper bounds applied while parsing untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest carrier accepted; `None` disables the check.
    pub max_elements: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_elements: Some(256),
        }
    }
}

impl Limits {
    pub fn unbounded() -> Self {
        Limits { max_elements: None }
    }

    pub fn check(&self, relation: &Relation) -> Result<(), ParseError> {
        match self.max_elements {
            Some(limit) if relation.n_elements() > limit => Err(ParseError::TooManyElements {
                count: relation.n_elements(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Extracts every pair of `text`. Duplicate pairs collapse.
pub fn parse(text: &str) -> Result<Relation, ParseError> {
    let parsed = PairGrammar::parse(Rule::relation, text).map_err(Box::new)?;

    let mut relation = Relation::new();
    let mut found = 0usize;
    for pair in parsed.flatten().filter(|p| p.as_rule() == Rule::pair) {
        let mut tokens = pair.into_inner().map(|t| Element::from(t.as_str()));
        if let (Some(source), Some(target)) = (tokens.next(), tokens.next()) {
            found += 1;
            relation.insert(Pair { source, target });
        }
    }

    if found == 0 && !text.trim().is_empty() {
        return Err(ParseError::MalformedInput);
    }

    debug!(
        pairs = relation.len(),
        duplicates = found - relation.len(),
        elements = relation.n_elements(),
        "parsed relation"
    );
    Ok(relation)
}

/// Like [`parse`], but refuses relations that exceed `limits`.
pub fn parse_with_limits(text: &str, limits: &Limits) -> Result<Relation, ParseError> {
    let relation = parse(text)?;
    limits.check(&relation)?;
    Ok(relation)
}

/// Parses the pair notation written inline, for tests and quick experiments.
///
/// ```rust
/// let r = relgraph::relation!((a, b), (b, a)).unwrap();
/// assert_eq!(r.len(), 2);
/// ```
#[macro_export]
macro_rules! relation {
    ($($t:tt)*) => {
        $crate::parser::parse(stringify!($($t)*))
    };
}
