//! Random example relations, for trying the tool out.
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use relgraph::example::{generate_example, ExampleKind};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let text = generate_example(ExampleKind::Checker, &mut rng);
//! assert!(relgraph::parser::parse(&text).is_ok());
//! ```

use clap::ValueEnum;
use indexmap::IndexSet;
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::relation::Pair;

/// Which alphabet the example draws its elements from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    /// Elements `1` to `5`.
    #[default]
    Checker,
    /// Elements `A` to `E`.
    Graph,
}

impl ExampleKind {
    pub fn alphabet(self) -> [&'static str; 5] {
        match self {
            ExampleKind::Checker => ["1", "2", "3", "4", "5"],
            ExampleKind::Graph => ["A", "B", "C", "D", "E"],
        }
    }
}

/// Draws a random relation over 3 to 5 elements and writes it in pair notation.
///
/// The number of distinct pairs aimed for is the element count plus up to four,
/// never more than the `n²` pairs that exist.
pub fn generate_example<R: Rng + ?Sized>(kind: ExampleKind, rng: &mut R) -> String {
    let alphabet = kind.alphabet();
    let n = rng.gen_range(3..=5);
    let active = &alphabet[..n];
    let wanted = (n + rng.gen_range(0..5)).min(n * n);

    let mut pairs = IndexSet::new();
    while pairs.len() < wanted {
        if let (Some(a), Some(b)) = (active.choose(rng), active.choose(rng)) {
            pairs.insert(Pair::new(*a, *b));
        }
    }

    pairs.iter().join(", ")
}
