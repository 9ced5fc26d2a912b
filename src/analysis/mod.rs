//! # Relation Analysis
//!
//! Decides the four classic properties of a [`Relation`] and computes its three
//! closures.
//!
//! ## Properties
//!
//! With `R` the pair set and `E` the carrier:
//!
//! - **reflexive**: `(x,x) ∈ R` for every `x ∈ E`
//! - **symmetric**: `(a,b) ∈ R ⇒ (b,a) ∈ R`
//! - **antisymmetric**: `(a,b) ∈ R ∧ a ≠ b ⇒ (b,a) ∉ R`
//! - **transitive**: `(a,b) ∈ R ∧ (b,d) ∈ R ⇒ (a,d) ∈ R`
//!
//! A relation that is reflexive, symmetric and transitive is an equivalence
//! relation. All four predicates hold vacuously on the empty relation.
//!
//! ## Closures
//!
//! - [`reflexive_closure`]: adds `(x,x)` for each carrier element
//! - [`symmetric_closure`]: adds the reverse of every pair
//! - [`transitive_closure`]: round-based saturation until nothing new appears;
//!   [`transitive_closure_warshall`] gives the same set via a bit matrix
//!
//! Closures are supersets of their input, satisfy the property they are named
//! after, and are idempotent.
//!
//! Analysis is total: any relation the parser can build has a [`Report`].

use std::fmt::{self, Display};

use indexmap::IndexSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::relation::{Element, Relation};

pub mod closure;
pub mod properties;

pub use closure::{
    reflexive_closure, symmetric_closure, transitive_closure, transitive_closure_warshall,
};
pub use properties::{is_antisymmetric, is_reflexive, is_symmetric, is_transitive, Properties};

/// Everything known about one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub elements: IndexSet<Element>,
    #[serde(flatten)]
    pub properties: Properties,
    pub reflexive_closure: Relation,
    pub symmetric_closure: Relation,
    pub transitive_closure: Relation,
}

impl Report {
    pub fn is_equivalence(&self) -> bool {
        self.properties.equivalence
    }
}

pub fn analyze(relation: &Relation) -> Report {
    let properties = Properties::of(relation);
    debug!(
        pairs = relation.len(),
        elements = relation.n_elements(),
        ?properties,
        "analyzed relation"
    );
    Report {
        elements: relation.carrier().clone(),
        properties,
        reflexive_closure: reflexive_closure(relation),
        symmetric_closure: symmetric_closure(relation),
        transitive_closure: transitive_closure(relation),
    }
}

impl Relation {
    pub fn analyze(&self) -> Report {
        analyze(self)
    }

    pub fn properties(&self) -> Properties {
        Properties::of(self)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elements: {{ {} }}", self.elements.iter().join(", "))?;
        writeln!(f)?;

        for (name, holds) in self.properties.iter() {
            writeln!(f, "{name}: {}", if holds { "Yes" } else { "No" })?;
        }
        writeln!(f)?;

        if self.is_equivalence() {
            writeln!(f, "This relation is an equivalence relation.")?;
        } else {
            writeln!(f, "This is NOT an equivalence relation.")?;
        }
        writeln!(f)?;

        writeln!(f, "Reflexive Closure: {}", self.reflexive_closure)?;
        writeln!(f, "Symmetric Closure: {}", self.symmetric_closure)?;
        write!(f, "Transitive Closure: {}", self.transitive_closure)
    }
}

#[cfg(test)]
mod tests;
