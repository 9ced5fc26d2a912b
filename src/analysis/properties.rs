use serde::{Deserialize, Serialize};

use crate::relation::Relation;

/// The four properties of a relation, plus the equivalence verdict derived from
/// them.
///
/// Every predicate is vacuously true on the empty relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub reflexive: bool,
    pub symmetric: bool,
    pub antisymmetric: bool,
    pub transitive: bool,
    /// `reflexive && symmetric && transitive`; antisymmetry plays no part.
    pub equivalence: bool,
}

impl Properties {
    pub fn of(relation: &Relation) -> Self {
        let reflexive = is_reflexive(relation);
        let symmetric = is_symmetric(relation);
        let transitive = is_transitive(relation);
        Properties {
            reflexive,
            symmetric,
            antisymmetric: is_antisymmetric(relation),
            transitive,
            equivalence: reflexive && symmetric && transitive,
        }
    }

    /// Name and value of each of the four properties, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("Reflexive", self.reflexive),
            ("Symmetric", self.symmetric),
            ("Antisymmetric", self.antisymmetric),
            ("Transitive", self.transitive),
        ]
        .into_iter()
    }
}

/// Every element of the carrier is related to itself.
pub fn is_reflexive(relation: &Relation) -> bool {
    relation.carrier().iter().all(|x| relation.contains(x, x))
}

/// Every pair has its reverse.
pub fn is_symmetric(relation: &Relation) -> bool {
    relation.iter().all(|p| relation.has_reverse(p))
}

/// No two distinct elements are related both ways. Loops never count.
pub fn is_antisymmetric(relation: &Relation) -> bool {
    relation
        .iter()
        .all(|p| p.is_loop() || !relation.has_reverse(p))
}

/// `(a,b)` and `(b,d)` always imply `(a,d)`. Stops at the first missing pair.
pub fn is_transitive(relation: &Relation) -> bool {
    let successors = relation.successors();
    relation.iter().all(|ab| {
        successors
            .get(&ab.target)
            .map_or(true, |ds| ds.iter().all(|d| relation.contains(&ab.source, d)))
    })
}
