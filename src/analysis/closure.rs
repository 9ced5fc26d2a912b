//! Reflexive, symmetric and transitive closures.
//!
//! Each closure reads its input and writes into a fresh [`Relation`]; the input
//! is never touched, so no loop ever observes pairs it is itself adding.

use ahash::AHashSet;
use bitvec::vec::BitVec;
use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::relation::{Pair, Relation};

/// `R ∪ {(x,x) : x ∈ E}`.
pub fn reflexive_closure(relation: &Relation) -> Relation {
    let mut closure = relation.clone();
    closure.extend(relation.carrier().iter().cloned().map(Pair::identity));
    closure
}

/// `R ∪ {(b,a) : (a,b) ∈ R}`, with the reverses taken from the input only.
pub fn symmetric_closure(relation: &Relation) -> Relation {
    let mut closure = relation.clone();
    closure.extend(relation.iter().map(Pair::reversed));
    closure
}

/// Smallest superset of `relation` closed under transitivity.
///
/// Saturates by rounds: each round scans every `(a,b)`, `(b,d)` of the current
/// closure and queues the missing `(a,d)`; the queue is committed only once the
/// scan is over. The first round that queues nothing is the fixpoint.
///
/// Every round but the last adds a pair and there are at most `|E|²` pairs, so
/// the loop is capped at `|E|² + 1` rounds.
pub fn transitive_closure(relation: &Relation) -> Relation {
    let carrier = relation.carrier();
    let n = carrier.len();

    let mut successors: Vec<IndexSet<usize>> = vec![IndexSet::new(); n];
    for pair in relation {
        if let (Some(a), Some(b)) = (
            carrier.get_index_of(&pair.source),
            carrier.get_index_of(&pair.target),
        ) {
            successors[a].insert(b);
        }
    }

    let mut closure = relation.clone();
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut queued: AHashSet<(usize, usize)> = AHashSet::new();
    let max_rounds = n * n + 1;

    for round in 1..=max_rounds {
        for (a, targets) in successors.iter().enumerate() {
            for &b in targets {
                for &d in &successors[b] {
                    if !targets.contains(&d) && queued.insert((a, d)) {
                        pending.push((a, d));
                    }
                }
            }
        }

        if pending.is_empty() {
            debug!(
                rounds = round,
                added = closure.len() - relation.len(),
                "transitive closure reached fixpoint"
            );
            return closure;
        }

        trace!(round, added = pending.len(), "transitive closure round");
        for (a, d) in pending.drain(..) {
            successors[a].insert(d);
            closure.insert(Pair::new(carrier[a].clone(), carrier[d].clone()));
        }
        queued.clear();
    }

    warn!(
        rounds = max_rounds,
        elements = n,
        "transitive closure stopped at the round cap before reaching a fixpoint"
    );
    closure
}

/// Same membership as [`transitive_closure`], computed with Floyd–Warshall over an
/// `|E|×|E|` bit matrix. New pairs are appended in row-major carrier order.
pub fn transitive_closure_warshall(relation: &Relation) -> Relation {
    let carrier = relation.carrier();
    let n = carrier.len();

    let mut reachable: BitVec = BitVec::repeat(false, n * n);
    for pair in relation {
        if let (Some(a), Some(b)) = (
            carrier.get_index_of(&pair.source),
            carrier.get_index_of(&pair.target),
        ) {
            reachable.set(a * n + b, true);
        }
    }

    for k in 0..n {
        for i in 0..n {
            if i == k || !reachable[i * n + k] {
                continue;
            }
            for j in 0..n {
                if reachable[k * n + j] {
                    reachable.set(i * n + j, true);
                }
            }
        }
    }

    let mut closure = relation.clone();
    for i in 0..n {
        for j in 0..n {
            if reachable[i * n + j] {
                closure.insert(Pair::new(carrier[i].clone(), carrier[j].clone()));
            }
        }
    }
    closure
}

impl Relation {
    pub fn reflexive_closure(&self) -> Relation {
        reflexive_closure(self)
    }

    pub fn symmetric_closure(&self) -> Relation {
        symmetric_closure(self)
    }

    pub fn transitive_closure(&self) -> Relation {
        transitive_closure(self)
    }
}
