//! # Relations over symbolic elements
//!
//! A [`Relation`] is a set of ordered [`Pair`]s together with its *carrier*: the
//! elements that occur as the source or target of at least one pair. The carrier
//! is never supplied on its own; it is grown in lock-step with the pair set, so an
//! element that appears in no pair does not exist as far as the relation is
//! concerned.
//!
//! Both sets keep first-seen order. Order carries no meaning for membership or
//! equality, but it makes every rendering (text, DOT, SVG) deterministic.
//!
//! ```rust
//! use relgraph::relation::{Pair, Relation};
//!
//! let r: Relation = [Pair::new("1", "2"), Pair::new("2", "3")].into_iter().collect();
//! assert_eq!(r.to_string(), "{ (1,2), (2,3) }");
//! assert_eq!(r.elements_display(), "{ 1, 2, 3 }");
//! assert!(r.contains(&"1".into(), &"2".into()));
//! ```

use std::fmt::{self, Display};

use derive_more::{Display, From};
use indexmap::{Equivalent, IndexMap, IndexSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An opaque identifier. Equality is exact token equality, no normalisation.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct Element(String);

impl Element {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element(value.to_owned())
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered pair `(source, target)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub source: Element,
    pub target: Element,
}

impl Pair {
    pub fn new(source: impl Into<Element>, target: impl Into<Element>) -> Self {
        Pair {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The pair `(x,x)`.
    pub fn identity(element: Element) -> Self {
        Pair {
            source: element.clone(),
            target: element,
        }
    }

    pub fn reversed(&self) -> Self {
        Pair {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.source, self.target)
    }
}

/// Borrowed lookup key for a [`Pair`]; hashes exactly like the owned pair.
#[derive(Hash)]
struct PairRef<'a>(&'a Element, &'a Element);

impl Equivalent<Pair> for PairRef<'_> {
    fn equivalent(&self, key: &Pair) -> bool {
        *self.0 == key.source && *self.1 == key.target
    }
}

/// A finite binary relation: a duplicate-free set of pairs and the carrier derived
/// from it.
///
/// Relations are built once and then only read; every closure produces a new
/// value. Equality compares the pair sets and ignores insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RelationData")]
pub struct Relation {
    pairs: IndexSet<Pair>,
    #[serde(rename = "elements")]
    carrier: IndexSet<Element>,
}

#[derive(Deserialize)]
struct RelationData {
    pairs: Vec<Pair>,
}

impl From<RelationData> for Relation {
    fn from(data: RelationData) -> Self {
        Relation::from_pairs(data.pairs)
    }
}

impl Relation {
    pub fn new() -> Self {
        Relation::default()
    }

    pub fn from_pairs<I: IntoIterator<Item = Pair>>(pairs: I) -> Self {
        let mut relation = Relation::new();
        relation.extend(pairs);
        relation
    }

    /// Inserts a pair, growing the carrier with any element seen for the first
    /// time. Returns `false` if the pair was already present.
    pub(crate) fn insert(&mut self, pair: Pair) -> bool {
        if self.pairs.contains(&pair) {
            return false;
        }
        if !self.carrier.contains(&pair.source) {
            self.carrier.insert(pair.source.clone());
        }
        if !self.carrier.contains(&pair.target) {
            self.carrier.insert(pair.target.clone());
        }
        self.pairs.insert(pair)
    }

    pub(crate) fn extend<I: IntoIterator<Item = Pair>>(&mut self, pairs: I) {
        for pair in pairs {
            self.insert(pair);
        }
    }

    pub fn pairs(&self) -> &IndexSet<Pair> {
        &self.pairs
    }

    /// The elements mentioned by at least one pair, in first-seen order.
    pub fn carrier(&self) -> &IndexSet<Element> {
        &self.carrier
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Pair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn n_elements(&self) -> usize {
        self.carrier.len()
    }

    pub fn contains(&self, source: &Element, target: &Element) -> bool {
        self.pairs.contains(&PairRef(source, target))
    }

    pub fn contains_pair(&self, pair: &Pair) -> bool {
        self.pairs.contains(pair)
    }

    /// Maps every source element to the ordered set of its targets.
    ///
    /// Elements that are never a source have no entry.
    pub fn successors(&self) -> IndexMap<&Element, IndexSet<&Element>> {
        let mut map: IndexMap<&Element, IndexSet<&Element>> = IndexMap::new();
        for pair in &self.pairs {
            map.entry(&pair.source).or_default().insert(&pair.target);
        }
        map
    }

    /// `true` if the reverse of `pair` is also in the relation.
    pub fn has_reverse(&self, pair: &Pair) -> bool {
        self.contains(&pair.target, &pair.source)
    }

    /// `true` if every pair of `self` is also a pair of `other`.
    pub fn is_subset(&self, other: &Relation) -> bool {
        self.pairs.is_subset(&other.pairs)
    }

    /// Renders the carrier as `{ a, b, c }`.
    pub fn elements_display(&self) -> String {
        format!("{{ {} }}", self.carrier.iter().join(", "))
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} }}", self.pairs.iter().join(", "))
    }
}

impl FromIterator<Pair> for Relation {
    fn from_iter<T: IntoIterator<Item = Pair>>(iter: T) -> Self {
        Relation::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a Pair;
    type IntoIter = indexmap::set::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Relation {
        Relation::from_pairs([Pair::new("b", "c"), Pair::new("a", "b")])
    }

    #[test]
    fn carrier_follows_first_seen_order() {
        let r = chain();
        let carrier: Vec<_> = r.carrier().iter().map(Element::as_str).collect();
        assert_eq!(carrier, ["b", "c", "a"]);
    }

    #[test]
    fn duplicates_collapse() {
        let r = Relation::from_pairs([
            Pair::new("x", "y"),
            Pair::new("x", "y"),
            Pair::new("y", "x"),
        ]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.n_elements(), 2);
    }

    #[test]
    fn equality_ignores_order() {
        let a = chain();
        let b = Relation::from_pairs([Pair::new("a", "b"), Pair::new("b", "c")]);
        assert_eq!(a, b);
        assert_ne!(a, Relation::from_pairs([Pair::new("a", "b")]));
    }

    #[test]
    fn tokens_are_case_sensitive() {
        let r = Relation::from_pairs([Pair::new("a", "A")]);
        assert_eq!(r.n_elements(), 2);
        assert!(!r.contains(&"A".into(), &"a".into()));
        assert!(r.contains(&"a".into(), &"A".into()));
    }

    #[test]
    fn successors_group_by_source() {
        let r = Relation::from_pairs([
            Pair::new("1", "2"),
            Pair::new("1", "3"),
            Pair::new("2", "3"),
        ]);
        let succ = r.successors();
        assert_eq!(succ.len(), 2);
        assert_eq!(succ[&Element::from("1")].len(), 2);
        assert!(!succ.contains_key(&Element::from("3")));
    }

    #[test]
    fn display_set_notation() {
        assert_eq!(Relation::new().to_string(), "{  }");
        assert_eq!(chain().to_string(), "{ (b,c), (a,b) }");
        assert_eq!(Relation::new().elements_display(), "{  }");
    }

    #[test]
    fn pair_helpers() {
        let p = Pair::new("a", "b");
        assert_eq!(p.reversed(), Pair::new("b", "a"));
        assert!(!p.is_loop());
        assert!(Pair::identity("a".into()).is_loop());
    }

    #[test]
    fn json_rederives_carrier() {
        let r = chain();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"pairs":[{"source":"b","target":"c"},{"source":"a","target":"b"}],"elements":["b","c","a"]}"#
        );

        let back: Relation =
            serde_json::from_str(r#"{"pairs":[{"source":"p","target":"q"}],"elements":["zzz"]}"#)
                .unwrap();
        assert_eq!(back.n_elements(), 2);
        assert!(back.carrier().contains(&Element::from("q")));
    }
}
