//! # Relgraph
//!
//! Relgraph analyses finite binary relations over symbolic elements. It reads
//! pair notation such as `(1,2), (2,3)`, decides whether the relation is
//! reflexive, symmetric, antisymmetric and transitive, and computes its
//! reflexive, symmetric and transitive closures. Relations can also be drawn as
//! directed graphs on a circular layout, as SVG or DOT.
//!
//! ```rust
//! let report = relgraph::parser::parse("(1,2), (2,3)").unwrap().analyze();
//! assert!(!report.properties.transitive);
//! assert_eq!(report.transitive_closure.to_string(), "{ (1,2), (2,3), (1,3) }");
//! ```

pub mod analysis;
pub mod config;
pub mod drawing;
pub mod example;
pub mod parser;
pub mod relation;

pub use analysis::{analyze, Properties, Report};
pub use parser::{parse, ParseError};
pub use relation::{Element, Pair, Relation};
