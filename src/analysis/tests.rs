use proptest::prelude::*;

use super::*;
use crate::{
    parser::parse,
    relation,
    relation::{Pair, Relation},
};

fn arb_relation() -> impl Strategy<Value = Relation> {
    prop::collection::vec((0u8..6, 0u8..6), 0..24).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(a, b)| Pair::new(a.to_string(), b.to_string()))
            .collect()
    })
}

fn chain(len: usize) -> Relation {
    (1..len)
        .map(|i| Pair::new(i.to_string(), (i + 1).to_string()))
        .collect()
}

#[test]
fn missing_shortcut_breaks_transitivity() {
    let report = parse("(1,2), (2,3)").unwrap().analyze();

    assert_eq!(
        report.properties,
        Properties {
            reflexive: false,
            symmetric: false,
            antisymmetric: true,
            transitive: false,
            equivalence: false,
        }
    );
    similar_asserts::assert_eq!(
        report.transitive_closure,
        parse("(1,2),(2,3),(1,3)").unwrap()
    );

    insta::assert_snapshot!(report.to_string(), @r"
Elements: { 1, 2, 3 }

Reflexive: No
Symmetric: No
Antisymmetric: Yes
Transitive: No

This is NOT an equivalence relation.

Reflexive Closure: { (1,2), (2,3), (1,1), (2,2), (3,3) }
Symmetric Closure: { (1,2), (2,3), (2,1), (3,2) }
Transitive Closure: { (1,2), (2,3), (1,3) }
");
}

#[test]
fn two_element_equivalence() {
    let report = relation!((a, a), (b, b), (a, b), (b, a)).unwrap().analyze();

    assert!(report.properties.reflexive);
    assert!(report.properties.symmetric);
    assert!(!report.properties.antisymmetric);
    assert!(report.properties.transitive);
    assert!(report.is_equivalence());

    insta::assert_snapshot!(
        report.transitive_closure.to_string(),
        @"{ (a,a), (b,b), (a,b), (b,a) }"
    );
}

#[test]
fn empty_relation_is_vacuously_everything() {
    let report = parse("").unwrap().analyze();

    assert_eq!(
        report.properties,
        Properties {
            reflexive: true,
            symmetric: true,
            antisymmetric: true,
            transitive: true,
            equivalence: true,
        }
    );
    assert!(report.elements.is_empty());
    assert!(report.reflexive_closure.is_empty());
    assert!(report.symmetric_closure.is_empty());
    assert!(report.transitive_closure.is_empty());
    insta::assert_snapshot!(report.transitive_closure.to_string(), @"{  }");
}

#[test]
fn single_pair() {
    let r = parse("(x,y)").unwrap();
    let props = r.properties();

    assert!(props.antisymmetric);
    assert!(!props.symmetric);
    assert!(!props.reflexive);
    assert!(props.transitive);
    insta::assert_snapshot!(
        r.reflexive_closure().to_string(),
        @"{ (x,y), (x,x), (y,y) }"
    );
}

#[test]
fn self_loop_only() {
    let props = parse("(a,a)").unwrap().properties();
    assert!(props.reflexive && props.symmetric && props.antisymmetric && props.transitive);
    assert!(props.equivalence);
}

#[test]
fn disconnected_components() {
    let r = parse("(a,b), (c,d)").unwrap();
    let props = r.properties();
    assert!(props.transitive);
    assert!(props.antisymmetric);
    assert_eq!(r.transitive_closure(), r);
}

#[test]
fn cycle_closes_into_loops() {
    let r = parse("(a,b), (b,a)").unwrap();
    assert!(!r.properties().transitive);

    let closure = r.transitive_closure();
    similar_asserts::assert_eq!(closure, parse("(a,b),(b,a),(a,a),(b,b)").unwrap());
    assert_eq!(transitive_closure_warshall(&r), closure);
}

#[test]
fn three_cycle_becomes_complete() {
    let closure = parse("(1,2), (2,3), (3,1)").unwrap().transitive_closure();
    assert_eq!(closure.len(), 9);
    assert!(closure.properties().transitive);
}

#[test]
fn long_chain() {
    let r = chain(20);
    let closure = r.transitive_closure();
    // every i < j
    assert_eq!(closure.len(), 19 * 20 / 2);
    assert_eq!(closure, transitive_closure_warshall(&r));
}

#[test]
fn antisymmetry_ignores_loops() {
    assert!(is_antisymmetric(&parse("(a,a), (a,b)").unwrap()));
    assert!(!is_antisymmetric(&parse("(a,b), (b,a)").unwrap()));
}

#[test]
fn symmetric_closure_adds_each_reverse_once() {
    let r = parse("(a,b), (b,c), (c,b)").unwrap();
    let closure = r.symmetric_closure();
    insta::assert_snapshot!(closure.to_string(), @"{ (a,b), (b,c), (c,b), (b,a) }");
    assert!(is_symmetric(&closure));
}

#[test]
fn report_json_shape() {
    let report = parse("(p,q)").unwrap().analyze();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["reflexive"], false);
    assert_eq!(json["antisymmetric"], true);
    assert_eq!(json["elements"], serde_json::json!(["p", "q"]));
    assert_eq!(json["transitive_closure"]["pairs"][0]["source"], "p");

    let back: Report = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

proptest! {
    #[test]
    fn closures_are_idempotent(r in arb_relation()) {
        let refl = reflexive_closure(&r);
        let sym = symmetric_closure(&r);
        let trans = transitive_closure(&r);
        prop_assert_eq!(reflexive_closure(&refl), refl);
        prop_assert_eq!(symmetric_closure(&sym), sym);
        prop_assert_eq!(transitive_closure(&trans), trans);
    }

    #[test]
    fn closures_extend_their_input(r in arb_relation()) {
        prop_assert!(r.is_subset(&reflexive_closure(&r)));
        prop_assert!(r.is_subset(&symmetric_closure(&r)));
        prop_assert!(r.is_subset(&transitive_closure(&r)));
    }

    #[test]
    fn closures_have_their_property(r in arb_relation()) {
        prop_assert!(is_reflexive(&reflexive_closure(&r)));
        prop_assert!(is_symmetric(&symmetric_closure(&r)));
        prop_assert!(is_transitive(&transitive_closure(&r)));
    }

    #[test]
    fn closures_keep_the_carrier(r in arb_relation()) {
        let closures = [reflexive_closure(&r), symmetric_closure(&r), transitive_closure(&r)];
        for closure in &closures {
            prop_assert_eq!(closure.carrier(), r.carrier());
        }
    }

    #[test]
    fn fixpoint_matches_warshall(r in arb_relation()) {
        prop_assert_eq!(transitive_closure(&r), transitive_closure_warshall(&r));
    }

    #[test]
    fn transitive_closure_is_smallest(r in arb_relation()) {
        // dropping any derived pair breaks transitivity
        let closure = transitive_closure(&r);
        for extra in closure.iter().filter(|p| !r.contains_pair(p)) {
            let smaller: Relation = closure.iter().filter(|p| *p != extra).cloned().collect();
            prop_assert!(!is_transitive(&smaller));
        }
    }

    #[test]
    fn equivalence_is_conjunction(r in arb_relation()) {
        let p = r.properties();
        prop_assert_eq!(p.equivalence, p.reflexive && p.symmetric && p.transitive);
    }

    #[test]
    fn display_round_trips(r in arb_relation()) {
        match parse(&r.to_string()) {
            Ok(back) => prop_assert_eq!(back, r),
            Err(err) => prop_assert!(r.is_empty() && err.is_malformed()),
        }
    }
}
