//! Verdict propagation across the declared order relation.
//!
//! Verification is monotonic downward: anything at least as weakly
//! constrained as a verified point also verifies. Falsification is monotonic
//! upward: anything at least as strongly constrained as a falsified point
//! also fails. Propagation follows the relation one hop per invocation.

use lantern_domain::{Assignment, FlagSpace, FlagValue};

use crate::frontier::cartesian_product;

fn push_unique(values: &mut Vec<FlagValue>, value: FlagValue) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Assignments whose verdict follows from `queried` being verified
/// (`verified == true`) or falsified (`verified == false`), excluding
/// `queried` itself.
///
/// Per dimension, the acceptable replacements are:
/// - verified, explicit value: the value itself, everything declared weaker,
///   and unset;
/// - verified, unset: only unset (nothing is weaker than unset);
/// - falsified, explicit value: the value itself and everything declared
///   stronger;
/// - falsified, unset: the dimension's entire candidate universe — unset
///   carries no pruning direction, so that dimension stays unconstrained.
pub fn implied_assignments(
    queried: &Assignment,
    verified: bool,
    space: &FlagSpace,
) -> Vec<Assignment> {
    let relation = space.relation();
    let mut slots: Vec<Vec<FlagValue>> = Vec::with_capacity(queried.len());

    for (dim, value) in queried.values().iter().enumerate() {
        let mut acceptable: Vec<FlagValue> = Vec::new();
        match (verified, value) {
            (true, FlagValue::Unset) => acceptable.push(FlagValue::Unset),
            (true, FlagValue::Set(name)) => {
                acceptable.push(FlagValue::set(name.clone()));
                for weak in relation.weaker_than(name) {
                    push_unique(&mut acceptable, FlagValue::set(weak));
                }
                push_unique(&mut acceptable, FlagValue::Unset);
            }
            (false, FlagValue::Unset) => {
                for candidate in space.dimensions()[dim].values() {
                    acceptable.push(FlagValue::set(candidate.clone()));
                }
                acceptable.push(FlagValue::Unset);
            }
            (false, FlagValue::Set(name)) => {
                acceptable.push(FlagValue::set(name.clone()));
                for strong in relation.stronger_than(name) {
                    push_unique(&mut acceptable, FlagValue::set(strong));
                }
            }
        }
        slots.push(acceptable);
    }

    let mut implied = cartesian_product(&slots);
    implied.retain(|candidate| candidate != queried);
    implied
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_domain::{Dimension, OrderRelation};

    fn asg(values: &[&str]) -> Assignment {
        Assignment::new(
            values
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        FlagValue::Unset
                    } else {
                        FlagValue::set(*v)
                    }
                })
                .collect(),
        )
    }

    fn space(pairs: &[(&str, &str)]) -> FlagSpace {
        FlagSpace::new(
            vec![
                Dimension::new(vec!["a1".into(), "a2".into()]),
                Dimension::new(vec!["b1".into()]),
            ],
            OrderRelation::new(
                pairs
                    .iter()
                    .map(|(s, w)| (s.to_string(), w.to_string()))
                    .collect(),
            ),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_verified_weakens_along_relation_and_to_unset() {
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["a1", "b1"]), true, &space);
        // A: {a1, a2, unset} x B: {b1, unset}, minus the queried point.
        assert_eq!(implied.len(), 5);
        assert!(implied.contains(&asg(&["a2", "b1"])));
        assert!(implied.contains(&asg(&["a1", ""])));
        assert!(implied.contains(&asg(&["a2", ""])));
        assert!(implied.contains(&asg(&["", "b1"])));
        assert!(implied.contains(&asg(&["", ""])));
        assert!(!implied.contains(&asg(&["a1", "b1"])));
    }

    #[test]
    fn test_verified_without_relation_still_weakens_to_unset() {
        let space = space(&[]);
        let implied = implied_assignments(&asg(&["a2", "b1"]), true, &space);
        assert_eq!(implied.len(), 3);
        assert!(implied.contains(&asg(&["a2", ""])));
        assert!(implied.contains(&asg(&["", "b1"])));
        assert!(implied.contains(&asg(&["", ""])));
    }

    #[test]
    fn test_verified_unset_dimension_stays_unset() {
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["", "b1"]), true, &space);
        // Nothing is weaker than unset in A; only B weakens.
        assert_eq!(implied, vec![asg(&["", ""])]);
    }

    #[test]
    fn test_falsified_strengthens_along_relation_only() {
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["a2", "b1"]), false, &space);
        // A: {a2, a1}, B: {b1} (no stronger value, no unset).
        assert_eq!(implied, vec![asg(&["a1", "b1"])]);
    }

    #[test]
    fn test_falsified_top_value_implies_nothing() {
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["a1", "b1"]), false, &space);
        assert!(implied.is_empty());
    }

    #[test]
    fn test_falsified_unset_dimension_expands_to_whole_dimension() {
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["", "b1"]), false, &space);
        // A is unconstrained: {a1, a2, unset}; B: {b1}. Minus the query.
        assert_eq!(implied.len(), 2);
        assert!(implied.contains(&asg(&["a1", "b1"])));
        assert!(implied.contains(&asg(&["a2", "b1"])));
    }

    #[test]
    fn test_fully_unset_falsified_implies_nothing_new() {
        // Every dimension expands to its whole universe; the product is the
        // whole space, which is exactly what remains unresolved anyway.
        let space = space(&[("a1", "a2")]);
        let implied = implied_assignments(&asg(&["", ""]), false, &space);
        assert_eq!(implied.len(), 5);
    }

    #[test]
    fn test_duplicate_relation_pairs_do_not_duplicate_implications() {
        let space = space(&[("a1", "a2"), ("a1", "a2")]);
        let implied = implied_assignments(&asg(&["a1", ""]), true, &space);
        let hits = implied.iter().filter(|a| **a == asg(&["a2", ""])).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_one_hop_only() {
        // a1 → a2 → a3 declared; verifying a1 reaches a2 but not a3.
        let space = FlagSpace::new(
            vec![Dimension::new(vec!["a1".into(), "a2".into(), "a3".into()])],
            OrderRelation::new(vec![
                ("a1".into(), "a2".into()),
                ("a2".into(), "a3".into()),
            ]),
            vec![],
        )
        .unwrap();
        let implied = implied_assignments(&asg(&["a1"]), true, &space);
        assert!(implied.contains(&asg(&["a2"])));
        assert!(implied.contains(&asg(&[""])));
        assert!(!implied.contains(&asg(&["a3"])));
    }
}
