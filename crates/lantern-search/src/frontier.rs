//! The unresolved region of the search space and its consumption order.

use std::collections::{HashSet, VecDeque};

use lantern_domain::{Assignment, FlagSpace, FlagValue};

/// Cartesian product over per-dimension candidate slots, lexicographic with
/// the last dimension varying fastest. Zero dimensions yield the single
/// empty assignment.
pub(crate) fn cartesian_product(slots: &[Vec<FlagValue>]) -> Vec<Assignment> {
    let mut out = Vec::new();
    let mut idx = vec![0usize; slots.len()];
    let mut done = false;
    while !done {
        out.push(Assignment::new(
            idx.iter()
                .zip(slots)
                .map(|(&i, candidates)| candidates[i].clone())
                .collect(),
        ));
        done = true;
        for dim in (0..slots.len()).rev() {
            idx[dim] += 1;
            if idx[dim] < slots[dim].len() {
                done = false;
                break;
            }
            idx[dim] = 0;
        }
    }
    out
}

fn generate_universe(space: &FlagSpace) -> Vec<Assignment> {
    let slots: Vec<Vec<FlagValue>> = space
        .dimensions()
        .iter()
        .map(|dim| {
            dim.values()
                .iter()
                .cloned()
                .map(FlagValue::Set)
                .chain(std::iter::once(FlagValue::Unset))
                .collect()
        })
        .collect();
    cartesian_product(&slots)
}

/// Tracks which assignments are still unresolved and hands them out in a
/// deterministic order: the declared priority sequence first, then
/// generation order.
pub struct Frontier {
    universe: Vec<Assignment>,
    pending: HashSet<Assignment>,
    cursor: usize,
    priority: VecDeque<Assignment>,
}

impl Frontier {
    /// Generate the full universe for `space`; everything starts pending.
    pub fn new(space: &FlagSpace) -> Self {
        let universe = generate_universe(space);
        let pending = universe.iter().cloned().collect();
        Self {
            universe,
            pending,
            cursor: 0,
            priority: space.priority().iter().cloned().collect(),
        }
    }

    /// Take the next assignment to evaluate, removing it from the pending
    /// set. Priority entries already resolved by propagation are skipped.
    pub fn pop(&mut self) -> Option<Assignment> {
        while let Some(candidate) = self.priority.pop_front() {
            if self.pending.remove(&candidate) {
                return Some(candidate);
            }
        }
        while self.cursor < self.universe.len() {
            let candidate = self.universe[self.cursor].clone();
            self.cursor += 1;
            if self.pending.remove(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Drop an assignment from the pending set. Removing an assignment that
    /// is absent is a no-op; returns whether it was present.
    pub fn remove(&mut self, assignment: &Assignment) -> bool {
        self.pending.remove(assignment)
    }

    pub fn contains(&self, assignment: &Assignment) -> bool {
        self.pending.contains(assignment)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The full universe in generation order. Generation order is also the
    /// report order, so it is stable across runs.
    pub fn universe(&self) -> &[Assignment] {
        &self.universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_domain::{Dimension, FlagSpace, OrderRelation, PriorityPattern};

    fn space(priority: Vec<PriorityPattern>) -> FlagSpace {
        FlagSpace::new(
            vec![
                Dimension::new(vec!["a1".into(), "a2".into()]),
                Dimension::new(vec!["b1".into()]),
            ],
            OrderRelation::default(),
            priority,
        )
        .unwrap()
    }

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

    #[test]
    fn test_universe_is_lexicographic_with_unset_last() {
        let frontier = Frontier::new(&space(vec![]));
        let expected = vec![
            asg(&["a1", "b1"]),
            asg(&["a1", ""]),
            asg(&["a2", "b1"]),
            asg(&["a2", ""]),
            asg(&["", "b1"]),
            asg(&["", ""]),
        ];
        assert_eq!(frontier.universe(), expected.as_slice());
    }

    #[test]
    fn test_pop_follows_generation_order_without_priority() {
        let mut frontier = Frontier::new(&space(vec![]));
        assert_eq!(frontier.pop(), Some(asg(&["a1", "b1"])));
        assert_eq!(frontier.pop(), Some(asg(&["a1", ""])));
        assert_eq!(frontier.pending_len(), 4);
    }

    #[test]
    fn test_priority_precedes_generation_order() {
        let mut frontier = Frontier::new(&space(vec![PriorityPattern::new(vec!["a2".into()])]));
        // (a2, unset) would come fifth in generation order.
        assert_eq!(frontier.pop(), Some(asg(&["a2", ""])));
        assert_eq!(frontier.pop(), Some(asg(&["a1", "b1"])));
    }

    #[test]
    fn test_stale_priority_entry_is_skipped() {
        let mut frontier = Frontier::new(&space(vec![PriorityPattern::new(vec!["a2".into()])]));
        assert!(frontier.remove(&asg(&["a2", ""])));
        // The priority head is gone; generation order takes over.
        assert_eq!(frontier.pop(), Some(asg(&["a1", "b1"])));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut frontier = Frontier::new(&space(vec![]));
        let target = asg(&["a1", "b1"]);
        assert!(frontier.remove(&target));
        assert!(!frontier.remove(&target));
        assert_eq!(frontier.pending_len(), 5);
    }

    #[test]
    fn test_pop_skips_removed_assignments() {
        let mut frontier = Frontier::new(&space(vec![]));
        frontier.remove(&asg(&["a1", "b1"]));
        frontier.remove(&asg(&["a1", ""]));
        assert_eq!(frontier.pop(), Some(asg(&["a2", "b1"])));
    }

    #[test]
    fn test_drains_to_empty() {
        let mut frontier = Frontier::new(&space(vec![]));
        let mut seen = Vec::new();
        while let Some(a) = frontier.pop() {
            seen.push(a);
        }
        assert_eq!(seen.len(), 6);
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_zero_dimensions_yield_single_empty_assignment() {
        let space = FlagSpace::new(vec![], OrderRelation::default(), vec![]).unwrap();
        let mut frontier = Frontier::new(&space);
        assert_eq!(frontier.pop(), Some(Assignment::new(vec![])));
        assert_eq!(frontier.pop(), None);
    }
}
