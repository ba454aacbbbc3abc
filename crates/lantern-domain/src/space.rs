use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::value::{Assignment, FlagValue};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("order relation contains a cycle through '{value}'")]
    CyclicRelation { value: String },

    #[error("priority entry names unknown flag '{flag}'")]
    UnknownPriorityFlag { flag: String },
}

/// One axis of the configuration space: its explicit candidate values, in
/// declared order. The unset sentinel is implicit and not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension {
    values: Vec<String>,
}

impl Dimension {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Declared (strong, weak) pairs between explicit flag values.
///
/// "Strong" is at least as constraining as "weak": a verified run still
/// verifies after weakening, a falsified run still fails after
/// strengthening. Pairs may cross dimensions; the relation need not be
/// total and no transitive closure is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRelation {
    pairs: Vec<(String, String)>,
}

impl OrderRelation {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Values declared weaker than `value` (one hop).
    pub fn weaker_than<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(strong, _)| strong == value)
            .map(|(_, weak)| weak.as_str())
    }

    /// Values declared stronger than `value` (one hop).
    pub fn stronger_than<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(_, weak)| weak == value)
            .map(|(strong, _)| strong.as_str())
    }

    /// Reject relations whose strong→weak edges form a cycle. A cycle would
    /// let propagation claim contradictory verdicts for one assignment.
    fn check_acyclic(&self) -> Result<(), DomainError> {
        let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
        for (strong, weak) in &self.pairs {
            edges.entry(strong.as_str()).or_default().push(weak.as_str());
        }

        // Iterative DFS with an explicit on-path set.
        let mut done: HashSet<&str> = HashSet::new();
        for start in edges.keys().copied() {
            if done.contains(start) {
                continue;
            }
            let mut on_path: HashSet<&str> = HashSet::new();
            // (node, next child index) pairs form the DFS stack.
            let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
            on_path.insert(start);
            while let Some((node, child)) = stack.pop() {
                let next = edges
                    .get(node)
                    .and_then(|succs| succs.get(child))
                    .copied();
                match next {
                    Some(succ) => {
                        stack.push((node, child + 1));
                        if on_path.contains(succ) {
                            return Err(DomainError::CyclicRelation {
                                value: succ.to_string(),
                            });
                        }
                        if !done.contains(succ) {
                            on_path.insert(succ);
                            stack.push((succ, 0));
                        }
                    }
                    None => {
                        on_path.remove(node);
                        done.insert(node);
                    }
                }
            }
        }
        Ok(())
    }
}

/// A priority entry: flag names to pin, every other dimension left unset.
///
/// Distinct from [`Assignment`] so "don't care" stays explicit until the
/// pattern is resolved against a concrete dimension list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityPattern {
    flags: Vec<String>,
}

impl PriorityPattern {
    pub fn new(flags: Vec<String>) -> Self {
        Self { flags }
    }

    /// Resolve to the full assignment with each named flag in its dimension
    /// and every unnamed dimension unset. A name matching no dimension is a
    /// configuration error.
    pub fn resolve(&self, dimensions: &[Dimension]) -> Result<Assignment, DomainError> {
        let mut values = vec![FlagValue::Unset; dimensions.len()];
        for flag in &self.flags {
            let dim = dimensions
                .iter()
                .position(|d| d.contains(flag))
                .ok_or_else(|| DomainError::UnknownPriorityFlag { flag: flag.clone() })?;
            values[dim] = FlagValue::set(flag.clone());
        }
        Ok(Assignment::new(values))
    }
}

/// The immutable domain model for one search run: dimensions, order
/// relation, and the resolved priority sequence.
#[derive(Debug, Clone)]
pub struct FlagSpace {
    dimensions: Vec<Dimension>,
    relation: OrderRelation,
    priority: Vec<Assignment>,
}

impl FlagSpace {
    pub fn new(
        dimensions: Vec<Dimension>,
        relation: OrderRelation,
        priority: Vec<PriorityPattern>,
    ) -> Result<Self, DomainError> {
        relation.check_acyclic()?;
        let priority = priority
            .iter()
            .map(|pattern| pattern.resolve(&dimensions))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            dimensions,
            relation,
            priority,
        })
    }

    /// The zero-dimensional space: its universe is one empty assignment.
    pub fn empty() -> Self {
        Self {
            dimensions: Vec::new(),
            relation: OrderRelation::default(),
            priority: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn relation(&self) -> &OrderRelation {
        &self.relation
    }

    /// Resolved priority assignments, in declared order.
    pub fn priority(&self) -> &[Assignment] {
        &self.priority
    }

    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// Size of the full universe: per dimension, explicit values plus unset.
    pub fn universe_size(&self) -> usize {
        self.dimensions
            .iter()
            .map(|d| d.values().len() + 1)
            .product()
    }
}
