//! The sequential search loop: query, classify, record, propagate.

use std::collections::HashMap;
use std::fmt;

use lantern_domain::{Assignment, FlagSpace};
use tracing::{debug, info};

use crate::closure::implied_assignments;
use crate::frontier::Frontier;

/// Classified outcome of one oracle query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Verified { steps: u64 },
    Falsified { steps: u64 },
    /// The prover reported an internal or environment fault.
    ProverError,
    /// The query exceeded its wall-clock budget.
    Timeout,
    /// The prover's rewrite engine reported a warning that makes the run
    /// unusable; the truth value is unknown.
    Inconsistent,
}

impl Verdict {
    /// Proof step count for decided verdicts.
    pub fn steps(&self) -> Option<u64> {
        match self {
            Verdict::Verified { steps } | Verdict::Falsified { steps } => Some(*steps),
            _ => None,
        }
    }

    /// Whether this verdict carries a truth value and may propagate.
    pub fn is_decided(&self) -> bool {
        matches!(self, Verdict::Verified { .. } | Verdict::Falsified { .. })
    }
}

/// A fault that invalidates the whole run, as opposed to an outcome for one
/// assignment. Unclassifiable output is an integration defect and must not
/// be recorded as if it were a verdict.
#[derive(Debug, thiserror::Error)]
pub enum OracleFailure {
    #[error("unclassifiable oracle response: {details}")]
    MalformedResponse { details: String },

    #[error("failed to invoke oracle: {details}")]
    Invocation { details: String },
}

/// The external decision procedure, seen through its classification
/// contract only. Transport (process, RPC) is the implementor's business.
pub trait Oracle {
    fn query(&mut self, assignment: &Assignment) -> Result<Verdict, OracleFailure>;
}

/// Recorded status of a resolved assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Verified,
    Falsified,
    ProverError,
    Timeout,
    Inconsistent,
}

impl Status {
    pub fn is_decided(&self) -> bool {
        matches!(self, Status::Verified | Status::Falsified)
    }
}

impl From<&Verdict> for Status {
    fn from(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Verified { .. } => Status::Verified,
            Verdict::Falsified { .. } => Status::Falsified,
            Verdict::ProverError => Status::ProverError,
            Verdict::Timeout => Status::Timeout,
            Verdict::Inconsistent => Status::Inconsistent,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Verified => "verified",
            Status::Falsified => "falsified",
            Status::ProverError => "prover-error",
            Status::Timeout => "timeout",
            Status::Inconsistent => "inconsistent",
        };
        write!(f, "{s}")
    }
}

/// How an assignment's verdict was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The oracle was invoked for this assignment.
    Queried,
    /// Settled by propagation from a related queried assignment; the step
    /// count is not a fresh measurement and is left unset.
    Implied,
}

/// The recorded outcome for one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictRecord {
    /// The property the oracle was asked about (the lemma name).
    pub label: String,
    pub status: Status,
    pub steps: Option<u64>,
    /// Active flags of the assignment, in dimension order.
    pub flags: Vec<String>,
    pub provenance: Provenance,
}

/// What to do with assignments resolved by propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationPolicy {
    /// Record them with the triggering status and no step count.
    #[default]
    Record,
    /// Leave them out of the result map entirely, matching the legacy
    /// behavior of reporting only queried assignments.
    Omit,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("oracle failure on {assignment}: {source}")]
    Oracle {
        assignment: String,
        #[source]
        source: OracleFailure,
    },
}

/// Outcome of a completed search run.
#[derive(Debug)]
pub struct SearchReport {
    /// Resolved records in generation order.
    pub rows: Vec<VerdictRecord>,
    /// Number of oracle invocations performed.
    pub queries: u64,
    /// Size of the full assignment universe.
    pub universe_size: usize,
}

fn record_for(
    label: &str,
    status: Status,
    steps: Option<u64>,
    assignment: &Assignment,
    provenance: Provenance,
) -> VerdictRecord {
    VerdictRecord {
        label: label.to_string(),
        status,
        steps,
        flags: assignment
            .active_flags()
            .into_iter()
            .map(str::to_string)
            .collect(),
        provenance,
    }
}

/// Drive the search to completion: every assignment in the universe ends up
/// either queried and recorded, or resolved by propagation. Error-kind
/// verdicts are terminal for their assignment and never propagate; an
/// [`OracleFailure`] aborts the whole run.
pub fn run_search<O: Oracle>(
    space: &FlagSpace,
    oracle: &mut O,
    label: &str,
    policy: PropagationPolicy,
) -> Result<SearchReport, SearchError> {
    let mut frontier = Frontier::new(space);
    let mut results: HashMap<Assignment, VerdictRecord> = HashMap::new();
    let mut queries = 0u64;

    while let Some(assignment) = frontier.pop() {
        queries += 1;
        debug!(%assignment, query = queries, "querying oracle");

        let verdict = oracle
            .query(&assignment)
            .map_err(|source| SearchError::Oracle {
                assignment: assignment.to_string(),
                source,
            })?;

        let status = Status::from(&verdict);
        results.insert(
            assignment.clone(),
            record_for(label, status, verdict.steps(), &assignment, Provenance::Queried),
        );

        let verified = match verdict {
            Verdict::Verified { .. } => true,
            Verdict::Falsified { .. } => false,
            // Terminal for this assignment; truth value unknown, nothing to
            // propagate.
            _ => continue,
        };

        let mut pruned = 0usize;
        for implied in implied_assignments(&assignment, verified, space) {
            if !frontier.remove(&implied) {
                continue;
            }
            pruned += 1;
            if policy == PropagationPolicy::Record {
                results.insert(
                    implied.clone(),
                    record_for(label, status, None, &implied, Provenance::Implied),
                );
            }
        }
        if pruned > 0 {
            debug!(%assignment, pruned, "propagated verdict to related assignments");
        }
    }

    let universe_size = frontier.universe().len();
    info!(label, queries, universe_size, "search complete");

    let mut rows = Vec::with_capacity(results.len());
    for assignment in frontier.universe() {
        if let Some(record) = results.remove(assignment) {
            rows.push(record);
        }
    }
    Ok(SearchReport {
        rows,
        queries,
        universe_size,
    })
}
