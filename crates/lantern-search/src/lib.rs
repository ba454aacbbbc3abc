//! Monotonic closure search over a prover flag space.
//!
//! The engine enumerates the Cartesian product of flag choices, queries an
//! expensive external oracle one assignment at a time, and after every
//! decided verdict prunes the assignments whose outcome is implied by the
//! declared order relation. Queries within one search are strictly
//! sequential: which query is needed next depends on what the previous
//! verdict pruned.

pub mod closure;
pub mod driver;
pub mod frontier;

pub use closure::implied_assignments;
pub use driver::{
    run_search, Oracle, OracleFailure, PropagationPolicy, Provenance, SearchError,
    SearchReport, Status, Verdict, VerdictRecord,
};
pub use frontier::Frontier;
