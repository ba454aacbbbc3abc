//! Adapter around the external theorem prover.
//!
//! Builds prover command lines from flag assignments, runs the prover as a
//! subprocess with a wall-clock budget and guaranteed process-group
//! termination, and classifies its textual output into verdicts for the
//! search engine.

pub mod classify;
pub mod command;
pub mod config;
pub mod detection;
pub mod invoke;
pub mod lemmas;
pub mod oracle;

pub use classify::{classify_output, ClassifyError};
pub use command::ProverInvocation;
pub use config::ProverConfig;
pub use detection::{detect_prover, DetectionError};
pub use invoke::{run_prover, InvokeError, RawOutcome};
pub use lemmas::{discover_lemmas, LemmaError};
pub use oracle::ProverOracle;
