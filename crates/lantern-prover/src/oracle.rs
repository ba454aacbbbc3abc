//! The prover seen through the search engine's oracle contract.

use std::path::PathBuf;

use lantern_domain::Assignment;
use lantern_search::{Oracle, OracleFailure, Verdict};
use tracing::debug;

use crate::classify::classify_output;
use crate::command::ProverInvocation;
use crate::config::ProverConfig;
use crate::invoke::{run_prover, RawOutcome};

/// One (model, lemma) pair exposed as an oracle over flag assignments.
///
/// Each query builds a fresh invocation from the assignment's active flags,
/// runs the prover to completion or timeout, and classifies the output.
pub struct ProverOracle {
    config: ProverConfig,
    model: PathBuf,
    lemma: String,
}

impl ProverOracle {
    pub fn new(config: ProverConfig, model: PathBuf, lemma: impl Into<String>) -> Self {
        Self {
            config,
            model,
            lemma: lemma.into(),
        }
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }
}

impl Oracle for ProverOracle {
    fn query(&mut self, assignment: &Assignment) -> Result<Verdict, OracleFailure> {
        let flags = assignment.active_flags();
        let invocation =
            ProverInvocation::build(&self.config, &self.model, Some(&self.lemma), &flags);
        debug!(lemma = %self.lemma, %assignment, "invoking prover");

        match run_prover(&invocation, self.config.timeout) {
            Ok(RawOutcome::TimedOut) => Ok(Verdict::Timeout),
            Ok(RawOutcome::Completed(output)) => classify_output(&output).map_err(|e| {
                OracleFailure::MalformedResponse {
                    details: e.to_string(),
                }
            }),
            Err(e) => Err(OracleFailure::Invocation {
                details: e.to_string(),
            }),
        }
    }
}
