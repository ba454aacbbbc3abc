//! Lemma discovery.
//!
//! Loading a theory without `--prove` makes the prover print one summary
//! line per lemma; the lemma names are the first token of those lines.

use std::path::Path;

use tracing::info;

use crate::classify::{INTERNAL_FAULT_MARKERS, REWRITE_WARNING};
use crate::command::ProverInvocation;
use crate::config::ProverConfig;
use crate::invoke::{run_prover, InvokeError, RawOutcome};

#[derive(Debug, thiserror::Error)]
pub enum LemmaError {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("prover timed out while listing lemmas of '{model}'")]
    TimedOut { model: String },

    #[error("prover faulted while listing lemmas of '{model}'")]
    ProverFault { model: String },

    #[error("'{model}' declares no lemmas")]
    NoLemmas { model: String },
}

/// Ask the prover which lemmas `model` declares.
pub fn discover_lemmas(config: &ProverConfig, model: &Path) -> Result<Vec<String>, LemmaError> {
    let invocation = ProverInvocation::build(config, model, None, &[]);
    let model_name = model.display().to_string();

    let output = match run_prover(&invocation, config.timeout)? {
        RawOutcome::TimedOut => return Err(LemmaError::TimedOut { model: model_name }),
        RawOutcome::Completed(output) => output,
    };

    if output.contains(REWRITE_WARNING)
        || INTERNAL_FAULT_MARKERS.iter().any(|m| output.contains(m))
    {
        return Err(LemmaError::ProverFault { model: model_name });
    }

    let lemmas: Vec<String> = output
        .lines()
        .filter(|line| line.contains("steps"))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect();

    if lemmas.is_empty() {
        return Err(LemmaError::NoLemmas { model: model_name });
    }
    info!(model = %model_name, count = lemmas.len(), "discovered lemmas");
    Ok(lemmas)
}
