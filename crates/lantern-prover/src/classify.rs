//! Classification of raw prover output into verdicts.

use lantern_search::Verdict;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("unrecognized prover output: {excerpt}")]
    Unrecognized { excerpt: String },
}

/// Marker the prover's rewrite engine prints when a run is structurally
/// unusable (its truth value cannot be trusted).
pub(crate) const REWRITE_WARNING: &str = "Maude returned warning";

/// Markers of an internal or environment fault inside the prover.
pub(crate) const INTERNAL_FAULT_MARKERS: [&str; 2] = ["CallStack", "internal error"];

fn unrecognized(output: &str) -> ClassifyError {
    let excerpt: String = output.chars().take(200).collect();
    ClassifyError::Unrecognized { excerpt }
}

/// Parse the step count out of a summary line like
/// `  secrecy (all-traces): verified (4 steps)`.
fn parse_steps(line: &str) -> Option<u64> {
    let mut prev: Option<&str> = None;
    for token in line.split_whitespace() {
        if token.starts_with("steps") {
            return prev?.trim_start_matches('(').parse().ok();
        }
        prev = Some(token);
    }
    None
}

/// Classify one completed run's combined output.
///
/// Fault markers win over summary lines: a run that crashed after printing
/// a partial summary is not a verdict. Output with no classifiable content
/// is an integration defect, not a domain outcome.
pub fn classify_output(output: &str) -> Result<Verdict, ClassifyError> {
    if output.contains(REWRITE_WARNING) {
        return Ok(Verdict::Inconsistent);
    }
    if INTERNAL_FAULT_MARKERS.iter().any(|m| output.contains(m)) {
        return Ok(Verdict::ProverError);
    }
    for line in output.lines().filter(|l| l.contains("steps")) {
        if line.contains("verified") {
            let steps = parse_steps(line).ok_or_else(|| unrecognized(output))?;
            return Ok(Verdict::Verified { steps });
        }
        if line.contains("falsified") {
            let steps = parse_steps(line).ok_or_else(|| unrecognized(output))?;
            return Ok(Verdict::Falsified { steps });
        }
    }
    Err(unrecognized(output))
}
