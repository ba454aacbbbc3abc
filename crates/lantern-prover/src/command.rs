//! Construction of one prover invocation's argument vector.

use std::path::{Path, PathBuf};

use crate::config::ProverConfig;

/// A fully assembled prover command line, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ProverInvocation {
    /// Build the argv for checking `model`: optional `--prove=<lemma>`,
    /// runtime-system options, one `-D=<flag>` per fixed and per active
    /// search flag, then any passthrough arguments.
    pub fn build(
        config: &ProverConfig,
        model: &Path,
        lemma: Option<&str>,
        flags: &[&str],
    ) -> Self {
        let mut args = Vec::new();
        args.push(model.display().to_string());
        if let Some(lemma) = lemma {
            args.push(format!("--prove={lemma}"));
        }
        args.push("+RTS".to_string());
        args.push(format!("-N{}", config.cores));
        if let Some(ram_gib) = config.ram_gib {
            // The runtime's -M takes megabytes when no unit is given.
            args.push(format!("-M{}", ram_gib * 1024));
        }
        args.push("-RTS".to_string());
        for flag in &config.fixed_flags {
            args.push(format!("-D={flag}"));
        }
        for flag in flags {
            args.push(format!("-D={flag}"));
        }
        args.extend(config.passthrough.iter().cloned());
        Self {
            program: config.executable.clone(),
            args,
        }
    }

    /// Single-line rendering for logs.
    pub fn display_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
