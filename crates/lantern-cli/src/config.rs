//! Sweep configuration files: several models with shared defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use lantern_prover::ProverConfig;

/// Defaults applied to every model unless overridden per model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepDefaults {
    pub executable: Option<PathBuf>,
    /// Seconds per prover execution.
    pub timeout: Option<u64>,
    /// Runtime heap cap in GiB.
    pub ram: Option<u64>,
    pub cores: Option<u32>,
    pub fixed_flags: Option<Vec<String>>,
    pub passthrough: Option<Vec<String>>,
    /// Flag space description applied to every model.
    pub flags: Option<PathBuf>,
}

/// One model entry; omitted keys fall back to the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub lemmas: Option<Vec<String>>,
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub ram: Option<u64>,
    #[serde(default)]
    pub cores: Option<u32>,
    #[serde(default)]
    pub fixed_flags: Option<Vec<String>>,
    #[serde(default)]
    pub passthrough: Option<Vec<String>>,
    #[serde(default)]
    pub flags: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepFile {
    #[serde(default)]
    pub defaults: SweepDefaults,
    pub models: Vec<ModelEntry>,
}

/// Fully resolved work for one model.
#[derive(Debug, Clone)]
pub struct ModelPlan {
    pub path: PathBuf,
    /// `None` means: discover lemmas from the model.
    pub lemmas: Option<Vec<String>>,
    pub prover: ProverConfig,
    /// Flag space description to sweep; `None` means a single unflagged
    /// query per lemma.
    pub flag_space: Option<PathBuf>,
}

impl SweepFile {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Merge defaults into each model entry.
    pub fn resolve(&self) -> Vec<ModelPlan> {
        self.models
            .iter()
            .map(|entry| {
                let base = ProverConfig::default();
                let prover = ProverConfig {
                    executable: self
                        .defaults
                        .executable
                        .clone()
                        .unwrap_or(base.executable),
                    timeout: entry
                        .timeout
                        .or(self.defaults.timeout)
                        .map(Duration::from_secs),
                    cores: entry.cores.or(self.defaults.cores).unwrap_or(base.cores),
                    ram_gib: entry.ram.or(self.defaults.ram),
                    fixed_flags: entry
                        .fixed_flags
                        .clone()
                        .or_else(|| self.defaults.fixed_flags.clone())
                        .unwrap_or_default(),
                    passthrough: entry
                        .passthrough
                        .clone()
                        .or_else(|| self.defaults.passthrough.clone())
                        .unwrap_or_default(),
                };
                ModelPlan {
                    path: entry.path.clone(),
                    lemmas: entry.lemmas.clone(),
                    prover,
                    flag_space: entry.flags.clone().or_else(|| self.defaults.flags.clone()),
                }
            })
            .collect()
    }
}
