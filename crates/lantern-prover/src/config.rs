use std::path::PathBuf;
use std::time::Duration;

/// Configuration for driving the external prover.
#[derive(Debug, Clone)]
pub struct ProverConfig {
    /// Executable name or path. Bare names are resolved via `PATH`.
    pub executable: PathBuf,
    /// Wall-clock budget per invocation. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Runtime-system worker threads handed to the prover.
    pub cores: u32,
    /// Optional runtime-system heap cap in GiB.
    pub ram_gib: Option<u64>,
    /// Preprocessor flags activated on every invocation.
    pub fixed_flags: Vec<String>,
    /// Extra prover arguments passed through verbatim.
    pub passthrough: Vec<String>,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("tamarin-prover"),
            timeout: None,
            cores: default_cores(),
            ram_gib: None,
            fixed_flags: Vec::new(),
            passthrough: Vec::new(),
        }
    }
}

/// At most four runtime workers by default; more rarely helps the prover.
pub fn default_cores() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(4) as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProverConfig::default();
        assert_eq!(config.executable, PathBuf::from("tamarin-prover"));
        assert!(config.timeout.is_none());
        assert!(config.cores >= 1 && config.cores <= 4);
        assert!(config.fixed_flags.is_empty());
    }
}
