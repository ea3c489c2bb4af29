//! Simulator configuration

use crate::core::{QcdlError, Result};

/// Configuration for stochastic-mode runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of independent trials.
    ///
    /// Default: 1024
    pub shots: usize,

    /// Base seed for the per-trial random sources.
    ///
    /// If None, a seed is drawn from the thread-local entropy source once per
    /// aggregation. Set to Some(seed) for reproducible results.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Fan trials out over the rayon thread pool.
    ///
    /// Default: true
    pub parallel: bool,

    /// Minimum number of shots before trials run in parallel.
    ///
    /// Default: 256
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible configuration: fixed seed, default shot count.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set the number of trials
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set the base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel trials
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a run of `self.shots` trials should use the thread pool.
    pub fn runs_parallel(&self) -> bool {
        self.parallel && self.shots >= self.parallel_threshold
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(QcdlError::InvalidConfiguration {
                message: "shots must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, None);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 256);
        assert!(config.runs_parallel());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulationConfig::new().with_shots(10).with_seed(42).with_parallel(false);
        assert_eq!(config.shots, 10);
        assert_eq!(config.seed, Some(42));
        assert!(!config.runs_parallel());
        assert_eq!(SimulationConfig::deterministic(42).seed, Some(42));
    }

    #[test]
    fn test_small_runs_stay_serial() {
        let config = SimulationConfig::new().with_shots(100);
        assert!(!config.runs_parallel());
        assert!(config.with_parallel_threshold(50).runs_parallel());
    }

    #[test]
    fn test_validate() {
        assert!(SimulationConfig::default().validate().is_ok());
        let invalid = SimulationConfig { shots: 0, ..Default::default() };
        assert!(matches!(invalid.validate(), Err(QcdlError::InvalidConfiguration { .. })));
    }
}
