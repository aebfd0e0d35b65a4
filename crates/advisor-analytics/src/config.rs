//! Configuration for a screening run.

use serde::{Deserialize, Serialize};

/// Controls how the per-bond work of a screening run is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum candidate count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 200,
        }
    }
}

impl ScreeningConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ScreeningConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 200);
    }

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = ScreeningConfig::sequential().with_threshold(0);
        assert!(!config.should_parallelize(10_000));
    }

    #[test]
    fn test_threshold() {
        let config = ScreeningConfig::new().with_threshold(50);
        assert!(!config.should_parallelize(49));
        assert_eq!(config.should_parallelize(50), cfg!(feature = "parallel"));
    }

    #[test]
    fn test_partial_deserialize() {
        let config: ScreeningConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 200);
    }
}
