//! Registry configuration

use crate::notify::DEFAULT_LONG_RUN_THRESHOLD;

/// Session registry configuration options
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Capacity of the viewer outbound queue
    pub viewer_queue_capacity: usize,

    /// Capacity of the milestone outbound queue
    pub milestone_queue_capacity: usize,

    /// Run time, in seconds, at which long-run milestones fire
    pub long_run_threshold: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            viewer_queue_capacity: 256,
            milestone_queue_capacity: 64,
            long_run_threshold: DEFAULT_LONG_RUN_THRESHOLD,
        }
    }
}

impl RegistryConfig {
    /// Set viewer queue capacity (minimum 1)
    pub fn viewer_queue_capacity(mut self, capacity: usize) -> Self {
        self.viewer_queue_capacity = capacity.max(1);
        self
    }

    /// Set milestone queue capacity (minimum 1)
    pub fn milestone_queue_capacity(mut self, capacity: usize) -> Self {
        self.milestone_queue_capacity = capacity.max(1);
        self
    }

    /// Set the long-run threshold
    pub fn long_run_threshold(mut self, seconds: f64) -> Self {
        self.long_run_threshold = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.viewer_queue_capacity, 256);
        assert_eq!(config.milestone_queue_capacity, 64);
        assert_eq!(config.long_run_threshold, 1000.0);
    }

    #[test]
    fn test_capacity_floor() {
        // tokio's bounded channel rejects a zero capacity
        let config = RegistryConfig::default()
            .viewer_queue_capacity(0)
            .milestone_queue_capacity(0);
        assert_eq!(config.viewer_queue_capacity, 1);
        assert_eq!(config.milestone_queue_capacity, 1);
    }

    #[test]
    fn test_builder_chaining() {
        let config = RegistryConfig::default()
            .viewer_queue_capacity(8)
            .long_run_threshold(500.0);
        assert_eq!(config.viewer_queue_capacity, 8);
        assert_eq!(config.long_run_threshold, 500.0);
    }
}
