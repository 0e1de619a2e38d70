use std::time::Duration;

/// Contains Config properties which will be used by a batched property
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Minimum time between two flushes. Zero flushes on every mutation.
    pub interval: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(50),
        }
    }
}

impl BatchConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_immediate(&self) -> bool {
        self.interval.is_zero()
    }
}
