use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Polling behaviour for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Entries considered per job, in feed order (default: 25)
    pub max_entries_per_job: usize,

    /// Lower bound of the pause between jobs in milliseconds (default: 1000)
    pub jitter_min_ms: u64,

    /// Upper bound of the pause between jobs in milliseconds (default: 2500)
    pub jitter_max_ms: u64,

    /// Feed request timeout in seconds (default: 25)
    pub fetch_timeout_secs: u64,

    /// Webhook request timeout in seconds (default: 20)
    pub delivery_timeout_secs: u64,

    /// Process jobs in random order (default: true)
    pub shuffle: bool,

    /// User agent for feed requests
    pub user_agent: Option<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_entries_per_job: 25,
            jitter_min_ms: 1000,
            jitter_max_ms: 2500,
            fetch_timeout_secs: 25,
            delivery_timeout_secs: 20,
            shuffle: true,
            user_agent: None,
        }
    }
}

impl PollConfig {
    pub fn jitter_range(&self) -> (Duration, Duration) {
        let min = self.jitter_min_ms.min(self.jitter_max_ms);
        let max = self.jitter_min_ms.max(self.jitter_max_ms);
        (Duration::from_millis(min), Duration::from_millis(max))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }
}
