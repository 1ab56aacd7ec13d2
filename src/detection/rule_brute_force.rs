//! Brute force detection
//!
//! Tracks failed access attempts per user/target pair inside a sliding
//! window and alerts when the failure count reaches the threshold.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::detection::DetectionRule;
use crate::models::{AccessStatus, Alert, EventRecord};

/// Sliding window of failure timestamps for one user/target pair
#[derive(Debug, Clone, Default)]
struct FailureWindow {
    timestamps: Vec<NaiveDateTime>,
}

impl FailureWindow {
    /// Add a timestamp and prune entries outside the window.
    ///
    /// Retention is strict: only timestamps newer than `timestamp - window`
    /// survive, so an entry exactly one window old is dropped.
    fn add_and_prune(&mut self, timestamp: NaiveDateTime, window: Duration) {
        let cutoff = timestamp - window;
        self.timestamps.retain(|&t| t > cutoff);
        self.timestamps.push(timestamp);
    }

    fn count(&self) -> usize {
        self.timestamps.len()
    }

    fn clear(&mut self) {
        self.timestamps.clear();
    }
}

/// Detects repeated access failures against the same target.
pub struct BruteForceRule {
    /// Maps (user_id, target_id) -> window of recent failure timestamps
    failures: HashMap<(String, String), FailureWindow>,
    /// Sliding window length (default: 5 minutes)
    window: Duration,
    /// Failure count that triggers an alert (default: 5)
    threshold: usize,
}

impl BruteForceRule {
    pub const CATEGORY: &'static str = "Brute-Force Attempts";

    /// Create a new rule with default window and threshold.
    pub fn new() -> Self {
        BruteForceRule {
            failures: HashMap::new(),
            window: Duration::minutes(5),
            threshold: 5,
        }
    }

    /// Create with custom window and threshold.
    pub fn with_config(window: Duration, threshold: usize) -> Self {
        BruteForceRule {
            failures: HashMap::new(),
            window,
            threshold,
        }
    }

    /// Current in-window failure count for a user/target pair.
    pub fn failure_count(&self, user_id: &str, target_id: &str) -> usize {
        self.failures
            .get(&(user_id.to_string(), target_id.to_string()))
            .map(|w| w.count())
            .unwrap_or(0)
    }
}

impl DetectionRule for BruteForceRule {
    fn category(&self) -> &'static str {
        Self::CATEGORY
    }

    fn observe(&mut self, record: &EventRecord) -> Vec<Alert> {
        // Successes never participate and never clear the window
        if record.status != AccessStatus::Failure {
            return Vec::new();
        }

        let key = (record.user_id.clone(), record.target_id.clone());
        let window_len = self.window;
        let entry = self.failures.entry(key).or_default();
        entry.add_and_prune(record.timestamp, window_len);

        if entry.count() >= self.threshold {
            let count = entry.count();
            // Clear so the same burst does not re-alert; the next alert
            // requires a full threshold of fresh failures
            entry.clear();
            return vec![Alert {
                category: Self::CATEGORY.to_string(),
                user_id: record.user_id.clone(),
                target_id: record.target_id.clone(),
                timestamp: record.timestamp,
                message: format!(
                    "User '{}' on target '{}': {} failures within {} minutes.",
                    record.user_id,
                    record.target_id,
                    count,
                    self.window.num_minutes()
                ),
            }];
        }

        Vec::new()
    }

    fn reset(&mut self) {
        self.failures.clear();
    }
}

impl Default for BruteForceRule {
    fn default() -> Self {
        Self::new()
    }
}
