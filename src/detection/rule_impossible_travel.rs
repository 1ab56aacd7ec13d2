//! Impossible travel detection
//!
//! Correlates successful on-site (physical) access with remote access
//! attempts from untrusted networks. A user badging in and then showing
//! up remotely within an implausibly short interval is a classic
//! credential-compromise or shared-credential signal.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::detection::DetectionRule;
use crate::models::{AccessStatus, Alert, EventRecord, EventType, ReasonCode};

/// Detects remote access attempts implausibly soon after on-site access.
pub struct ImpossibleTravelRule {
    /// Maps user_id -> timestamp of most recent successful physical access
    last_physical_success: HashMap<String, NaiveDateTime>,
    /// Maximum plausible gap between on-site and remote access
    threshold: Duration,
}

impl ImpossibleTravelRule {
    pub const CATEGORY: &'static str = "Impossible Travel";

    /// Create with the default threshold of 1 hour.
    pub fn new() -> Self {
        ImpossibleTravelRule {
            last_physical_success: HashMap::new(),
            threshold: Duration::hours(1),
        }
    }

    /// Create with a custom threshold.
    pub fn with_threshold(threshold: Duration) -> Self {
        ImpossibleTravelRule {
            last_physical_success: HashMap::new(),
            threshold,
        }
    }

    fn is_untrusted_remote_failure(record: &EventRecord) -> bool {
        record.event_type == EventType::Digital
            && record.status == AccessStatus::Failure
            && record.reason == Some(ReasonCode::UntrustedIp)
    }
}

impl DetectionRule for ImpossibleTravelRule {
    fn category(&self) -> &'static str {
        Self::CATEGORY
    }

    fn observe(&mut self, record: &EventRecord) -> Vec<Alert> {
        if record.event_type == EventType::Physical && record.status == AccessStatus::Success {
            // Only the latest on-site success matters
            self.last_physical_success
                .insert(record.user_id.clone(), record.timestamp);
            return Vec::new();
        }

        if Self::is_untrusted_remote_failure(record) {
            if let Some(&last_success) = self.last_physical_success.get(&record.user_id) {
                let gap = record.timestamp - last_success;
                if gap < self.threshold {
                    return vec![Alert {
                        category: Self::CATEGORY.to_string(),
                        user_id: record.user_id.clone(),
                        target_id: record.target_id.clone(),
                        timestamp: record.timestamp,
                        message: format!(
                            "User '{}' had successful on-site access followed by a remote \
                             attempt from an untrusted network {} later.",
                            record.user_id,
                            format_gap(gap)
                        ),
                    }];
                }
            }
        }

        Vec::new()
    }

    fn reset(&mut self) {
        self.last_physical_success.clear();
    }
}

impl Default for ImpossibleTravelRule {
    fn default() -> Self {
        Self::new()
    }
}

fn format_gap(gap: Duration) -> String {
    let total_seconds = gap.num_seconds();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    if minutes > 0 && seconds > 0 {
        format!("{}m {}s", minutes, seconds)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}
