//! Privilege escalation probing detection
//!
//! Counts insufficient-privilege denials per user across the whole pass
//! and reports users who were denied more than once. Deliberately
//! unwindowed: the counter accumulates for the lifetime of the pass.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::detection::DetectionRule;
use crate::models::{AccessStatus, Alert, EventRecord, ReasonCode};

#[derive(Debug, Clone)]
struct ProbeState {
    count: usize,
    last_seen: NaiveDateTime,
    last_target: String,
}

/// Detects repeated attempts against resources above a user's privilege level.
pub struct PrivilegeEscalationProbingRule {
    /// Maps user_id -> accumulated denial state
    probes: HashMap<String, ProbeState>,
    /// user_ids in first-observed order, for deterministic emission
    order: Vec<String>,
    /// Minimum denial count that triggers an alert (exclusive, default: 1)
    min_count: usize,
}

impl PrivilegeEscalationProbingRule {
    pub const CATEGORY: &'static str = "Privilege Escalation Probing";

    pub fn new() -> Self {
        PrivilegeEscalationProbingRule {
            probes: HashMap::new(),
            order: Vec::new(),
            min_count: 1,
        }
    }

    /// Create with a custom exclusive count threshold.
    pub fn with_min_count(min_count: usize) -> Self {
        PrivilegeEscalationProbingRule {
            probes: HashMap::new(),
            order: Vec::new(),
            min_count,
        }
    }
}

impl DetectionRule for PrivilegeEscalationProbingRule {
    fn category(&self) -> &'static str {
        Self::CATEGORY
    }

    fn observe(&mut self, record: &EventRecord) -> Vec<Alert> {
        if record.status == AccessStatus::Failure
            && record.reason == Some(ReasonCode::InsufficientPrivilege)
        {
            match self.probes.get_mut(&record.user_id) {
                Some(state) => {
                    state.count += 1;
                    state.last_seen = record.timestamp;
                    state.last_target = record.target_id.clone();
                }
                None => {
                    self.order.push(record.user_id.clone());
                    self.probes.insert(
                        record.user_id.clone(),
                        ProbeState {
                            count: 1,
                            last_seen: record.timestamp,
                            last_target: record.target_id.clone(),
                        },
                    );
                }
            }
        }

        // Emission happens after the full pass
        Vec::new()
    }

    fn finish(&mut self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for user_id in &self.order {
            let state = &self.probes[user_id];
            if state.count > self.min_count {
                alerts.push(Alert {
                    category: Self::CATEGORY.to_string(),
                    user_id: user_id.clone(),
                    target_id: state.last_target.clone(),
                    timestamp: state.last_seen,
                    message: format!(
                        "User '{}' made {} failed attempts against resources above \
                         their privilege level, suggesting probing.",
                        user_id, state.count
                    ),
                });
            }
        }
        alerts
    }

    fn reset(&mut self) {
        self.probes.clear();
        self.order.clear();
    }
}

impl Default for PrivilegeEscalationProbingRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::NaiveDate;

    fn ts(min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(11, min, 0)
            .unwrap()
    }

    fn privilege_denial(user: &str, target: &str, timestamp: NaiveDateTime) -> EventRecord {
        EventRecord {
            timestamp,
            event_type: EventType::Digital,
            user_id: user.to_string(),
            user_name: user.to_string(),
            target_id: target.to_string(),
            status: AccessStatus::Failure,
            reason: Some(ReasonCode::InsufficientPrivilege),
            details: "Insufficient privilege for Payroll.".to_string(),
        }
    }

    #[test]
    fn test_single_denial_no_alert() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        rule.observe(&privilege_denial("user002", "resource_payroll", ts(0)));
        assert!(rule.finish().is_empty());
    }

    #[test]
    fn test_two_denials_alert() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        rule.observe(&privilege_denial("user002", "resource_payroll", ts(0)));
        rule.observe(&privilege_denial("user002", "zone_datacenter", ts(1)));

        let alerts = rule.finish();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("2 failed attempts"));
        assert_eq!(alerts[0].target_id, "zone_datacenter");
    }

    #[test]
    fn test_counter_never_resets_within_pass() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        // Denials hours apart still accumulate
        rule.observe(&privilege_denial("user002", "resource_payroll", ts(0)));
        rule.observe(&privilege_denial("user002", "resource_payroll", ts(59)));

        let alerts = rule.finish();
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_observe_never_emits() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        for i in 0..5 {
            let alerts = rule.observe(&privilege_denial("user002", "resource_payroll", ts(i)));
            assert!(alerts.is_empty());
        }
    }

    #[test]
    fn test_emission_in_first_observed_order() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        rule.observe(&privilege_denial("zed", "resource_payroll", ts(0)));
        rule.observe(&privilege_denial("amy", "resource_payroll", ts(1)));
        rule.observe(&privilege_denial("zed", "resource_payroll", ts(2)));
        rule.observe(&privilege_denial("amy", "resource_payroll", ts(3)));

        let alerts = rule.finish();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].user_id, "zed");
        assert_eq!(alerts[1].user_id, "amy");
    }

    #[test]
    fn test_other_failures_ignored() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        let mut record = privilege_denial("user002", "resource_payroll", ts(0));
        record.reason = Some(ReasonCode::UntrustedIp);
        rule.observe(&record);
        rule.observe(&privilege_denial("user002", "resource_payroll", ts(1)));

        assert!(rule.finish().is_empty(), "only privilege denials count");
    }

    #[test]
    fn test_reset_clears_counts() {
        let mut rule = PrivilegeEscalationProbingRule::new();

        rule.observe(&privilege_denial("user002", "resource_payroll", ts(0)));
        rule.observe(&privilege_denial("user002", "resource_payroll", ts(1)));
        rule.reset();

        assert!(rule.finish().is_empty());
    }
}
