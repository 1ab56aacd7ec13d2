use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One finding emitted by a detection rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub category: String,
    pub user_id: String,
    pub target_id: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
}

/// All alerts one rule produced during a pass, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFindings {
    pub category: String,
    pub alerts: Vec<Alert>,
}

/// Aggregated output of one analysis pass.
///
/// Categories appear in rule registration order and are always present,
/// even when their alert list is empty. An all-empty report signals
/// "no anomalies found".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub findings: Vec<RuleFindings>,
}

impl Report {
    pub fn new() -> Self {
        Report { findings: Vec::new() }
    }

    /// Record a category's alerts. Categories are expected to be unique.
    pub fn add_category(&mut self, category: &str, alerts: Vec<Alert>) {
        self.findings.push(RuleFindings {
            category: category.to_string(),
            alerts,
        });
    }

    /// Look up the alerts for a category, if it exists in this report.
    pub fn alerts_for(&self, category: &str) -> Option<&[Alert]> {
        self.findings
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.alerts.as_slice())
    }

    pub fn total_alerts(&self) -> usize {
        self.findings.iter().map(|f| f.alerts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_alerts() == 0
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}
