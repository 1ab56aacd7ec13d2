//! Off-hours access detection
//!
//! Flags successful access attempts whose hour-of-day falls inside the
//! configured off-hours interval. The interval wraps midnight and is
//! half-open at both ends: `[start_hour, 24) ∪ [0, end_hour)`.

use chrono::Timelike;

use crate::detection::DetectionRule;
use crate::models::{AccessStatus, Alert, EventRecord};

/// Detects successful access during configured off-hours.
pub struct AnomalousHoursRule {
    /// First off-hours hour, inclusive (default: 22)
    start_hour: u32,
    /// First business hour, exclusive bound of off-hours (default: 6)
    end_hour: u32,
}

impl AnomalousHoursRule {
    pub const CATEGORY: &'static str = "Anomalous Access Hours";

    /// Create with the default 22:00 - 06:00 off-hours window.
    pub fn new() -> Self {
        AnomalousHoursRule {
            start_hour: 22,
            end_hour: 6,
        }
    }

    /// Create with custom off-hours bounds.
    pub fn with_hours(start_hour: u32, end_hour: u32) -> Self {
        AnomalousHoursRule {
            start_hour,
            end_hour,
        }
    }

    fn is_off_hours(&self, hour: u32) -> bool {
        hour >= self.start_hour || hour < self.end_hour
    }
}

impl DetectionRule for AnomalousHoursRule {
    fn category(&self) -> &'static str {
        Self::CATEGORY
    }

    fn observe(&mut self, record: &EventRecord) -> Vec<Alert> {
        if record.status != AccessStatus::Success {
            return Vec::new();
        }

        if self.is_off_hours(record.timestamp.hour()) {
            return vec![Alert {
                category: Self::CATEGORY.to_string(),
                user_id: record.user_id.clone(),
                target_id: record.target_id.clone(),
                timestamp: record.timestamp,
                message: format!(
                    "Successful access by '{}' to '{}' at an unusual time: {}.",
                    record.user_name,
                    record.target_id,
                    record.timestamp.time()
                ),
            }];
        }

        Vec::new()
    }

    fn reset(&mut self) {
        // Stateless
    }
}

impl Default for AnomalousHoursRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::{NaiveDate, NaiveDateTime};

    fn success_at(hour: u32, min: u32) -> EventRecord {
        let timestamp: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap();
        EventRecord {
            timestamp,
            event_type: EventType::Digital,
            user_id: "admin01".to_string(),
            user_name: "Dana Admin".to_string(),
            target_id: "resource_dc".to_string(),
            status: AccessStatus::Success,
            reason: None,
            details: "Access granted to Domain Controller.".to_string(),
        }
    }

    #[test]
    fn test_business_hours_quiet() {
        let mut rule = AnomalousHoursRule::new();
        assert!(rule.observe(&success_at(9, 30)).is_empty());
        assert!(rule.observe(&success_at(14, 0)).is_empty());
    }

    #[test]
    fn test_boundary_hours() {
        let mut rule = AnomalousHoursRule::new();

        assert!(rule.observe(&success_at(21, 59)).is_empty());
        assert_eq!(rule.observe(&success_at(22, 0)).len(), 1);
        assert_eq!(rule.observe(&success_at(5, 59)).len(), 1);
        assert!(rule.observe(&success_at(6, 0)).is_empty());
    }

    #[test]
    fn test_middle_of_night() {
        let mut rule = AnomalousHoursRule::new();

        let alerts = rule.observe(&success_at(3, 15));
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("Dana Admin"));
        assert!(alerts[0].message.contains("03:15:00"));
    }

    #[test]
    fn test_failure_ignored() {
        let mut rule = AnomalousHoursRule::new();

        let mut record = success_at(3, 0);
        record.status = AccessStatus::Failure;
        assert!(rule.observe(&record).is_empty());
    }

    #[test]
    fn test_no_deduplication() {
        let mut rule = AnomalousHoursRule::new();

        assert_eq!(rule.observe(&success_at(23, 0)).len(), 1);
        assert_eq!(rule.observe(&success_at(23, 5)).len(), 1);
    }

    #[test]
    fn test_custom_hours() {
        let mut rule = AnomalousHoursRule::with_hours(20, 8);

        assert_eq!(rule.observe(&success_at(20, 0)).len(), 1);
        assert_eq!(rule.observe(&success_at(7, 59)).len(), 1);
        assert!(rule.observe(&success_at(8, 0)).is_empty());
        assert!(rule.observe(&success_at(19, 59)).is_empty());
    }
}
