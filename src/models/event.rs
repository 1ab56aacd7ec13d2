use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether an access attempt targeted a physical zone or a digital resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Physical,
    Digital,
}

impl EventType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "PHYSICAL" => Some(EventType::Physical),
            "DIGITAL" => Some(EventType::Digital),
            _ => None,
        }
    }
}

/// Outcome of an access attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessStatus {
    Success,
    Failure,
}

impl AccessStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "SUCCESS" => Some(AccessStatus::Success),
            "FAILURE" => Some(AccessStatus::Failure),
            _ => None,
        }
    }
}

/// Machine-readable denial reason carried on a record.
///
/// Detection rules match these codes exactly. The legacy log format only
/// carries free-text `details`; `from_details` maps that prose to a code
/// once at ingest so no rule ever inspects message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    UntrustedIp,
    InsufficientPrivilege,
    InvalidTarget,
}

impl ReasonCode {
    /// Derive a reason code from the free-text details field.
    ///
    /// The substrings checked here are the exact phrases the upstream log
    /// producer writes; this is the only place those phrases are known.
    pub fn from_details(details: &str) -> Option<Self> {
        if details.contains("untrusted IP") {
            Some(ReasonCode::UntrustedIp)
        } else if details.contains("Insufficient privilege") {
            Some(ReasonCode::InsufficientPrivilege)
        } else if details.contains("Invalid user") {
            Some(ReasonCode::InvalidTarget)
        } else {
            None
        }
    }
}

/// One logged access attempt. Immutable once constructed; the engine
/// only ever reads these.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Timezone-naive; the producer guarantees non-decreasing order.
    pub timestamp: NaiveDateTime,
    pub event_type: EventType,
    /// Not guaranteed to reference a known user.
    pub user_id: String,
    /// Display name, may be "Unknown".
    pub user_name: String,
    /// Zone or resource addressed.
    pub target_id: String,
    pub status: AccessStatus,
    pub reason: Option<ReasonCode>,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_type() {
        assert_eq!(EventType::parse("PHYSICAL"), Some(EventType::Physical));
        assert_eq!(EventType::parse("DIGITAL"), Some(EventType::Digital));
        assert_eq!(EventType::parse("physical"), None);
        assert_eq!(EventType::parse("SSH"), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(AccessStatus::parse("SUCCESS"), Some(AccessStatus::Success));
        assert_eq!(AccessStatus::parse(" FAILURE "), Some(AccessStatus::Failure));
        assert_eq!(AccessStatus::parse("DENIED"), None);
    }

    #[test]
    fn test_reason_from_details() {
        assert_eq!(
            ReasonCode::from_details("Access from untrusted IP: 203.0.113.55."),
            Some(ReasonCode::UntrustedIp)
        );
        assert_eq!(
            ReasonCode::from_details("Insufficient privilege for Data Center."),
            Some(ReasonCode::InsufficientPrivilege)
        );
        assert_eq!(
            ReasonCode::from_details("Invalid user or zone."),
            Some(ReasonCode::InvalidTarget)
        );
        assert_eq!(ReasonCode::from_details("Access granted to Lobby."), None);
    }
}
