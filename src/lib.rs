pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use config::Config;
pub use detection::{
    AnomalousHoursRule, BruteForceRule, DetectionEngine, DetectionRule, ImpossibleTravelRule,
    PrivilegeEscalationProbingRule,
};
pub use input::LogReader;
pub use models::{AccessStatus, Alert, EventRecord, EventType, ReasonCode, Report};
pub use output::{OutputFormat, ReportWriter};
