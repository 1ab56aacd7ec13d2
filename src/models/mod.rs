pub mod event;
pub mod report;

pub use event::{AccessStatus, EventRecord, EventType, ReasonCode};
pub use report::{Alert, Report, RuleFindings};
