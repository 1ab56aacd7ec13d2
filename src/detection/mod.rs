pub mod engine;
pub mod rule_anomalous_hours;
pub mod rule_brute_force;
pub mod rule_impossible_travel;
pub mod rule_privilege_probing;

pub use engine::{DetectionEngine, DetectionRule};
pub use rule_anomalous_hours::AnomalousHoursRule;
pub use rule_brute_force::BruteForceRule;
pub use rule_impossible_travel::ImpossibleTravelRule;
pub use rule_privilege_probing::PrivilegeEscalationProbingRule;
