use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the analysis tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input source configuration
    pub input: InputConfig,
    /// Detection rules configuration
    pub detection: DetectionConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the access event log
    pub log_path: PathBuf,
}

/// Detection rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub impossible_travel: ImpossibleTravelConfig,
    pub brute_force: BruteForceConfig,
    pub off_hours: OffHoursConfig,
}

/// Impossible travel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpossibleTravelConfig {
    /// Maximum plausible gap between on-site and remote access, in minutes
    pub threshold_minutes: i64,
}

/// Brute force configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BruteForceConfig {
    /// Sliding window length in seconds
    pub window_seconds: i64,
    /// Failure count within the window that triggers an alert
    pub threshold: usize,
}

/// Off-hours configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffHoursConfig {
    /// First off-hours hour, inclusive
    pub start_hour: u32,
    /// First business hour (off-hours end, exclusive)
    pub end_hour: u32,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "console", "json", or "jsonl"
    pub format: String,
    /// Output file path (stdout if absent)
    pub file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig {
                log_path: PathBuf::from("logs/event_log.csv"),
            },
            detection: DetectionConfig::default(),
            output: OutputConfig {
                format: "console".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            impossible_travel: ImpossibleTravelConfig {
                threshold_minutes: 60,
            },
            brute_force: BruteForceConfig {
                window_seconds: 300,
                threshold: 5,
            },
            off_hours: OffHoursConfig {
                start_hour: 22,
                end_hour: 6,
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let config = Config::default();
        assert_eq!(config.detection.impossible_travel.threshold_minutes, 60);
        assert_eq!(config.detection.brute_force.window_seconds, 300);
        assert_eq!(config.detection.brute_force.threshold, 5);
        assert_eq!(config.detection.off_hours.start_hour, 22);
        assert_eq!(config.detection.off_hours.end_hour, 6);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.detection.brute_force.threshold,
            config.detection.brute_force.threshold
        );
        assert_eq!(parsed.output.format, "console");
    }
}
