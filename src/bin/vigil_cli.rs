use std::path::PathBuf;
use structopt::StructOpt;

use vigil::config::Config;
use vigil::detection::DetectionEngine;
use vigil::input::LogReader;
use vigil::output::{OutputFormat, ReportWriter};

/// Access-pattern anomaly detection command line interface
#[derive(StructOpt, Debug)]
#[structopt(name = "vigil", about = "Access log anomaly detection CLI")]
pub enum Cli {
    /// Analyze an access event log and report suspicious patterns
    Analyze {
        /// Path to the event log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Output format override: console, json, or jsonl
        #[structopt(long)]
        format: Option<String>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Analyze {
            file,
            config,
            format,
        } => {
            let config = if config.exists() {
                Config::from_file(&config)?
            } else {
                log::warn!("Config file not found, using defaults");
                Config::default()
            };

            if !file.exists() {
                eprintln!("Event log not found: {:?}", file);
                std::process::exit(1);
            }

            let reader = LogReader::new(file);
            let summary = reader.read_events()?;
            if summary.records.is_empty() {
                log::warn!("Event log is empty; nothing to analyze");
            }

            let mut engine = DetectionEngine::from_config(&config.detection);
            let report = engine.analyze(&summary.records);

            let output_format = OutputFormat::from_str(
                format.as_deref().unwrap_or(config.output.format.as_str()),
            );
            let mut writer = ReportWriter::new(output_format, config.output.file_path.clone())?;
            writer.write_report(&report)?;
            writer.flush()?;

            log::info!(
                "Analyzed {} event(s) ({} skipped), {} alert(s)",
                summary.records.len(),
                summary.skipped,
                report.total_alerts()
            );
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}
