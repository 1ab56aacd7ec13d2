use crate::models::Report;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Renders an analysis report to the console or a file
pub struct ReportWriter {
    format: OutputFormat,
    writer: Option<Box<dyn Write + Send>>,
}

#[derive(Debug, Clone)]
pub enum OutputFormat {
    Console,
    Json,
    Jsonl,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            _ => OutputFormat::Console, // Default
        }
    }
}

impl ReportWriter {
    /// Create a new report writer. Without a file path, output goes to stdout.
    pub fn new(
        format: OutputFormat,
        file_path: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let writer: Option<Box<dyn Write + Send>> = match file_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Box::new(BufWriter::new(file)))
            }
            None => None,
        };

        Ok(ReportWriter { format, writer })
    }

    /// Write a full report in the configured format
    pub fn write_report(&mut self, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
        match &self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                self.write_output(&format!("{}\n", json))?;
            }
            OutputFormat::Jsonl => {
                let mut lines = String::new();
                for findings in &report.findings {
                    for alert in &findings.alerts {
                        lines.push_str(&serde_json::to_string(alert)?);
                        lines.push('\n');
                    }
                }
                self.write_output(&lines)?;
            }
            OutputFormat::Console => {
                let text = render_console(report);
                self.write_output(&text)?;
            }
        }
        Ok(())
    }

    fn write_output(&mut self, data: &str) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.writer {
            Some(writer) => {
                writer.write_all(data.as_bytes())?;
                writer.flush()?;
            }
            None => {
                print!("{}", data);
                std::io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

fn render_console(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("--- Security Analysis Report ---\n");

    for findings in &report.findings {
        if findings.alerts.is_empty() {
            continue;
        }
        out.push_str(&format!("\n[!] {} Detected:\n", findings.category));
        for alert in &findings.alerts {
            out.push_str(&format!("  - {}\n", alert.message));
        }
    }

    if report.is_empty() {
        out.push_str("\n[*] No major suspicious activities detected.\n");
    }

    out.push_str("\n--- End of Report ---\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Alert;
    use chrono::NaiveDate;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.add_category(
            "Brute-Force Attempts",
            vec![Alert {
                category: "Brute-Force Attempts".to_string(),
                user_id: "user003".to_string(),
                target_id: "zone_datacenter".to_string(),
                timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 40)
                    .unwrap(),
                message: "User 'user003' on target 'zone_datacenter': 5 failures within 5 minutes."
                    .to_string(),
            }],
        );
        report.add_category("Anomalous Access Hours", Vec::new());
        report
    }

    #[test]
    fn test_console_rendering_with_alerts() {
        let text = render_console(&sample_report());
        assert!(text.contains("[!] Brute-Force Attempts Detected:"));
        assert!(text.contains("  - User 'user003'"));
        assert!(!text.contains("Anomalous Access Hours"), "empty categories are omitted");
        assert!(!text.contains("No major suspicious activities"));
    }

    #[test]
    fn test_console_rendering_empty_report() {
        let mut report = Report::new();
        report.add_category("Impossible Travel", Vec::new());

        let text = render_console(&report);
        assert!(text.contains("[*] No major suspicious activities detected."));
    }

    #[test]
    fn test_format_from_str() {
        assert!(matches!(OutputFormat::from_str("JSON"), OutputFormat::Json));
        assert!(matches!(OutputFormat::from_str("jsonl"), OutputFormat::Jsonl));
        assert!(matches!(OutputFormat::from_str("console"), OutputFormat::Console));
        assert!(matches!(OutputFormat::from_str("yaml"), OutputFormat::Console));
    }

    #[test]
    fn test_jsonl_writes_one_line_per_alert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.jsonl");

        let mut writer = ReportWriter::new(OutputFormat::Jsonl, Some(path.clone())).unwrap();
        writer.write_report(&sample_report()).unwrap();
        writer.flush().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"user_id\":\"user003\""));
    }
}
