//! Access log ingest
//!
//! Reads the delimited event log produced by the access-control recorder
//! into `EventRecord`s. The recognized columns are exactly:
//! `timestamp,event_type,user_id,user_name,target_id,status,details`,
//! with ISO-8601 timestamps and quoting around fields containing commas.
//!
//! A malformed row is a data-quality problem local to that row: it is
//! skipped, counted, and logged, and the read continues.

use crate::models::{AccessStatus, EventRecord, EventType, ReasonCode};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use thiserror::Error;

const HEADER: &str = "timestamp,event_type,user_id,user_name,target_id,status,details";
const COLUMN_COUNT: usize = 7;

/// Errors for a single unparsable log row
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("expected {COLUMN_COUNT} columns, found {0}")]
    ColumnCount(usize),

    #[error("unparsable timestamp '{0}'")]
    Timestamp(String),

    #[error("unknown event type '{0}'")]
    EventType(String),

    #[error("unknown status '{0}'")]
    Status(String),
}

/// Result of reading one log file.
#[derive(Debug)]
pub struct ReadSummary {
    /// Records in file order (non-decreasing timestamps per the producer)
    pub records: Vec<EventRecord>,
    /// Number of malformed rows that were skipped
    pub skipped: usize,
}

/// Reads an access event log file into records
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        LogReader { path }
    }

    /// Read every event in the file.
    ///
    /// An empty or header-only file is a valid, empty sequence. A missing
    /// or unreadable file is an error for the caller to surface.
    pub fn read_events(&self) -> Result<ReadSummary, std::io::Error> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            if line_no == 0 && trimmed == HEADER {
                continue;
            }

            match parse_log_line(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    log::warn!("skipping malformed row {}: {}", line_no + 1, e);
                }
            }
        }

        if skipped > 0 {
            log::warn!("{} malformed row(s) skipped from {:?}", skipped, self.path);
        }

        Ok(ReadSummary { records, skipped })
    }
}

/// Parse one delimited log row into an `EventRecord`.
///
/// The reason code is derived from the details text here, at the ingest
/// boundary, so detection rules never touch message prose.
pub fn parse_log_line(line: &str) -> Result<EventRecord, ParseError> {
    let fields = split_fields(line);
    if fields.len() != COLUMN_COUNT {
        return Err(ParseError::ColumnCount(fields.len()));
    }

    let timestamp = fields[0]
        .parse()
        .map_err(|_| ParseError::Timestamp(fields[0].clone()))?;
    let event_type =
        EventType::parse(&fields[1]).ok_or_else(|| ParseError::EventType(fields[1].clone()))?;
    let status =
        AccessStatus::parse(&fields[5]).ok_or_else(|| ParseError::Status(fields[5].clone()))?;
    let details = fields[6].clone();

    Ok(EventRecord {
        timestamp,
        event_type,
        user_id: fields[2].clone(),
        user_name: fields[3].clone(),
        target_id: fields[4].clone(),
        status,
        reason: ReasonCode::from_details(&details),
        details,
    })
}

/// Split one delimited row into fields, honoring double-quoted fields
/// with `""` as an escaped quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
