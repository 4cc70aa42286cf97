//! Result files.
//!
//! # Output Files
//!
//! - `rounds.jsonl` - One [`RoundRecord`] per line
//! - `summary.json` - Run configuration plus per-meeting [`MeetingSummary`] rows

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SimConfig;
use crate::runner::RoundRecord;
use crate::stats::MeetingSummary;

pub const ROUNDS_FILE: &str = "rounds.jsonl";
pub const SUMMARY_FILE: &str = "summary.json";

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contents of `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub config: SimConfig,
    pub rows_written: usize,
    pub meetings: Vec<MeetingSummary>,
}

/// Streaming writer for round records.
#[derive(Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
    rounds_writer: BufWriter<File>,
    rows_written: usize,
}

impl OutputWriter {
    /// Creates the directory if needed and truncates `rounds.jsonl`.
    pub fn new(output_dir: &Path) -> Result<Self, OutputError> {
        fs::create_dir_all(output_dir)?;
        let rounds_file = File::create(output_dir.join(ROUNDS_FILE))?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            rounds_writer: BufWriter::new(rounds_file),
            rows_written: 0,
        })
    }

    pub fn write_round(&mut self, record: &RoundRecord) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.rounds_writer, record)?;
        writeln!(self.rounds_writer)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_rounds(&mut self, records: &[RoundRecord]) -> Result<(), OutputError> {
        records.iter().try_for_each(|r| self.write_round(r))
    }

    /// Flushes buffered rows to disk.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.rounds_writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Flushes rows and writes `summary.json`.
    pub fn write_summary(
        &mut self,
        config: &SimConfig,
        meetings: &[MeetingSummary],
    ) -> Result<(), OutputError> {
        self.flush()?;

        let summary = RunSummary {
            config: config.clone(),
            rows_written: self.rows_written,
            meetings: meetings.to_vec(),
        };
        let file = File::create(self.output_dir.join(SUMMARY_FILE))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        Ok(())
    }
}

/// Reads round records back from a `rounds.jsonl` file.
pub fn read_rounds(path: &Path) -> Result<Vec<RoundRecord>, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}

/// Reads a `summary.json` file.
pub fn read_summary(path: &Path) -> Result<RunSummary, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
