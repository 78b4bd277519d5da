use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "log_file.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "transformed_data.csv";
pub const DEFAULT_INPUT_DIR: &str = ".";

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One person's measurements.
///
/// Units depend on the pipeline stage: inches and pounds after extraction,
/// meters and kilograms after transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub height: f64,
    pub weight: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, height: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            height,
            weight,
        }
    }
}

/// Ordered rows sharing the fixed `name, height, weight` column set.
pub type Table = Vec<Record>;

/// Input formats understood by the extractor, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text with a header row.
    DelimitedText,
    /// One JSON object per line.
    LineRecords,
    /// XML document, one child of the root per person.
    MarkupTree,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::DelimitedText,
        SourceFormat::LineRecords,
        SourceFormat::MarkupTree,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::DelimitedText => "csv",
            SourceFormat::LineRecords => "json",
            SourceFormat::MarkupTree => "xml",
        }
    }
}

/// Locations used by a single ETL run
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub log_path: PathBuf,
    pub output_path: PathBuf,
    pub input_directory: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            input_directory: PathBuf::from(DEFAULT_INPUT_DIR),
        }
    }
}
