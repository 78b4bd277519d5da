use crate::error::Result;
use chrono::{DateTime, Local, TimeZone};
use log::info;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Year-MonthName-Day-Hour:Minute:Second, e.g. `2026-Oct-19-14:03:07`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Logical stages of the job, each bracketed by a Started/Ended line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Job,
    Extract,
    Transform,
    Load,
}

impl Phase {
    pub fn started(self) -> &'static str {
        match self {
            Phase::Job => "ETL Job Started",
            Phase::Extract => "Extract phase Started",
            Phase::Transform => "Transform phase Started",
            Phase::Load => "Load phase Started",
        }
    }

    pub fn ended(self) -> &'static str {
        match self {
            Phase::Job => "ETL Job Ended",
            Phase::Extract => "Extract phase Ended",
            Phase::Transform => "Transform phase Ended",
            Phase::Load => "Load phase Ended",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Job => "job",
            Phase::Extract => "extract",
            Phase::Transform => "transform",
            Phase::Load => "load",
        };
        f.write_str(name)
    }
}

/// Append-only progress log.
///
/// Every call opens the file in append mode, writes one
/// `<timestamp>,<message>` line and closes it again; no handle is held
/// between calls.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `message` stamped with the current local time.
    ///
    /// # Errors
    /// Returns an I/O error if the log file cannot be opened or written.
    pub fn log_progress(&self, message: &str) -> Result<()> {
        self.log_progress_at(Local::now(), message)
    }

    pub fn log_progress_at<Tz: TimeZone>(&self, at: DateTime<Tz>, message: &str) -> Result<()>
    where
        Tz::Offset: fmt::Display,
    {
        let line = format_line(&at, message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        info!("{message}");
        Ok(())
    }
}

fn format_line<Tz: TimeZone>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{},{}\n", at.format(TIMESTAMP_FORMAT), message)
}
