use crate::error::Result;
use crate::extract::extract;
use crate::load::write_csv;
use crate::progress::{Phase, ProgressLog};
use crate::structs::{EtlConfig, Record, Table};
use crate::transform::transform;
use log::debug;
use std::path::PathBuf;

/// Position of a run in the fixed ETL sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobState {
    Started,
    Extracting,
    Extracted,
    Transforming,
    Transformed,
    Loading,
    Loaded,
    Ended,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: usize,
    pub output_path: PathBuf,
    pub final_state: JobState,
}

/// Drives one run through extract, transform and load.
///
/// Each phase is bracketed by Started/Ended lines in the progress log. The first
/// error stops the run where it is: the failing phase keeps its Started line
/// without a matching Ended line and nothing after it runs.
pub struct EtlJob {
    config: EtlConfig,
    log: ProgressLog,
    state: JobState,
}

impl EtlJob {
    pub fn new(config: EtlConfig) -> Self {
        let log = ProgressLog::new(config.log_path.clone());
        Self {
            config,
            log,
            state: JobState::Started,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    fn advance(&mut self, next: JobState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn begin(&mut self, phase: Phase, next: JobState) -> Result<()> {
        self.log.log_progress(phase.started())?;
        self.advance(next);
        Ok(())
    }

    fn finish(&mut self, phase: Phase, next: JobState) -> Result<()> {
        self.log.log_progress(phase.ended())?;
        self.advance(next);
        debug!("{} phase complete", phase);
        Ok(())
    }

    /// Runs every phase in order and returns a summary of the written table.
    ///
    /// # Errors
    /// Returns the first I/O, parse or malformed document error; `state()` then
    /// reports the phase the run stopped in.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.log.log_progress(Phase::Job.started())?;

        self.begin(Phase::Extract, JobState::Extracting)?;
        let extracted = extract(&self.config)?;
        self.finish(Phase::Extract, JobState::Extracted)?;

        self.begin(Phase::Transform, JobState::Transforming)?;
        let transformed = transform(extracted);
        println!("Transformed Data");
        println!("{}", render_table(&transformed));
        self.finish(Phase::Transform, JobState::Transformed)?;

        self.begin(Phase::Load, JobState::Loading)?;
        write_csv(&transformed, &self.config.output_path)?;
        self.finish(Phase::Load, JobState::Loaded)?;

        self.log.log_progress(Phase::Job.ended())?;
        self.advance(JobState::Ended);

        Ok(RunSummary {
            rows: transformed.len(),
            output_path: self.config.output_path.clone(),
            final_state: self.state,
        })
    }
}

/// Runs a complete job with `config`.
pub fn run_job(config: EtlConfig) -> Result<RunSummary> {
    EtlJob::new(config).run()
}

/// Formats rows as an aligned text table with a leading row index.
pub fn render_table(table: &Table) -> String {
    let name_width = table
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(4);
    let index_width = table.len().saturating_sub(1).to_string().len();

    let mut out = format!(
        "{:>iw$}  {:<nw$}  {:>8}  {:>8}",
        "",
        "name",
        "height",
        "weight",
        iw = index_width,
        nw = name_width
    );
    for (i, Record { name, height, weight }) in table.iter().enumerate() {
        out.push_str(&format!(
            "\n{:>iw$}  {:<nw$}  {:>8.2}  {:>8.2}",
            i,
            name,
            height,
            weight,
            iw = index_width,
            nw = name_width
        ));
    }
    out
}
