pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod progress;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{ErrorKind, PipelineError, Result};
pub use extract::{discover_files, extract, read_csv, read_json_lines, read_xml, reader_for};
pub use load::write_csv;
pub use pipeline::{EtlJob, JobState, RunSummary, render_table, run_job};
pub use progress::{Phase, ProgressLog, TIMESTAMP_FORMAT};
pub use structs::{EtlConfig, Record, SimpleLogger, SourceFormat, Table};
pub use transform::{inches_to_meters, pounds_to_kilograms, transform};
