use clap::Parser;
use lib::{EtlConfig, PipelineError, SimpleLogger, run_job};
use lib::structs::{DEFAULT_INPUT_DIR, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_FILE};
use log::debug;
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned for .csv, .json and .xml input files
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Destination of the transformed table
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Append-only progress log
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), PipelineError> {
    let total_start = Instant::now();
    let args = Args::parse();

    if log::set_logger(&LOGGER).is_ok() {
        if args.debug {
            log::set_max_level(log::LevelFilter::Debug);
        } else {
            log::set_max_level(log::LevelFilter::Info);
        }
    }

    let config = EtlConfig {
        log_path: args.log_file,
        output_path: args.output,
        input_directory: args.input_dir,
    };
    debug!(
        "Input dir: {} | Output: {} | Log: {}",
        config.input_directory.display(),
        config.output_path.display(),
        config.log_path.display()
    );

    let summary = run_job(config)?;

    println!(
        "\nWrote {} records to {} in {:.2?}",
        summary.rows,
        summary.output_path.display(),
        total_start.elapsed()
    );
    Ok(())
}
