//! SWF Workload CLI
//!
//! Reads Standard Workload Format traces (plain, .gz or .zip) and writes
//! the synthesized simulation jobs as a JSON workload document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use swf_workload::commands::{
    display_columns, display_version, execute_generate, validate_args, validate_workload_file,
    GenerateArgs, JobFilter,
};

/// SWF Workload - job synthesis from cluster traces
#[derive(Parser, Debug)]
#[command(name = "swf-workload")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize jobs from a trace
    Generate {
        /// Trace file (raw text, .gz or .zip)
        #[arg(short, long)]
        trace: PathBuf,

        /// MIPS rating of the target resource
        #[arg(short, long, env = "SWF_WORKLOAD_MIPS", allow_negative_numbers = true)]
        mips: i64,

        /// Output path for JSON workload
        #[arg(short, long, default_value = "workload.json")]
        output: PathBuf,

        /// JSON column map for non-standard trace dialects
        #[arg(long)]
        columns: Option<PathBuf>,

        /// Number jobs 1..n instead of reading the job id column
        #[arg(long)]
        no_job_id: bool,

        /// Drop jobs using fewer processors
        #[arg(long)]
        min_procs: Option<i64>,

        /// Drop jobs using more processors
        #[arg(long)]
        max_procs: Option<i64>,

        /// Drop jobs running longer (seconds)
        #[arg(long)]
        max_runtime: Option<i64>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a workload JSON file
    Validate {
        /// Path to workload JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the standard column layout
    Columns {
        /// Print the layout as a JSON column map
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Generate {
            trace,
            mips,
            output,
            columns,
            no_job_id,
            min_procs,
            max_procs,
            max_runtime,
            summary,
        } => {
            let args = GenerateArgs {
                trace,
                mips,
                output_json: output,
                columns,
                sequential_ids: no_job_id,
                filter: JobFilter {
                    min_processors: min_procs,
                    max_processors: max_procs,
                    max_runtime,
                },
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_generate(args)?;
        }

        Commands::Validate { file } => {
            validate_workload_file(file)?;
        }

        Commands::Columns { show } => {
            display_columns(show)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
