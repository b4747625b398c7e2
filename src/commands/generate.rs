//! Generate command implementation.
//!
//! The generate command:
//! 1. Builds the workload configuration (speed, dialect, filters)
//! 2. Reads the trace and synthesizes jobs
//! 3. Writes the workload document
//! 4. Optionally prints a summary

use crate::output::{write_workload, WorkloadDocument};
use crate::workload::{summarize, ColumnMap, JobField, JobSpec, WorkloadConfig, WorkloadSynthesizer};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Trace file (raw, .gz or .zip)
    pub trace: PathBuf,

    /// Speed of the target resource
    pub mips: i64,

    /// Output path for the JSON workload
    pub output_json: PathBuf,

    /// Optional JSON column map for non-standard dialects
    pub columns: Option<PathBuf>,

    /// Assign ids sequentially instead of reading column 0
    pub sequential_ids: bool,

    /// Job filters
    pub filter: JobFilter,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            mips: 1000,
            output_json: PathBuf::from("workload.json"),
            columns: None,
            sequential_ids: false,
            filter: JobFilter::default(),
            print_summary: false,
        }
    }
}

/// Bounds on accepted jobs, combined into the acceptance predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub min_processors: Option<i64>,
    pub max_processors: Option<i64>,
    pub max_runtime: Option<i64>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        *self == JobFilter::default()
    }

    pub fn matches(&self, job: &JobSpec) -> bool {
        self.min_processors.map_or(true, |min| job.processor_count >= min)
            && self.max_processors.map_or(true, |max| job.processor_count <= max)
            && self.max_runtime.map_or(true, |max| job.runtime_seconds <= max)
    }
}

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Generate command arguments
///
/// # Returns
/// Ok if generation succeeds, Err with context if any step fails
///
/// # Errors
/// * Invalid configuration (speed, column map)
/// * Trace open/decode failures
/// * File write errors
pub fn execute_generate(args: GenerateArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting generation from trace: {}", args.trace.display());

    // Step 1: Build configuration
    info!("Step 1/3: Building workload configuration...");
    let config = build_config(&args)?;
    debug!("Configuration: {:?}", config);

    // Step 2: Synthesize
    info!("Step 2/3: Synthesizing jobs...");
    let mut synthesizer = WorkloadSynthesizer::from_path(&args.trace, config)
        .context("Failed to set up workload synthesizer")?;
    let job_count = synthesizer
        .generate()
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?
        .len();

    let summary = summarize(synthesizer.jobs());
    info!("Workload: {}", summary.summary());

    // Step 3: Write output
    info!("Step 3/3: Writing workload...");
    let document = WorkloadDocument::from_synthesizer(&synthesizer);
    write_workload(&document, &args.output_json).context("Failed to write workload JSON")?;

    info!(
        "✓ {} jobs written to: {}",
        job_count,
        args.output_json.display()
    );

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("WORKLOAD SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Trace:        {}", args.trace.display());
        println!("MIPS:         {}", args.mips);
        println!("Jobs:         {}", summary.job_count);
        println!("Total length: {} MI", summary.total_length);
        println!("Max procs:    {}", summary.max_processors);
        println!("Submit span:  {}s", summary.submit_span());
        println!("Mean runtime: {:.1}s", summary.mean_runtime);
        if let Some(stats) = synthesizer.stats() {
            println!("Reading:      {}", stats.summary());
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Generation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Translate CLI arguments into a workload configuration
///
/// **Private** - internal helper for execute_generate
fn build_config(args: &GenerateArgs) -> Result<WorkloadConfig> {
    let mut columns = match &args.columns {
        Some(path) => ColumnMap::from_json_file(path)
            .with_context(|| format!("Failed to load column map {}", path.display()))?,
        None => ColumnMap::standard(),
    };

    if args.sequential_ids {
        columns = columns.without(JobField::JobId);
    }

    let mut config = WorkloadConfig::new(args.mips)?.with_columns(columns)?;

    if !args.filter.is_empty() {
        let filter = args.filter;
        config = config.with_predicate(move |job| filter.matches(job));
    }

    Ok(config)
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if args.mips <= 0 {
        anyhow::bail!("MIPS must be greater than 0");
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    let filter = &args.filter;
    if let (Some(min), Some(max)) = (filter.min_processors, filter.max_processors) {
        if min > max {
            anyhow::bail!("min-procs ({}) is greater than max-procs ({})", min, max);
        }
    }

    if filter.max_runtime.map_or(false, |max| max < 1) {
        anyhow::bail!("max-runtime must be at least 1 second");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> GenerateArgs {
        GenerateArgs {
            trace: PathBuf::from("traces/kth-sp2.swf.gz"),
            ..Default::default()
        }
    }

    fn job(processor_count: i64, runtime_seconds: i64) -> JobSpec {
        JobSpec {
            id: 1,
            runtime_seconds,
            processor_count,
            submit_delay_seconds: 0,
            computed_length: runtime_seconds,
            input_size: 1500,
            output_size: 1500,
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_trace() {
        let args = GenerateArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_non_positive_mips() {
        let args = GenerateArgs {
            mips: 0,
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_inverted_processor_bounds() {
        let args = GenerateArgs {
            filter: JobFilter {
                min_processors: Some(8),
                max_processors: Some(2),
                max_runtime: None,
            },
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_max_runtime() {
        let args = GenerateArgs {
            filter: JobFilter {
                max_runtime: Some(0),
                ..Default::default()
            },
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_job_filter_matches() {
        let filter = JobFilter {
            min_processors: Some(2),
            max_processors: Some(16),
            max_runtime: Some(3600),
        };
        assert!(filter.matches(&job(4, 60)));
        assert!(!filter.matches(&job(1, 60)));
        assert!(!filter.matches(&job(32, 60)));
        assert!(!filter.matches(&job(4, 7200)));
        assert!(JobFilter::default().matches(&job(1, 1)));
    }

    #[test]
    fn test_build_config_sequential_ids() {
        let args = GenerateArgs {
            sequential_ids: true,
            ..valid_args()
        };
        let config = build_config(&args).unwrap();
        assert!(!config.columns().has_job_id());
        assert_eq!(config.mips_rate(), 1000);
    }
}
