use crate::output::read_workload;
use crate::utils::config::SCHEMA_VERSION;
use crate::workload::columns::STANDARD_COLUMNS;
use crate::workload::ColumnMap;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a workload JSON file
pub fn validate_workload_file(file_path: PathBuf) -> Result<()> {
    println!("Validating workload: {}", file_path.display());

    let document = read_workload(&file_path)
        .with_context(|| format!("Invalid workload file {}", file_path.display()))?;

    println!("✓ Valid workload JSON");
    println!("  Version: {}", document.version);
    println!("  Source: {}", document.source);
    println!("  MIPS: {}", document.mips_rate);
    println!("  Jobs: {}", document.jobs.len());
    println!("  Malformed lines skipped: {}", document.stats.malformed);

    Ok(())
}

/// Display the standard column layout
pub fn display_columns(show_json: bool) -> Result<()> {
    println!("Standard Workload Format columns (0-indexed)");
    println!();

    for (field, index) in STANDARD_COLUMNS {
        let usage = if field.is_consumed() { "" } else { " (reserved)" };
        println!("  {:>2}  {}{}", index, field, usage);
    }

    println!();
    if show_json {
        let json = serde_json::to_string_pretty(&ColumnMap::standard())?;
        println!("{}", json);
    } else {
        println!("Use --show to print the map as a JSON dialect file");
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("SWF Workload v{}", env!("CARGO_PKG_VERSION"));
    println!("Workload Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Synthesizes simulation jobs from Standard Workload Format traces.");
}
