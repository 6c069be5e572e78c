use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{load_config, Splitter};
use crate::error::SplitError;
use crate::models::{SplitOptions, SplitReport};

/// Options for the `col` command, as given on the command line
#[derive(Debug, Default)]
pub struct ColOptions {
    /// 1-based column override
    pub column: Option<usize>,
    /// Flush threshold override
    pub line: Option<usize>,
    pub sort: bool,
    pub tile: bool,
    /// Plan the split without writing files
    pub dry_run: bool,
}

/// Split `input` by column, using colsplit.toml from `config_dir` for defaults
pub fn split_by_column(
    config_dir: &PathBuf,
    input: &Path,
    options: ColOptions,
) -> Result<SplitReport, SplitError> {
    let config = load_config(
        config_dir,
        options.column,
        options.line,
        options.sort,
        options.tile,
    )?;

    let split_options = SplitOptions::from_config(&config)?.with_dry_run(options.dry_run);
    let splitter = Splitter::new(split_options);
    let report = splitter.run(input)?;

    info!(
        "Split {} into {} file(s)",
        input.display(),
        report.files.len()
    );

    Ok(report)
}

/// Print the report to stdout
pub fn print_split_report(report: &SplitReport, json: bool) -> Result<(), SplitError> {
    if json {
        let rendered = serde_json::to_string_pretty(report)?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("=== Split Result ===\n");
    print!("{}", report);
    if report.dry_run {
        println!("\nRun without --dry-run to write the files.");
    }
    Ok(())
}
