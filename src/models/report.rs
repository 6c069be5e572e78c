use serde::Serialize;
use std::path::PathBuf;

use crate::models::GroupOrder;

/// One output file produced (or planned, in a dry run) by a split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    /// Key of the last group merged into this file; names the file
    pub last_group: String,
    /// Number of whole groups merged into this file
    pub groups: usize,
    /// Data rows written, title row excluded
    pub rows: usize,
    /// An earlier file of the same run had this path and was overwritten
    pub replaces_earlier: bool,
}

/// Summary of a split run
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub column: usize,
    pub order: GroupOrder,
    pub include_title: bool,
    /// Data rows read, title row excluded
    pub total_rows: usize,
    pub total_groups: usize,
    pub dry_run: bool,
    pub files: Vec<OutputFile>,
}

impl std::fmt::Display for SplitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dry_run {
            writeln!(f, "[DRY RUN] Input: {}", self.input.display())?;
        } else {
            writeln!(f, "Input: {}", self.input.display())?;
        }
        writeln!(
            f,
            "Rows: {} | Groups: {} | Files: {}",
            self.total_rows,
            self.total_groups,
            self.files.len()
        )?;

        for file in &self.files {
            let group_word = if file.groups == 1 { "group" } else { "groups" };
            write!(
                f,
                "  {} ({} rows, {} {})",
                file.path.display(),
                file.rows,
                file.groups,
                group_word
            )?;
            if file.replaces_earlier {
                write!(f, " [replaces earlier file]")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
