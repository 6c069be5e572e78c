use serde::Serialize;

use crate::error::SplitError;
use crate::models::Config;

/// Order in which groups are merged into output batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Order in which each key first appears in the input
    FirstSeen,
    /// Ascending row count, ties in first-seen order
    AscendingCount,
}

/// Validated options for one split run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// 1-based column to split by
    pub column: usize,
    /// Minimum accumulated rows before a batch is flushed
    pub max_lines: usize,
    pub order: GroupOrder,
    /// First row is a title row copied into every output
    pub include_title: bool,
    /// Accept records with a varying number of fields
    pub flexible: bool,
    pub atomic_writes: bool,
    /// Plan the split without writing any files
    pub dry_run: bool,
}

impl SplitOptions {
    /// Build options, rejecting out-of-range column and line values
    pub fn new(column: usize, max_lines: usize) -> Result<Self, SplitError> {
        if max_lines < 1 {
            return Err(SplitError::InvalidLineLimit(max_lines));
        }
        if column < 1 {
            return Err(SplitError::InvalidColumn(column));
        }
        Ok(Self {
            column,
            max_lines,
            order: GroupOrder::FirstSeen,
            include_title: false,
            flexible: false,
            atomic_writes: true,
            dry_run: false,
        })
    }

    /// Build options from a fully merged config
    pub fn from_config(config: &Config) -> Result<Self, SplitError> {
        let mut options = Self::new(config.split.column, config.split.line)?;
        options.order = if config.split.sort {
            GroupOrder::AscendingCount
        } else {
            GroupOrder::FirstSeen
        };
        options.include_title = config.split.tile;
        options.flexible = config.csv.flexible;
        options.atomic_writes = config.output.atomic_writes;
        Ok(options)
    }

    /// 0-based index of the split column
    pub fn column_index(&self) -> usize {
        self.column - 1
    }

    pub fn sorted(mut self, sort: bool) -> Self {
        self.order = if sort {
            GroupOrder::AscendingCount
        } else {
            GroupOrder::FirstSeen
        };
        self
    }

    pub fn with_title(mut self, include_title: bool) -> Self {
        self.include_title = include_title;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
