//! colsplit - split a CSV file into several files by the values of one column
//!
//! The whole input is read into memory, rows are grouped by the value of the
//! selected column, and groups are merged into output files that each hold at
//! least a configured number of rows. Each output file is named after the last
//! group merged into it.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (col)
//! - **core**: Core functionality (reader, grouping, batcher, writer, splitter, config)
//! - **models**: Data structures (config, options, report)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{Result, SplitError};
