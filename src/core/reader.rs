use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SplitError;
use crate::models::SplitOptions;

/// Fully parsed input file
#[derive(Debug, Clone)]
pub struct InputTable {
    pub path: PathBuf,
    /// First record, when it is treated as a title row
    pub title: Option<ByteRecord>,
    /// Data rows in file order
    pub rows: Vec<ByteRecord>,
}

/// Parse the whole input file, then validate it against the options.
///
/// Fields are kept as raw bytes, so only CSV syntax errors count as
/// malformed input; the text encoding of a field is never checked.
/// Nothing is written before this returns, so a malformed file never
/// produces partial output.
pub fn read_input(path: &Path, options: &SplitOptions) -> Result<InputTable, SplitError> {
    let file = File::open(path).map_err(|e| SplitError::InputOpen(path.to_path_buf(), e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(options.flexible)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| SplitError::Parse(path.to_path_buf(), e))?;
        records.push(record);
    }

    debug!("Parsed {} record(s) from {}", records.len(), path.display());

    validate_records(path, &records, options.column)?;

    let (title, rows) = if options.include_title {
        let rows = records.split_off(1);
        (records.pop(), rows)
    } else {
        (None, records)
    };

    Ok(InputTable {
        path: path.to_path_buf(),
        title,
        rows,
    })
}

/// Check that the first record, then every other record, reaches `column`
fn validate_records(
    path: &Path,
    records: &[ByteRecord],
    column: usize,
) -> Result<(), SplitError> {
    let first = records
        .first()
        .ok_or_else(|| SplitError::EmptyInput(path.to_path_buf()))?;

    if first.len() < column {
        return Err(SplitError::ColumnOutOfRange {
            path: path.to_path_buf(),
            column,
            fields: first.len(),
        });
    }

    for (index, record) in records.iter().enumerate() {
        if record.len() < column {
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            return Err(SplitError::RowTooShort {
                path: path.to_path_buf(),
                record: line,
                column,
                fields: record.len(),
            });
        }
    }

    Ok(())
}
