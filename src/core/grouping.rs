use csv::ByteRecord;
use std::collections::HashMap;
use std::path::Path;

use crate::error::SplitError;
use crate::models::GroupOrder;

/// Rows bucketed by the raw bytes of one column
#[derive(Debug, Default)]
pub struct GroupTable {
    /// Rows per key, in file order
    groups: HashMap<Vec<u8>, Vec<ByteRecord>>,
    /// Distinct keys in first-seen order
    first_seen: Vec<Vec<u8>>,
}

impl GroupTable {
    /// Group rows from `path` by the field at `column_index`.
    ///
    /// A row without that field fails the whole table with `RowTooShort`;
    /// every row ends up in exactly one group.
    pub fn build(
        path: &Path,
        rows: Vec<ByteRecord>,
        column_index: usize,
    ) -> Result<Self, SplitError> {
        let mut table = Self::default();
        for (index, row) in rows.into_iter().enumerate() {
            let Some(key) = row.get(column_index) else {
                return Err(SplitError::RowTooShort {
                    path: path.to_path_buf(),
                    record: row.position().map(|p| p.line() as usize).unwrap_or(index + 1),
                    column: column_index + 1,
                    fields: row.len(),
                });
            };
            let key = key.to_vec();
            match table.groups.get_mut(&key) {
                Some(group) => group.push(row),
                None => {
                    table.first_seen.push(key.clone());
                    table.groups.insert(key, vec![row]);
                }
            }
        }
        Ok(table)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Total number of rows across all groups
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Rows for a key, in file order
    pub fn rows(&self, key: &[u8]) -> &[ByteRecord] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys in the order their groups should be merged into batches
    pub fn ordered_keys(&self, order: GroupOrder) -> Vec<&[u8]> {
        let mut keys: Vec<&[u8]> = self.first_seen.iter().map(Vec::as_slice).collect();
        if order == GroupOrder::AscendingCount {
            // sort_by_key is stable: equal counts stay in first-seen order
            keys.sort_by_key(|key| self.rows(key).len());
        }
        keys
    }
}
