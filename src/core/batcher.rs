use csv::ByteRecord;

use crate::core::GroupTable;

/// Rows from one or more whole groups destined for one output file
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    /// Key of the last group merged in; names the output file
    pub last_group: &'a [u8],
    pub groups: usize,
    pub rows: Vec<&'a ByteRecord>,
}

/// Merge groups, in the given key order, into batches of at least
/// `max_lines` rows. The trailing batch may be smaller.
pub fn plan_batches<'a>(
    table: &'a GroupTable,
    keys: &[&'a [u8]],
    max_lines: usize,
) -> Vec<Batch<'a>> {
    let mut batches = Vec::new();
    let mut pending: Vec<&ByteRecord> = Vec::new();
    let mut pending_groups = 0;
    let mut last_group: &[u8] = b"";

    for &key in keys {
        last_group = key;
        pending.extend(table.rows(key));
        pending_groups += 1;

        if pending.len() >= max_lines {
            batches.push(Batch {
                last_group: key,
                groups: pending_groups,
                rows: std::mem::take(&mut pending),
            });
            pending_groups = 0;
        }
    }

    if !pending.is_empty() {
        batches.push(Batch {
            last_group,
            groups: pending_groups,
            rows: pending,
        });
    }

    batches
}
