use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::{output_path, plan_batches, read_input, BatchWriter, GroupTable, InputTable};
use crate::error::SplitError;
use crate::models::{OutputFile, SplitOptions, SplitReport};

/// Splits one CSV file into several, grouped by one column
pub struct Splitter {
    options: SplitOptions,
    writer: BatchWriter,
}

impl Splitter {
    pub fn new(options: SplitOptions) -> Self {
        let writer = BatchWriter::new(options.atomic_writes);
        Self { options, writer }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Read, group and write `input` in a single pass.
    ///
    /// Output files land next to the input. A failed write stops the run;
    /// files already written are kept. When two batches name the same file,
    /// the later one replaces the earlier and is flagged in the report.
    pub fn run(&self, input: &Path) -> Result<SplitReport, SplitError> {
        let InputTable { title, rows, .. } = read_input(input, &self.options)?;
        let total_rows = rows.len();

        let table = GroupTable::build(input, rows, self.options.column_index())?;
        info!(
            "Grouped {} row(s) of {} into {} group(s) by column {}",
            total_rows,
            input.display(),
            table.len(),
            self.options.column
        );

        let keys = table.ordered_keys(self.options.order);
        let batches = plan_batches(&table, &keys, self.options.max_lines);
        debug!(
            "Planned {} output file(s) with threshold {}",
            batches.len(),
            self.options.max_lines
        );

        let mut files: Vec<OutputFile> = Vec::with_capacity(batches.len());
        // Resolved paths of files written so far in this run
        let mut written: Vec<PathBuf> = Vec::new();
        for batch in &batches {
            let path = output_path(input, batch.last_group);

            // Different keys can still resolve to one file, e.g. through `..`
            let replaces_earlier = files.iter().any(|f| f.path == path)
                || fs::canonicalize(&path).is_ok_and(|resolved| written.contains(&resolved));
            if replaces_earlier {
                warn!(
                    "{} is written more than once; earlier rows in it will be replaced",
                    path.display()
                );
            }

            if self.options.dry_run {
                debug!("Would write {} row(s) to {}", batch.rows.len(), path.display());
            } else {
                self.writer.write(&path, title.as_ref(), &batch.rows)?;
                info!("Wrote {} row(s) to {}", batch.rows.len(), path.display());
                if let Ok(resolved) = fs::canonicalize(&path) {
                    written.push(resolved);
                }
            }

            files.push(OutputFile {
                path,
                last_group: String::from_utf8_lossy(batch.last_group).into_owned(),
                groups: batch.groups,
                rows: batch.rows.len(),
                replaces_earlier,
            });
        }

        Ok(SplitReport {
            input: input.to_path_buf(),
            column: self.options.column,
            order: self.options.order,
            include_title: self.options.include_title,
            total_rows,
            total_groups: table.len(),
            dry_run: self.options.dry_run,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupOrder;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_split_first_seen() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "a.csv", "x,1\ny,2\nx,3\n");

        let report = Splitter::new(SplitOptions::new(1, 1).unwrap())
            .run(&input)
            .unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.total_groups, 2);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].last_group, "x");
        assert!(report.files.iter().all(|f| !f.replaces_earlier));
        assert_eq!(report.order, GroupOrder::FirstSeen);

        let x = fs::read_to_string(temp_dir.path().join("a_x.csv")).unwrap();
        assert_eq!(x, "x,1\nx,3\n");
        let y = fs::read_to_string(temp_dir.path().join("a_y.csv")).unwrap();
        assert_eq!(y, "y,2\n");
    }

    #[test]
    fn test_split_sorted_processes_small_groups_first() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "a.csv", "x,1\ny,2\nx,3\n");
        let options = SplitOptions::new(1, 1).unwrap().sorted(true);

        let report = Splitter::new(options).run(&input).unwrap();

        let order: Vec<&str> = report.files.iter().map(|f| f.last_group.as_str()).collect();
        assert_eq!(order, vec!["y", "x"]);
    }

    #[test]
    fn test_title_is_copied_to_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "t.csv", "city,n\nrome,1\noslo,2\nrome,3\n");
        let options = SplitOptions::new(1, 1).unwrap().with_title(true);

        let report = Splitter::new(options).run(&input).unwrap();
        assert_eq!(report.total_rows, 3);

        for file in &report.files {
            let content = fs::read_to_string(&file.path).unwrap();
            assert!(content.starts_with("city,n\n"));
        }
        // The title row is never grouped
        assert!(!temp_dir.path().join("t_city.csv").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "a.csv", "x,1\ny,2\n");
        let options = SplitOptions::new(1, 1).unwrap().with_dry_run(true);

        let report = Splitter::new(options).run(&input).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.files.len(), 2);
        assert!(!report.files[0].path.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "bad.csv", "x,1\ny,2\nz\n");

        let err = Splitter::new(SplitOptions::new(1, 1).unwrap())
            .run(&input)
            .unwrap_err();

        assert!(matches!(err, SplitError::Parse(..)));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_failure_keeps_earlier_files() {
        let temp_dir = TempDir::new().unwrap();
        // The second group names a file inside a directory that does not exist
        let input = write_input(&temp_dir, "a.csv", "ok,1\nno/such,2\n");

        let err = Splitter::new(SplitOptions::new(1, 1).unwrap())
            .run(&input)
            .unwrap_err();

        assert!(matches!(err, SplitError::OutputCreate(..)));
        assert!(temp_dir.path().join("a_ok.csv").exists());
    }

    #[test]
    fn test_non_utf8_fields_are_split_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.csv");
        fs::write(&input, b"x,\xB1\xB1\xBE\xA9\ny,2\n").unwrap();

        let report = Splitter::new(SplitOptions::new(1, 1).unwrap())
            .run(&input)
            .unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(
            fs::read(temp_dir.path().join("a_x.csv")).unwrap(),
            b"x,\xB1\xB1\xBE\xA9\n"
        );
        assert_eq!(fs::read(temp_dir.path().join("a_y.csv")).unwrap(), b"y,2\n");
    }

    #[test]
    fn test_later_flush_to_same_file_wins() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("a_y")).unwrap();
        // "y/../a_x" names a_y/../a_x.csv, which is the same file as a_x.csv
        let input = write_input(&temp_dir, "a.csv", "x,1\ny/../a_x,2\n");

        let report = Splitter::new(SplitOptions::new(1, 1).unwrap())
            .run(&input)
            .unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(!report.files[0].replaces_earlier);
        assert!(report.files[1].replaces_earlier);
        let content = fs::read_to_string(temp_dir.path().join("a_x.csv")).unwrap();
        assert_eq!(content, "y/../a_x,2\n");
    }

    #[test]
    fn test_short_row_in_flexible_input_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(&temp_dir, "a.csv", "x,1\ny\n");
        let mut options = SplitOptions::new(2, 1).unwrap();
        options.flexible = true;

        let err = Splitter::new(options).run(&input).unwrap_err();

        assert!(matches!(err, SplitError::RowTooShort { record: 2, .. }));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
