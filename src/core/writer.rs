//! Output file naming and CSV writing.
//!
//! Atomic mode writes into a temporary file beside the destination and
//! renames it into place once every record is flushed. If the write fails
//! the temporary file is dropped and removed, and the destination is left
//! untouched.

use csv::{ByteRecord, Writer, WriterBuilder};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SplitError;

/// `<dir>/<base>_<group><ext>` for an input path `<dir>/<base><ext>`.
///
/// `<ext>` starts at the last dot of the file name, so a dotfile such as
/// `.data` has an empty base: `.data` becomes `_<group>.data`. The group key
/// goes into the name byte for byte.
pub fn output_path(input: &Path, group: &[u8]) -> PathBuf {
    let file_name = input.file_name().map(os_bytes).unwrap_or_default();
    let dot = file_name
        .iter()
        .rposition(|&b| b == b'.')
        .unwrap_or(file_name.len());
    let (base, ext) = file_name.split_at(dot);

    let mut name = Vec::with_capacity(file_name.len() + group.len() + 1);
    name.extend_from_slice(base);
    name.push(b'_');
    name.extend_from_slice(group);
    name.extend_from_slice(ext);
    input.with_file_name(os_string(name))
}

#[cfg(unix)]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(unix)]
fn os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}

#[cfg(not(unix))]
fn os_string(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes one batch of records to one output file
pub struct BatchWriter {
    atomic: bool,
}

impl BatchWriter {
    pub fn new(atomic: bool) -> Self {
        Self { atomic }
    }

    /// Write the optional title row followed by `rows` to `path`
    pub fn write(
        &self,
        path: &Path,
        title: Option<&ByteRecord>,
        rows: &[&ByteRecord],
    ) -> Result<(), SplitError> {
        if self.atomic {
            write_atomic(path, title, rows)
        } else {
            write_direct(path, title, rows)
        }
    }
}

fn write_direct(
    path: &Path,
    title: Option<&ByteRecord>,
    rows: &[&ByteRecord],
) -> Result<(), SplitError> {
    let file = File::create(path).map_err(|e| SplitError::OutputCreate(path.to_path_buf(), e))?;
    let mut writer = csv_writer(BufWriter::new(file));
    write_records(&mut writer, path, title, rows)?;

    let mut buf_writer = writer
        .into_inner()
        .map_err(|e| SplitError::OutputWrite(path.to_path_buf(), e.error().to_string()))?;
    buf_writer
        .flush()
        .map_err(|e| SplitError::OutputWrite(path.to_path_buf(), e.to_string()))?;

    debug!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

fn write_atomic(
    path: &Path,
    title: Option<&ByteRecord>,
    rows: &[&ByteRecord],
) -> Result<(), SplitError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let temp_file =
        temp_file_for(parent, path).map_err(|e| SplitError::OutputCreate(path.to_path_buf(), e))?;

    let mut writer = csv_writer(BufWriter::new(temp_file));
    write_records(&mut writer, path, title, rows)?;

    let buf_writer = writer
        .into_inner()
        .map_err(|e| SplitError::OutputWrite(path.to_path_buf(), e.error().to_string()))?;
    let temp_file = buf_writer
        .into_inner()
        .map_err(|e| SplitError::OutputWrite(path.to_path_buf(), e.error().to_string()))?;

    temp_file
        .persist(path)
        .map_err(|e| SplitError::OutputCreate(path.to_path_buf(), e.error))?;

    debug!("Wrote {} row(s) to {} (atomic)", rows.len(), path.display());
    Ok(())
}

/// Temp file in `dir` carrying the mode `File::create(dest)` would leave:
/// the destination's own mode when it exists, 0o666 less the umask otherwise
#[cfg(unix)]
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    let temp_file = tempfile::Builder::new()
        .prefix(".colsplit")
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)?;
    if let Ok(metadata) = fs::metadata(dest) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }
    Ok(temp_file)
}

#[cfg(not(unix))]
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    let temp_file = tempfile::Builder::new().prefix(".colsplit").tempfile_in(dir)?;
    if let Ok(metadata) = fs::metadata(dest) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }
    Ok(temp_file)
}

/// Records may differ in length when the input was read in flexible mode
fn csv_writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new().flexible(true).from_writer(inner)
}

fn write_records<W: Write>(
    writer: &mut Writer<W>,
    path: &Path,
    title: Option<&ByteRecord>,
    rows: &[&ByteRecord],
) -> Result<(), SplitError> {
    let to_write_error = |e: csv::Error| SplitError::OutputWrite(path.to_path_buf(), e.to_string());

    if let Some(title) = title {
        writer.write_record(title).map_err(to_write_error)?;
    }
    for row in rows {
        writer.write_record(*row).map_err(to_write_error)?;
    }
    Ok(())
}
