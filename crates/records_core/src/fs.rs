//! Filesystem helpers shared by the file-based codecs.
//!
//! Inputs that do not exist are reported as [`RecordError::ResourceNotFound`].
//! Outputs are written to a temporary file next to the destination and only
//! persisted over it once the write has completed and been flushed.

use crate::{RecordError, Result};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Returns `<dir>/<name>.<extension>`.
///
/// A leading dot on `extension` is accepted and ignored.
pub fn collection_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        dir.join(name)
    } else {
        dir.join(format!("{}.{}", name, extension))
    }
}

/// Opens an existing file for reading.
pub fn open_existing(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => RecordError::not_found(path.display().to_string()),
        _ => RecordError::Io(err),
    })
}

/// Writes `path` through a temporary file in the same directory.
///
/// `write` receives a buffered writer; if it fails, the destination is left
/// untouched and the temporary file is removed.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|err| match err.kind() {
        ErrorKind::NotFound => RecordError::not_found(dir.display().to_string()),
        _ => RecordError::Io(err),
    })?;

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    file.as_file().sync_all()?;

    debug!("Persisting {}", path.display());
    file.persist(path).map_err(|err| RecordError::Io(err.error))?;
    Ok(())
}
