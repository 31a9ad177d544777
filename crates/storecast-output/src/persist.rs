//! JSON persistence of fitted objects.

use crate::export::ExportError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Serialize `object` to `path` as pretty-printed JSON.
///
/// Parent directories are created when missing and an existing file is
/// replaced.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written and
/// [`ExportError::Json`] if serialization fails.
pub fn save_object<T: Serialize>(path: &Path, object: &T) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ExportError::io(parent))?;
    }

    let file = File::create(path).map_err(ExportError::io(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, object)?;
    writer.flush().map_err(ExportError::io(path))?;

    info!(path = %path.display(), "object saved");
    Ok(())
}

/// Read an object written by [`save_object`].
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be opened and
/// [`ExportError::Json`] if it does not hold a valid `T`.
pub fn load_object<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let file = File::open(path).map_err(ExportError::io(path))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
