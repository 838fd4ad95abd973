use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use thiserror::Error;
use tracing::{debug, info};

use crate::inventory::InventoryRecord;

pub const HEADER: [&str; 2] = ["Item", "Valor"];
pub const DELIMITER: u8 = b';';

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot save {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write the record as a `;`-delimited table with an `Item;Valor` header.
///
/// Rows go to a temporary file next to `path` which only replaces
/// `path` once everything has been flushed. The result carries the
/// permissions of the file it replaces, or the umask default when new.
pub fn export_csv(path: &Path, record: &InventoryRecord) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = create_temp_in(dir).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(tmp = %tmp.path().display(), "writing inventory");

    let write_err = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(tmp);

    writer.write_record(HEADER).map_err(write_err)?;
    for entry in record.iter() {
        writer
            .write_record([entry.label.as_str(), entry.value.as_str()])
            .map_err(write_err)?;
    }

    let mut tmp = writer
        .into_inner()
        .map_err(|e| write_err(csv::Error::from(e.into_error())))?;
    tmp.flush().map_err(|e| write_err(e.into()))?;

    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|source| ExportError::Persist {
                path: path.to_path_buf(),
                source,
            })?;
    }

    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), rows = record.len(), "inventory exported");
    Ok(())
}

/// Temp file opened with 0666 so the umask decides, as for a plain create.
fn create_temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".inventory-").suffix(".tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(dir)
}
