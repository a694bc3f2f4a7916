use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{Result, StoreError};
use crate::models::Book;

/// Content written for a fresh or blank library.
const EMPTY_LIBRARY: &[u8] = b"[]";

/// Make sure the data file exists and is not blank, creating parent folders
/// on the way. Existing content is never touched, even when it is corrupt.
pub(crate) fn ensure_initialized(path: &Path) -> Result<()> {
    let needs_seed = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
        Err(err) => return Err(StoreError::io("inspect", path, err)),
    };

    if !needs_seed {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| StoreError::io("create data directory", parent, err))?;
        }
    }

    fs::write(path, EMPTY_LIBRARY).map_err(|err| StoreError::io("create", path, err))?;
    debug!(path = %path.display(), "initialized empty library");
    Ok(())
}

/// Read the whole library. Anything that is not an array of book records
/// comes back as an empty library.
pub(crate) fn read_books(path: &Path) -> Result<Vec<Book>> {
    let raw = fs::read(path).map_err(|err| StoreError::io("read", path, err))?;

    match serde_json::from_slice::<Vec<Book>>(&raw) {
        Ok(books) => Ok(books),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "library file is not a list of books; treating it as empty"
            );
            Ok(Vec::new())
        }
    }
}

/// Replace the library on disk. The document is staged next to the target and
/// renamed over it so readers never see a partial write.
pub(crate) fn write_books(path: &Path, books: &[Book]) -> Result<()> {
    let payload = serde_json::to_vec(books)?;
    let staging = staging_path(path);

    if let Err(err) = fs::write(&staging, payload) {
        discard_staging(&staging);
        return Err(StoreError::io("write", &staging, err));
    }
    if let Err(err) = fs::rename(&staging, path) {
        discard_staging(&staging);
        return Err(StoreError::io("replace", path, err));
    }
    Ok(())
}

/// Best-effort removal of a half-written staging file. The original error is
/// what the caller needs, so a failure here is only logged.
fn discard_staging(staging: &Path) {
    if let Err(err) = fs::remove_file(staging) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %staging.display(), error = %err, "failed to remove staging file");
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("library"));
    name.push(".tmp");
    path.with_file_name(name)
}
