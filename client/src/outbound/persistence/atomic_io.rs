//! Whole-file replacement through a temporary sibling and rename.
//!
//! A failed save leaves the previous document in place; the target is never
//! observed half-written.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::CredentialStoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary file removed on drop unless it was renamed into place.
struct PendingFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl Drop for PendingFile<'_> {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.dir.remove_file(&self.name));
        }
    }
}

/// Replace `file_name` in `dir` with `contents`.
///
/// `display_path` is only used in error messages.
///
/// # Errors
///
/// Returns [`CredentialStoreError::Io`] when the temporary file cannot be
/// written, synced or renamed over the target.
pub(super) fn write_atomic(
    dir: &Dir,
    file_name: &Utf8Path,
    display_path: &Utf8Path,
    contents: &str,
) -> Result<(), CredentialStoreError> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(target)), None) = (components.next(), components.next())
    else {
        return Err(CredentialStoreError::io(
            display_path.as_str(),
            "credential document must be a plain file name",
        ));
    };

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut pending = PendingFile {
        dir,
        name: format!(".{target}.tmp.{}.{counter}", std::process::id()),
        committed: false,
    };
    let io_error =
        |err: std::io::Error| CredentialStoreError::io(display_path.as_str(), err.to_string());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(&pending.name, &options).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.sync_all().map_err(io_error)?;
    drop(file);

    dir.rename(&pending.name, dir, target).map_err(io_error)?;
    pending.committed = true;

    // Directory sync is best effort.
    drop(dir.open(".").and_then(|parent| parent.sync_all()));
    Ok(())
}
