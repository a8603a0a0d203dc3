use crate::camera::Snapshot;
use crate::common::file_utils;
use crate::errors::SnapError;
use chrono::{DateTime, Local};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists a snapshot under `{snaps_root}/{target_subdir}/`, named
/// `{target_subdir}_{timestamp}.jpeg`.
///
/// The JPEG bytes are written verbatim, so reading the file back yields the
/// exact image the camera served. Files are write-once by convention only: a
/// second save within the same wall-clock second computes the same path and
/// overwrites the first.
pub fn save(
    snapshot: &Snapshot,
    snaps_root: &Path,
    target_subdir: &str,
    captured_at: DateTime<Local>,
) -> Result<PathBuf, SnapError> {
    let dir = snaps_root.join(target_subdir);
    file_utils::ensure_snapshot_dir(&dir)?;

    let filename = file_utils::snapshot_filename(target_subdir, captured_at);
    let path = dir.join(filename);

    fs::write(&path, &snapshot.bytes).map_err(|e| {
        SnapError::Io(format!(
            "Failed to write snapshot to '{}': {}",
            path.display(),
            e
        ))
    })?;

    info!(
        "💾 saved a {} byte snapshot to {}",
        snapshot.bytes.len(),
        path.display()
    );
    Ok(path)
}
