use crate::common::timestamp_utils;
use crate::errors::SnapError;
use chrono::{DateTime, Local};
use log::debug;
use std::path::Path;

pub fn snapshot_filename(target_subdir: &str, captured_at: DateTime<Local>) -> String {
    let timestamp = timestamp_utils::format_capture_timestamp(captured_at);
    format!("{}_{}.jpeg", target_subdir, timestamp)
}

/// Ensures the per-camera snapshot directory exists, creating it if absent.
///
/// Creation is deliberately non-recursive: only the immediate subdirectory is
/// created, so a missing snaps root fails instead of being silently built.
pub fn ensure_snapshot_dir(dir_path: &Path) -> Result<(), SnapError> {
    if !dir_path.exists() {
        debug!(
            "snapshot directory '{}' does not exist, creating it",
            dir_path.display()
        );
        std::fs::create_dir(dir_path).map_err(|e| {
            SnapError::Io(format!(
                "Failed to create snapshot directory '{}': {}",
                dir_path.display(),
                e
            ))
        })?;
    } else if !dir_path.is_dir() {
        return Err(SnapError::Io(format!(
            "Snapshot path '{}' exists but is not a directory.",
            dir_path.display()
        )));
    }
    Ok(())
}
