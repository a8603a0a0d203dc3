use chrono::{DateTime, Local};

/// Timestamp layout embedded in snapshot filenames, e.g. `24_03_05__07_09_02`.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%y_%m_%d__%H_%M_%S";

// Format a capture instant with the filename timestamp layout
pub fn format_capture_timestamp(at: DateTime<Local>) -> String {
    at.format(FILENAME_TIMESTAMP_FORMAT).to_string()
}
