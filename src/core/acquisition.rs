use crate::camera::{FetchOutcome, SnapshotFetcher};
use crate::config_loader::CameraSet;
use crate::core::snapshot_writer;
use crate::errors::SnapError;
use chrono::Local;
use log::{error, info};
use std::path::PathBuf;
use std::time::Instant;

/// How one run of the loop ended. Both are normal process termination; the
/// log stream is the only place the difference shows up externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every camera in the set was attempted and succeeded.
    Completed,
    /// A fetch failed and the remaining cameras were never contacted.
    Halted,
}

pub struct AcquisitionLoop {
    fetcher: SnapshotFetcher,
    snaps_root: PathBuf,
    /// Halt-on-first-failure is the reference behavior: one unreachable
    /// camera silences every camera after it in iteration order for the run.
    continue_on_error: bool,
}

impl AcquisitionLoop {
    pub fn new(fetcher: SnapshotFetcher, snaps_root: PathBuf) -> Self {
        AcquisitionLoop {
            fetcher,
            snaps_root,
            continue_on_error: false,
        }
    }

    /// Opts in to per-camera isolation: a failed camera is skipped instead
    /// of ending the run. Off by default to match the reference policy.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Walks the camera set in iteration order, fetching one snapshot per
    /// camera and persisting each success.
    ///
    /// Network failures end the run early with `RunOutcome::Halted`. Decode
    /// and filesystem errors are not recovered and propagate out.
    pub fn run(&self, cameras: &CameraSet) -> Result<RunOutcome, SnapError> {
        info!("going over all of the cameras getting some nice pics");
        let start_time = Instant::now();

        for (camera_name, target_subdir) in cameras.iter() {
            match self.fetcher.fetch(camera_name)? {
                FetchOutcome::Success(snapshot) => {
                    snapshot_writer::save(&snapshot, &self.snaps_root, target_subdir, Local::now())?;
                }
                failure => {
                    if self.continue_on_error {
                        error!(
                            "skipping camera '{}' after failure: {}",
                            camera_name, failure
                        );
                        continue;
                    }
                    error!(
                        "halting acquisition after failure from '{}': {}",
                        camera_name, failure
                    );
                    return Ok(RunOutcome::Halted);
                }
            }
        }

        info!(
            "✅ acquisition pass over {} camera(s) finished in {:?}",
            cameras.len(),
            start_time.elapsed()
        );
        Ok(RunOutcome::Completed)
    }
}
