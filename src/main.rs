use anyhow::{bail, Context, Result};
use camsnap::camera::SnapshotFetcher;
use camsnap::common::logging_setup;
use camsnap::config_loader;
use camsnap::core::{AcquisitionLoop, RunOutcome};
use camsnap::cli;
use log::{debug, info, warn};
use std::env;
use std::fs;
use std::time::Instant;

const LOG_FILE_NAME: &str = "camsnap.log";

fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let conf_folder_name = matches
        .get_one::<String>("conf-folder-name")
        .map(|s| s.as_str())
        .unwrap_or("config");
    let conf_file_name = matches
        .get_one::<String>("conf-file-name")
        .map(|s| s.as_str())
        .unwrap_or("cameras.json");
    let snap_folder_name = matches
        .get_one::<String>("snap-folder-name")
        .map(|s| s.as_str())
        .unwrap_or("snaps");

    let config_folder = env::current_dir()
        .context("Failed to determine the current working directory")?
        .join(conf_folder_name);
    let snaps_folder = config_folder.join(snap_folder_name);
    let config_file_path = config_folder.join(conf_file_name);
    let log_file_path = config_folder.join(LOG_FILE_NAME);

    // The folders we rely on must already exist; only per-camera
    // subdirectories are created during the run.
    if !config_folder.is_dir() {
        bail!("config dir {} does not exist", config_folder.display());
    }
    if !snaps_folder.is_dir() {
        bail!("snapshot dir {} does not exist", snaps_folder.display());
    }

    logging_setup::initialize_logging(&log_file_path, &matches)
        .with_context(|| format!("Failed to open log file {}", log_file_path.display()))?;

    info!("🚀 camsnap started running");
    debug!("config folder: {}", config_folder.display());
    debug!("snaps folder: {}", snaps_folder.display());
    debug!("config file: {}", config_file_path.display());
    debug!("log file path: {}", log_file_path.display());

    if !config_file_path.exists() {
        debug!("config file does not exist so creating an empty one");
        fs::write(&config_file_path, config_loader::EMPTY_CONFIG).with_context(|| {
            format!(
                "Failed to create empty config file {}",
                config_file_path.display()
            )
        })?;
        warn!(
            "created an empty config file at {}, please fill it!",
            config_file_path.display()
        );
    }

    let camera_set = config_loader::load_camera_set(&config_file_path)
        .context("Failed to load the camera configuration")?;

    if camera_set.is_empty() {
        warn!("there are no cameras in the configuration");
    }

    let fetcher = SnapshotFetcher::new()?;
    let acquisition = AcquisitionLoop::new(fetcher, snaps_folder);

    match acquisition.run(&camera_set)? {
        RunOutcome::Completed => {
            info!(
                "🏁 done! all {} camera(s) handled in {:?}",
                camera_set.len(),
                main_start_time.elapsed()
            )
        }
        RunOutcome::Halted => {
            warn!(
                "🛑 run halted early after a camera failure, {} camera(s) configured, took {:?}",
                camera_set.len(),
                main_start_time.elapsed()
            )
        }
    }

    Ok(())
}
