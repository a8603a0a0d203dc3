use crate::errors::SnapError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// What a missing config file is seeded with at startup.
pub const EMPTY_CONFIG: &str = "{\"cameras\": []}";

/// On-disk layout: a top-level `cameras` key holding a sequence of
/// single-entry objects, each mapping one camera name to one folder name.
#[derive(Debug, Deserialize)]
struct RawConfig {
    cameras: Vec<BTreeMap<String, String>>,
}

/// The effective camera set: camera name to target subdirectory.
///
/// Built by merging the config's single-entry fragments; a name appearing in
/// more than one fragment is resolved last-write-wins. Iteration follows the
/// map's key order, which carries no semantic guarantee.
#[derive(Debug, Clone, Default)]
pub struct CameraSet {
    cameras: BTreeMap<String, String>,
}

impl CameraSet {
    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = BTreeMap<String, String>>,
    {
        let mut cameras = BTreeMap::new();
        for fragment in fragments {
            for (name, subdir) in fragment {
                if let Some(previous) = cameras.insert(name.clone(), subdir) {
                    debug!(
                        "camera '{}' appears more than once in the configuration, dropping earlier folder '{}'",
                        name, previous
                    );
                }
            }
        }
        CameraSet { cameras }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cameras.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

pub fn load_camera_set(path: &Path) -> Result<CameraSet, SnapError> {
    debug!("📄 Attempting to load config from: {}", path.display());
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path).map_err(|e| {
        SnapError::Config(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let raw: RawConfig = serde_json::from_str(&config_str).map_err(|e| {
        SnapError::Config(format!(
            "Failed to parse JSON configuration from '{}': {}",
            path.display(),
            e
        ))
    })?;

    let camera_set = CameraSet::from_fragments(raw.cameras);
    info!(
        "✅ Loaded {} camera(s) from '{}' in {:?}",
        camera_set.len(),
        path.display(),
        start_time.elapsed()
    );
    Ok(camera_set)
}
