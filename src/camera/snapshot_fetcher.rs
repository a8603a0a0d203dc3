use crate::errors::SnapError;
use image::DynamicImage;
use log::{debug, error, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Where a camera's still endpoint lives; `{camera}` is the host segment.
pub const SNAP_URL_TEMPLATE: &str = "http://{camera}.localdomain/snap.jpeg";

/// Client-side budget for one whole snapshot request, body included.
pub const SNAP_TIMEOUT: Duration = Duration::from_secs(5);

/// A snapshot as it came off the wire: the verbatim JPEG bytes plus the
/// decoded pixels proving the body really was an image.
#[derive(Debug)]
pub struct Snapshot {
    pub image: DynamicImage,
    pub bytes: Vec<u8>,
}

/// Every way one fetch can end, classified once at the network boundary.
///
/// Decode failures are deliberately absent: a 200 body that is not an image
/// is fatal to the run and surfaces as `SnapError::Decode` instead.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Snapshot),
    Timeout,
    Transport(String),
    UnexpectedStatus(u16),
    Unknown(String),
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Success(snap) => {
                write!(f, "snapshot retrieved ({} bytes)", snap.bytes.len())
            }
            FetchOutcome::Timeout => write!(f, "request timed out"),
            FetchOutcome::Transport(detail) => write!(f, "transport failure: {}", detail),
            FetchOutcome::UnexpectedStatus(code) => {
                write!(f, "unexpected status code {} instead of 200", code)
            }
            FetchOutcome::Unknown(detail) => write!(f, "unclassified failure: {}", detail),
        }
    }
}

#[derive(Clone)]
pub struct SnapshotFetcher {
    client: Client,
    url_template: String,
    timeout: Duration,
}

impl SnapshotFetcher {
    pub fn new() -> Result<Self, SnapError> {
        Self::with_settings(SNAP_URL_TEMPLATE, SNAP_TIMEOUT)
    }

    /// Same fetcher with a custom endpoint template and timeout. The template
    /// must contain a `{camera}` placeholder for the camera name.
    pub fn with_settings(url_template: &str, timeout: Duration) -> Result<Self, SnapError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SnapError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(SnapshotFetcher {
            client,
            url_template: url_template.to_string(),
            timeout,
        })
    }

    fn snapshot_url(&self, camera_name: &str) -> String {
        self.url_template.replace("{camera}", camera_name)
    }

    /// Fetches one snapshot from `camera_name`. One GET, no retries; every
    /// network-level failure is logged here and returned as a non-success
    /// outcome, never raised.
    pub fn fetch(&self, camera_name: &str) -> Result<FetchOutcome, SnapError> {
        info!("trying to get a snapshot from '{}'", camera_name);

        let url = self.snapshot_url(camera_name);
        info!("sending a GET request for {}", url);
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(e) => return Ok(self.classify_request_error(camera_name, e)),
        };

        let status = response.status();
        info!("got a response from '{}' with status code {}", camera_name, status);

        if status != StatusCode::OK {
            error!(
                "got an unexpected status code {} instead of 200 from '{}'",
                status.as_u16(),
                camera_name
            );
            return Ok(FetchOutcome::UnexpectedStatus(status.as_u16()));
        }

        let bytes = match response.bytes() {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return Ok(self.classify_request_error(camera_name, e)),
        };

        let image = image::load_from_memory(&bytes).map_err(|e| {
            SnapError::Decode(format!(
                "camera '{}' returned a 200 body that is not a decodable image: {}",
                camera_name, e
            ))
        })?;
        debug!(
            "decoded a {}x{} snapshot ({} bytes) from '{}'",
            image.width(),
            image.height(),
            bytes.len(),
            camera_name
        );

        Ok(FetchOutcome::Success(Snapshot { image, bytes }))
    }

    /// Precedence: timeout, then any transport-level failure, then the rest.
    fn classify_request_error(&self, camera_name: &str, e: reqwest::Error) -> FetchOutcome {
        if e.is_timeout() {
            error!("'{}' did not respond within {:?}", camera_name, self.timeout);
            FetchOutcome::Timeout
        } else if e.is_connect() || e.is_request() || e.is_body() || e.is_redirect() || e.is_decode()
        {
            error!("could not manage to get the snap from '{}': {}", camera_name, e);
            FetchOutcome::Transport(e.to_string())
        } else {
            error!("a new error had occurred fetching '{}': {}", camera_name, e);
            FetchOutcome::Unknown(e.to_string())
        }
    }
}
