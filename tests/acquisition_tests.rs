mod common;

use camsnap::camera::SnapshotFetcher;
use camsnap::config_loader::CameraSet;
use camsnap::core::{AcquisitionLoop, RunOutcome};
use camsnap::errors::SnapError;
use common::{camera_set, tiny_jpeg};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_loop(
    acquisition: AcquisitionLoop,
    cameras: CameraSet,
) -> Result<RunOutcome, SnapError> {
    tokio::task::spawn_blocking(move || acquisition.run(&cameras))
        .await
        .unwrap()
}

async fn fetcher_for(server: &MockServer) -> SnapshotFetcher {
    let template = format!("{}/{{camera}}/snap.jpeg", server.uri());
    build_fetcher(template, Duration::from_secs(5)).await
}

/// Building the blocking client also must happen off the runtime thread.
async fn build_fetcher(template: String, timeout: Duration) -> SnapshotFetcher {
    tokio::task::spawn_blocking(move || {
        SnapshotFetcher::with_settings(&template, timeout).unwrap()
    })
    .await
    .unwrap()
}

fn snapshot_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn all_cameras_succeeding_completes_with_one_file_each() {
    let server = MockServer::start().await;
    for camera in ["cam1", "cam2"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}/snap.jpeg", camera)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
            .mount(&server)
            .await;
    }
    let snaps_root = tempfile::tempdir().unwrap();
    let acquisition =
        AcquisitionLoop::new(fetcher_for(&server).await, snaps_root.path().to_path_buf());

    let outcome = run_loop(acquisition, camera_set(&[("cam1", "front"), ("cam2", "back")]))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    for subdir in ["front", "back"] {
        let files = snapshot_files(&snaps_root.path().join(subdir));
        assert_eq!(files.len(), 1, "expected one snapshot in {}/", subdir);
        assert!(files[0].starts_with(&format!("{}_", subdir)));
        assert!(files[0].ends_with(".jpeg"));
    }
}

#[tokio::test]
async fn first_failure_halts_and_later_cameras_are_never_contacted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cam-a/snap.jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cam-b/snap.jpeg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cam-c/snap.jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
        .expect(0)
        .mount(&server)
        .await;

    let snaps_root = tempfile::tempdir().unwrap();
    let acquisition =
        AcquisitionLoop::new(fetcher_for(&server).await, snaps_root.path().to_path_buf());
    let cameras = camera_set(&[("cam-a", "front"), ("cam-b", "back"), ("cam-c", "garage")]);

    let outcome = run_loop(acquisition, cameras).await.unwrap();

    assert_eq!(outcome, RunOutcome::Halted);
    assert_eq!(snapshot_files(&snaps_root.path().join("front")).len(), 1);
    assert!(!snaps_root.path().join("back").exists());
    assert!(!snaps_root.path().join("garage").exists());
    server.verify().await;
}

#[tokio::test]
async fn refused_connection_on_second_camera_leaves_only_the_first_file() {
    // Two local ports; the lexicographically smaller address gets the live
    // server so the healthy camera is iterated first.
    let l1 = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let l2 = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let a1 = l1.local_addr().unwrap().to_string();
    let a2 = l2.local_addr().unwrap().to_string();
    let (live_listener, live_addr, dead_listener, dead_addr) = if a1 < a2 {
        (l1, a1, l2, a2)
    } else {
        (l2, a2, l1, a1)
    };
    drop(dead_listener);

    let server = MockServer::builder().listener(live_listener).start().await;
    Mock::given(method("GET"))
        .and(path("/snap.jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
        .mount(&server)
        .await;

    let fetcher =
        build_fetcher("http://{camera}/snap.jpeg".to_string(), Duration::from_secs(5)).await;
    let snaps_root = tempfile::tempdir().unwrap();
    let acquisition = AcquisitionLoop::new(fetcher, snaps_root.path().to_path_buf());
    let cameras = camera_set(&[(live_addr.as_str(), "front"), (dead_addr.as_str(), "back")]);

    let outcome = run_loop(acquisition, cameras).await.unwrap();

    assert_eq!(outcome, RunOutcome::Halted);
    let files = snapshot_files(&snaps_root.path().join("front"));
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("front_"));
    assert!(!snaps_root.path().join("back").exists());
}

#[tokio::test]
async fn empty_camera_set_completes_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
        .expect(0)
        .mount(&server)
        .await;

    let snaps_root = tempfile::tempdir().unwrap();
    let acquisition =
        AcquisitionLoop::new(fetcher_for(&server).await, snaps_root.path().to_path_buf());

    let outcome = run_loop(acquisition, CameraSet::default()).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(snapshot_files(snaps_root.path()).len(), 0);
    server.verify().await;
}

#[tokio::test]
async fn continue_on_error_skips_the_failed_camera_instead_of_halting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cam-a/snap.jpeg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cam-b/snap.jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
        .mount(&server)
        .await;

    let snaps_root = tempfile::tempdir().unwrap();
    let acquisition = AcquisitionLoop::new(fetcher_for(&server).await, snaps_root.path().to_path_buf())
        .with_continue_on_error(true);
    let cameras = camera_set(&[("cam-a", "front"), ("cam-b", "back")]);

    let outcome = run_loop(acquisition, cameras).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(!snaps_root.path().join("front").exists());
    assert_eq!(snapshot_files(&snaps_root.path().join("back")).len(), 1);
}
