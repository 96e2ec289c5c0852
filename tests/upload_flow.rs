// SPDX-License-Identifier: MPL-2.0
//! End-to-end upload flow: offer, filter, analyze, results.

use minerama::catalog::Catalog;
use minerama::media::FileHandle;
use minerama::session::{Phase, Session, SubmitError, Transition};
use minerama::ui::upload_surface::{DragPresentation, UploadSurface};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(4000);
const SETTLE: Duration = Duration::from_millis(150);

fn handle(name: &str, size: u64, media_type: &str) -> FileHandle {
    FileHandle::new(PathBuf::from("/uploads").join(name), size, media_type)
}

#[test]
fn mixed_offer_keeps_only_the_video_and_reaches_results() {
    let surface = UploadSurface::new(SETTLE);
    let mut session = Session::new(DELAY);
    let catalog = Catalog::load_embedded().expect("embedded catalog");
    let start = Instant::now();

    let batch = surface
        .offer(vec![
            handle("a.mp4", 1_048_576, "video/mp4"),
            handle("b.txt", 12, "text/plain"),
        ])
        .expect("one video accepted");
    assert_eq!(batch.len(), 1);

    session.submit_files(batch, start).expect("idle session accepts");
    assert!(session.phase().is_analyzing());

    assert_eq!(session.tick(start + DELAY - Duration::from_millis(1)), None);
    assert_eq!(session.tick(start + DELAY), Some(Transition::ResultsReady));
    assert_eq!(session.phase(), &Phase::ShowingResults { selected: None });

    let echo = session.uploaded_files();
    assert_eq!(echo.len(), 1);
    assert_eq!(echo[0].name, "a.mp4");
    assert_eq!(echo[0].size_label(), "1.00 MB");
    assert_eq!(catalog.len(), 5);
}

#[test]
fn offer_without_videos_changes_nothing() {
    let surface = UploadSurface::new(SETTLE);
    let session = Session::new(DELAY);

    let batch = surface.offer(vec![
        handle("notes.txt", 10, "text/plain"),
        handle("cover.png", 2048, "image/png"),
    ]);

    assert!(batch.is_none());
    assert!(session.phase().is_idle());
    assert!(session.uploaded_files().is_empty());
}

#[test]
fn zero_delay_shows_results_on_first_tick() {
    let surface = UploadSurface::new(SETTLE);
    let mut session = Session::new(Duration::ZERO);
    let now = Instant::now();

    let batch = surface
        .offer(vec![handle("clip.webm", 0, "video/webm")])
        .expect("video accepted");
    session.submit_files(batch, now).expect("submitted");

    assert_eq!(session.tick(now), Some(Transition::ResultsReady));
}

#[test]
fn second_submission_is_rejected() {
    let surface = UploadSurface::new(SETTLE);
    let mut session = Session::new(DELAY);
    let now = Instant::now();

    let first = surface
        .offer(vec![handle("one.mp4", 1, "video/mp4")])
        .expect("video accepted");
    let second = surface
        .offer(vec![handle("two.mp4", 1, "video/mp4")])
        .expect("video accepted");

    session.submit_files(first, now).expect("first accepted");
    assert_eq!(session.submit_files(second, now), Err(SubmitError::NotIdle));
    assert_eq!(session.uploaded_files()[0].name, "one.mp4");
}

#[test]
fn catalog_does_not_depend_on_the_upload() {
    let catalog = Catalog::load_embedded().expect("embedded catalog");
    let surface = UploadSurface::new(SETTLE);
    let now = Instant::now();

    let mut first = Session::new(Duration::ZERO);
    first
        .submit_files(
            surface.offer(vec![handle("a.mp4", 1, "video/mp4")]).expect("video"),
            now,
        )
        .expect("submitted");
    let mut second = Session::new(Duration::ZERO);
    second
        .submit_files(
            surface
                .offer(vec![
                    handle("x.mov", 5, "video/quicktime"),
                    handle("y.mkv", 9, "video/x-matroska"),
                ])
                .expect("videos"),
            now,
        )
        .expect("submitted");
    first.tick(now);
    second.tick(now);

    let reloaded = Catalog::load_embedded().expect("embedded catalog");
    assert_eq!(catalog.records(), reloaded.records());
}

#[test]
fn selection_follows_the_catalog() {
    let catalog = Catalog::load_embedded().expect("embedded catalog");
    let surface = UploadSurface::new(SETTLE);
    let mut session = Session::new(Duration::ZERO);
    let now = Instant::now();

    session
        .submit_files(
            surface.offer(vec![handle("a.mp4", 1, "video/mp4")]).expect("video"),
            now,
        )
        .expect("submitted");
    session.tick(now);

    assert!(session.select_record("3", &catalog));
    assert!(!session.select_record("42", &catalog));
    assert_eq!(session.selected(), Some("3"));

    assert!(session.select_record("1", &catalog));
    assert_eq!(session.selected(), Some("1"));
}

#[test]
fn drag_over_mixed_files_shows_rejection_but_drop_still_filters() {
    let mut surface = UploadSurface::new(SETTLE);
    let now = Instant::now();
    let video = handle("a.mp4", 1, "video/mp4");
    let text = handle("b.txt", 1, "text/plain");

    surface.hover(video.clone());
    surface.hover(text.clone());
    assert_eq!(surface.presentation(), DragPresentation::Rejecting);

    assert_eq!(surface.drop_file(video, now), None);
    let dropped = surface.drop_file(text, now).expect("group complete");
    assert_eq!(surface.presentation(), DragPresentation::Neutral);

    let batch = surface.offer(dropped).expect("video kept");
    assert_eq!(batch.files()[0].name, "a.mp4");
}
