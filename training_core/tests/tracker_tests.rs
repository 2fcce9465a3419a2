//! End-to-end tests of the tracker operations.
//!
//! Export and import are driven through both capability families, and the
//! derived metrics are checked against the state the operations produce.

use std::sync::{Arc, Mutex};
use training_core::platform::ExportPayload;
use training_core::storage::{load_state, STATE_KEY};
use training_core::{
    BlobDownloader, BlobPicker, BlobStore, Config, DateKey, DocumentPicker, Error, Exercise,
    ExportOutcome, FileSystemExporter, GraphMode, MemoryBlobStore, Rank, Tracker,
};

fn open() -> (Arc<MemoryBlobStore>, Tracker) {
    let store = Arc::new(MemoryBlobStore::new());
    let tracker = Tracker::open(Arc::clone(&store), Config::default()).unwrap();
    (store, tracker)
}

fn complete_day(tracker: &mut Tracker) {
    for exercise in Exercise::ALL {
        tracker.toggle_exercise(exercise);
    }
}

#[test]
fn test_streak_over_consecutive_days() {
    let (_, mut tracker) = open();

    tracker.change_date(-2);
    complete_day(&mut tracker);
    tracker.change_date(1);
    complete_day(&mut tracker);
    tracker.change_date(1);
    complete_day(&mut tracker);

    let stats = tracker.stats();
    assert_eq!(stats.streak, 3);
    assert_eq!(stats.total_points, 120);
    assert_eq!(tracker.hero_rank().rank, Rank::C);

    // Unticking one exercise today turns it into a partial day
    tracker.toggle_exercise(Exercise::Running);
    assert_eq!(tracker.stats().streak, 0);
}

#[test]
fn test_export_import_roundtrip_via_file_system() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (_, mut source) = open();
    complete_day(&mut source);
    source.set_weight(70.5).unwrap();
    source.set_start_date(DateKey::from("2024-01-01"));
    source.toggle_dark_mode();

    let outcome = source
        .export_with(&FileSystemExporter::new(temp_dir.path()))
        .unwrap();
    let path = match outcome {
        ExportOutcome::Saved { path } => path,
        other => panic!("expected a saved file, got {:?}", other),
    };
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("onepunchman_data_{}.json", DateKey::today())
    );

    let (store, mut target) = open();
    assert!(target.import_with(&DocumentPicker::new(Some(path))).unwrap());
    target.flush();

    assert_eq!(target.state().daily_data, source.state().daily_data);
    assert_eq!(target.state().weight_data, source.state().weight_data);
    assert_eq!(target.state().start_date, source.state().start_date);
    assert!(!target.state().dark_mode);
    assert_eq!(&load_state(&*store), target.state());
}

#[test]
fn test_export_import_roundtrip_via_blobs() {
    let downloads: Arc<Mutex<Vec<ExportPayload>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&downloads);
    let downloader = BlobDownloader::new(move |payload| {
        sink.lock().unwrap().push(payload.clone());
        Ok(())
    });

    let (_, mut source) = open();
    source.toggle_exercise(Exercise::Situps);
    source.export_with(&downloader).unwrap();

    let payload = downloads.lock().unwrap().pop().unwrap();
    assert_eq!(payload.mime, "application/json");
    assert!(!payload.contents.contains("darkMode"));

    let (_, mut target) = open();
    target.toggle_dark_mode();
    assert!(target
        .import_with(&BlobPicker::new(Some(payload.contents)))
        .unwrap());
    assert_eq!(target.state().daily_data, source.state().daily_data);
    assert!(target.state().dark_mode);
}

#[test]
fn test_failed_import_leaves_state_untouched() {
    let (store, mut tracker) = open();
    complete_day(&mut tracker);
    tracker.flush();
    let before = tracker.state().clone();
    let saved_before = saved_blob(&store);

    let result = tracker.import_with(&BlobPicker::new(Some("{ not json".into())));
    assert!(matches!(result, Err(Error::ImportParse(_))));
    tracker.flush();

    assert_eq!(tracker.state(), &before);
    assert_eq!(saved_blob(&store), saved_before);
}

#[test]
fn test_cancelled_import_is_not_an_error() {
    let (_, mut tracker) = open();
    tracker.toggle_exercise(Exercise::Pushups);
    let before = tracker.state().clone();

    assert!(!tracker.import_with(&BlobPicker::new(None)).unwrap());
    assert!(!tracker.import_with(&DocumentPicker::new(None)).unwrap());
    assert_eq!(tracker.state(), &before);
}

#[test]
fn test_import_with_missing_fields_defaults_them() {
    let (_, mut tracker) = open();
    tracker.set_start_date(DateKey::from("2020-01-01"));
    tracker.toggle_exercise(Exercise::Pushups);

    let doc = r#"{"weightData": {"2024-01-01": 65.0}}"#;
    assert!(tracker.import_with(&BlobPicker::new(Some(doc.into()))).unwrap());

    assert!(tracker.state().daily_data.is_empty());
    assert_eq!(tracker.state().start_date, DateKey::today());
    assert_eq!(tracker.state().weight_data.len(), 1);
}

#[test]
fn test_rejected_export_is_reported() {
    let (_, tracker) = open();
    let downloader = BlobDownloader::new(|_| {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "sharing unavailable",
        ))
    });

    assert!(matches!(
        tracker.export_with(&downloader),
        Err(Error::ExportTransport(_))
    ));
}

#[test]
fn test_weight_axis_covers_whole_log() {
    let (_, mut tracker) = open();
    assert_eq!(tracker.axis_bounds(GraphMode::Weight).max, 100.0);

    tracker.select_date(DateKey::from("2019-06-01"));
    tracker.set_weight(130.0).unwrap();
    tracker.change_date(1);

    let bounds = tracker.axis_bounds(GraphMode::Weight);
    assert_eq!(bounds.min, 0.0);
    assert_eq!(bounds.max, 130.0);
    assert_eq!(tracker.axis_bounds(GraphMode::Progress).max, 40.0);

    // The old sample is outside the window, and so is the selection
    let series = tracker.series();
    assert_eq!(series.len(), 30);
    assert!(series.iter().all(|p| p.weight.is_none()));
    assert!(series.iter().all(|p| !p.is_selected));
}

fn saved_blob(store: &MemoryBlobStore) -> Option<String> {
    store.read(STATE_KEY).unwrap()
}
