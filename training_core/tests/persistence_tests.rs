//! Persistence tests for training_core.
//!
//! These tests verify the tracker survives restarts and bad data:
//! - State written by one tracker is loaded by the next
//! - Corrupted or missing state files fall back to defaults
//! - Partial state files keep what they have

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use training_core::storage::STATE_KEY;
use training_core::{Config, DateKey, Exercise, FileBlobStore, Tracker};

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn open(dir: &TempDir) -> Tracker {
    let store = Arc::new(FileBlobStore::new(dir.path()));
    Tracker::open(store, Config::default()).expect("Failed to open tracker")
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = setup_test_dir();

    {
        let mut tracker = open(&temp_dir);
        for exercise in Exercise::ALL {
            tracker.toggle_exercise(exercise);
        }
        tracker.set_weight(77.7).unwrap();
        tracker.toggle_dark_mode();
        tracker.flush();
    }

    let tracker = open(&temp_dir);
    let today = DateKey::today();
    assert_eq!(tracker.state().daily_data.points_for(&today), 40);
    assert_eq!(tracker.state().weight_data.get(&today), Some(77.7));
    assert!(tracker.state().dark_mode);
    assert_eq!(tracker.stats().streak, 1);
}

#[test]
fn test_blob_uses_documented_shape() {
    let temp_dir = setup_test_dir();
    {
        let mut tracker = open(&temp_dir);
        tracker.toggle_exercise(Exercise::Pushups);
        tracker.flush();
    }

    let path = FileBlobStore::new(temp_dir.path()).path_for(STATE_KEY);
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    let today = DateKey::today();
    assert_eq!(value["dailyData"][today.as_str()]["pushups"], true);
    assert!(value["weightData"].is_object());
    assert_eq!(value["startDate"], today.as_str());
    assert_eq!(value["darkMode"], false);
}

#[test]
fn test_corrupted_state_file_loads_defaults() {
    let temp_dir = setup_test_dir();
    let path = FileBlobStore::new(temp_dir.path()).path_for(STATE_KEY);
    fs::write(&path, "{ invalid json }}}}").expect("Failed to write corrupted state");

    let tracker = open(&temp_dir);
    assert!(tracker.state().daily_data.is_empty());
    assert!(tracker.state().weight_data.is_empty());
    assert_eq!(tracker.state().start_date, DateKey::today());
    assert!(!tracker.state().dark_mode);
}

#[test]
fn test_corrupted_state_is_replaced_on_next_save() {
    let temp_dir = setup_test_dir();
    let path = FileBlobStore::new(temp_dir.path()).path_for(STATE_KEY);
    fs::write(&path, "garbage").unwrap();

    {
        let mut tracker = open(&temp_dir);
        tracker.toggle_exercise(Exercise::Squats);
        tracker.flush();
    }

    let tracker = open(&temp_dir);
    assert_eq!(tracker.state().daily_data.len(), 1);
}

#[test]
fn test_partial_state_file_keeps_present_fields() {
    let temp_dir = setup_test_dir();
    let path = FileBlobStore::new(temp_dir.path()).path_for(STATE_KEY);
    fs::write(
        &path,
        r#"{"dailyData": {"2024-01-01": {"pushups": true, "situps": true}}, "startDate": "2023-12-01"}"#,
    )
    .unwrap();

    let tracker = open(&temp_dir);
    assert_eq!(tracker.state().start_date, DateKey::from("2023-12-01"));
    assert_eq!(tracker.stats().total_points, 20);
    assert!(tracker.state().weight_data.is_empty());
    assert!(!tracker.state().dark_mode);
}

#[test]
fn test_missing_data_dir_is_created_on_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("does/not/exist");

    {
        let store = Arc::new(FileBlobStore::new(&data_dir));
        let mut tracker = Tracker::open(store, Config::default()).unwrap();
        tracker.toggle_dark_mode();
        tracker.flush();
    }

    assert!(data_dir.join("onePunchManData.json").exists());
}

#[test]
fn test_null_field_does_not_wipe_history_on_next_save() {
    let temp_dir = setup_test_dir();
    let path = FileBlobStore::new(temp_dir.path()).path_for(STATE_KEY);
    fs::write(
        &path,
        r#"{"dailyData": {"2024-01-01": {"pushups": true, "situps": true, "squats": true, "running": true}}, "weightData": {"2024-01-01": 80}, "startDate": null, "darkMode": true}"#,
    )
    .unwrap();

    {
        let mut tracker = open(&temp_dir);
        tracker.toggle_exercise(Exercise::Running);
        tracker.flush();
    }

    let tracker = open(&temp_dir);
    let day = DateKey::from("2024-01-01");
    assert_eq!(tracker.state().daily_data.points_for(&day), 40);
    assert_eq!(tracker.state().weight_data.get(&day), Some(80.0));
    assert_eq!(tracker.state().start_date, DateKey::today());
    assert!(tracker.state().dark_mode);
    assert_eq!(tracker.state().daily_data.len(), 2);
}
