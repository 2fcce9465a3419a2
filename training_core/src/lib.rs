#![forbid(unsafe_code)]

//! Core data model and progress engine for the One Punch Man training tracker.
//!
//! This crate provides:
//! - Domain types (exercises, daily records, weight samples, app state)
//! - Day-keyed completion and weight stores
//! - Metrics (points, streak, hero rank) and the 30-day trend series
//! - Persistence (state blob, background saves, export/import documents)
//! - The state container that ties them together

pub mod date_key;
pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod daily_log;
pub mod weight_log;
pub mod metrics;
pub mod series;
pub mod storage;
pub mod save_queue;
pub mod transfer;
pub mod platform;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use date_key::DateKey;
pub use types::*;
pub use catalog::get_default_catalog;
pub use config::Config;
pub use metrics::{compute_stats, hero_rank, HeroRank, Rank, Stats};
pub use series::{build_window, GraphMode, SeriesPoint};
pub use storage::{load_state, save_state, BlobStore, FileBlobStore, MemoryBlobStore};
pub use save_queue::SaveQueue;
pub use transfer::{export_document, import_document, ImportedData};
pub use platform::{
    BlobDownloader, BlobPicker, DocumentPicker, ExportOutcome, Exporter, FileSystemExporter,
    Importer,
};
pub use tracker::Tracker;
