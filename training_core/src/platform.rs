//! Platform capabilities for moving export documents in and out.
//!
//! Two families implement the same pair of traits:
//! - Web style: `BlobDownloader` hands the document to a download sink,
//!   `BlobPicker` receives the contents of a picked file
//! - Native style: `FileSystemExporter` writes into a directory,
//!   `DocumentPicker` reads a chosen path
//!
//! Nothing in the metrics or series code depends on which one is in use.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A ready-to-deliver export document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Where an export ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Downloaded { file_name: String },
    Saved { path: PathBuf },
}

/// Delivers an export document to the user
pub trait Exporter {
    fn export(&self, payload: &ExportPayload) -> Result<ExportOutcome>;
}

/// Obtains an import document from the user
pub trait Importer {
    /// Contents of the chosen document, or `None` if the user cancelled
    fn pick(&self) -> Result<Option<String>>;
}

type DownloadSink = Box<dyn Fn(&ExportPayload) -> std::io::Result<()> + Send + Sync>;

// ============================================================================
// Web style
// ============================================================================

/// Hands the document to a download sink supplied by the shell
pub struct BlobDownloader {
    sink: DownloadSink,
}

impl BlobDownloader {
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&ExportPayload) -> std::io::Result<()> + Send + Sync + 'static,
    {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl Exporter for BlobDownloader {
    fn export(&self, payload: &ExportPayload) -> Result<ExportOutcome> {
        (self.sink)(payload).map_err(|e| Error::ExportTransport(e.to_string()))?;

        tracing::info!("Offered {} for download", payload.file_name);
        Ok(ExportOutcome::Downloaded {
            file_name: payload.file_name.clone(),
        })
    }
}

/// Yields contents the shell already read from a file input, once
#[derive(Debug, Default)]
pub struct BlobPicker {
    picked: Mutex<Option<String>>,
}

impl BlobPicker {
    pub fn new(picked: Option<String>) -> Self {
        Self {
            picked: Mutex::new(picked),
        }
    }
}

impl Importer for BlobPicker {
    fn pick(&self) -> Result<Option<String>> {
        let mut picked = self
            .picked
            .lock()
            .map_err(|e| Error::ImportParse(e.to_string()))?;
        Ok(picked.take())
    }
}

// ============================================================================
// Native style
// ============================================================================

/// Writes export documents into a directory
#[derive(Clone, Debug)]
pub struct FileSystemExporter {
    dir: PathBuf,
}

impl FileSystemExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for FileSystemExporter {
    fn export(&self, payload: &ExportPayload) -> Result<ExportOutcome> {
        let path = self.dir.join(&payload.file_name);

        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, payload.contents.as_bytes()))
            .map_err(|e| Error::ExportTransport(format!("{:?}: {}", path, e)))?;

        tracing::info!("Exported data to {:?}", path);
        Ok(ExportOutcome::Saved { path })
    }
}

/// Reads the document at a chosen path; no path means the user cancelled
#[derive(Clone, Debug, Default)]
pub struct DocumentPicker {
    chosen: Option<PathBuf>,
}

impl DocumentPicker {
    pub fn new(chosen: Option<PathBuf>) -> Self {
        Self { chosen }
    }
}

impl Importer for DocumentPicker {
    fn pick(&self) -> Result<Option<String>> {
        let Some(path) = &self.chosen else {
            return Ok(None);
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ImportParse(format!("{:?}: {}", path, e)))?;
        tracing::debug!("Read import document {:?}", path);
        Ok(Some(contents))
    }
}
