//! Export and import documents.
//!
//! The export document is the persisted state minus the display preference,
//! pretty-printed so people can read and keep it. Import accepts the same
//! shape: unknown fields are ignored and missing ones take their defaults.

use crate::types::{null_as_default, null_as_today};
use crate::{AppState, DailyLog, DateKey, Error, Result, WeightLog};
use serde::{Deserialize, Serialize};

/// Prefix of exported file names
pub const APP_NAME: &str = "onepunchman";

/// MIME type of export documents
pub const EXPORT_MIME: &str = "application/json";

const IMPORT_FIELDS: [&str; 3] = ["dailyData", "weightData", "startDate"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    daily_data: &'a DailyLog,
    weight_data: &'a WeightLog,
    start_date: &'a DateKey,
}

/// Fields adopted from an import document
///
/// A missing or `null` field takes its default. A field of the wrong type
/// rejects the whole document, since nothing has been lost yet.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportedData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_data: DailyLog,

    #[serde(default, deserialize_with = "null_as_default")]
    pub weight_data: WeightLog,

    #[serde(default = "DateKey::today", deserialize_with = "null_as_today")]
    pub start_date: DateKey,
}

impl ImportedData {
    /// New state with the imported fields; the display preference is kept
    pub fn apply_to(self, state: &AppState) -> AppState {
        AppState {
            daily_data: self.daily_data,
            weight_data: self.weight_data,
            start_date: self.start_date,
            dark_mode: state.dark_mode,
        }
    }
}

/// Serialize the exportable part of `state` as indented JSON
pub fn export_document(state: &AppState) -> Result<String> {
    let document = ExportDocument {
        daily_data: &state.daily_data,
        weight_data: &state.weight_data,
        start_date: &state.start_date,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse an import document
///
/// Anything that is not a JSON object of the expected shape is an
/// `Error::ImportParse`. Missing fields are not an error.
pub fn import_document(blob: &str) -> Result<ImportedData> {
    let value: serde_json::Value =
        serde_json::from_str(blob).map_err(|e| Error::ImportParse(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(Error::ImportParse(
            "document is not a JSON object".to_string(),
        ));
    };

    let missing: Vec<_> = IMPORT_FIELDS
        .iter()
        .filter(|field| object.get(**field).map_or(true, serde_json::Value::is_null))
        .collect();
    if !missing.is_empty() {
        tracing::debug!("Import document lacks {:?}, using defaults", missing);
    }

    serde_json::from_value(value).map_err(|e| Error::ImportParse(e.to_string()))
}

/// `onepunchman_data_<today>.json`
pub fn export_file_name(today: &DateKey) -> String {
    format!("{}_data_{}.json", APP_NAME, today)
}
