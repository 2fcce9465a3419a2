//! Core domain types for the training tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The fixed set of exercises
//! - Daily completion records and the logs keyed by day
//! - The persisted application state

use crate::DateKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Points awarded for each completed exercise
pub const POINTS_PER_EXERCISE: u32 = 10;

/// Points of a day with every exercise completed
pub const FULL_DAY_POINTS: u32 = POINTS_PER_EXERCISE * Exercise::ALL.len() as u32;

// ============================================================================
// Exercise Types
// ============================================================================

/// One of the four daily exercises
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Pushups,
    Situps,
    Squats,
    Running,
}

impl Exercise {
    /// Every exercise, in display order
    pub const ALL: [Exercise; 4] = [
        Exercise::Pushups,
        Exercise::Situps,
        Exercise::Squats,
        Exercise::Running,
    ];

    /// Key used for this exercise in persisted documents
    pub fn key(self) -> &'static str {
        match self {
            Exercise::Pushups => "pushups",
            Exercise::Situps => "situps",
            Exercise::Squats => "squats",
            Exercise::Running => "running",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Daily Records
// ============================================================================

/// Completion flags for one day
///
/// Missing flags in a document read as `false`; unknown keys are ignored.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DailyRecord {
    pub pushups: bool,
    pub situps: bool,
    pub squats: bool,
    pub running: bool,
}

impl DailyRecord {
    pub fn is_done(&self, exercise: Exercise) -> bool {
        match exercise {
            Exercise::Pushups => self.pushups,
            Exercise::Situps => self.situps,
            Exercise::Squats => self.squats,
            Exercise::Running => self.running,
        }
    }

    fn flag_mut(&mut self, exercise: Exercise) -> &mut bool {
        match exercise {
            Exercise::Pushups => &mut self.pushups,
            Exercise::Situps => &mut self.situps,
            Exercise::Squats => &mut self.squats,
            Exercise::Running => &mut self.running,
        }
    }

    /// Flip one flag in place
    pub fn toggle(&mut self, exercise: Exercise) {
        let flag = self.flag_mut(exercise);
        *flag = !*flag;
    }

    pub fn completed_count(&self) -> u32 {
        Exercise::ALL
            .iter()
            .filter(|exercise| self.is_done(**exercise))
            .count() as u32
    }

    /// `10 × completed exercises`, always in 0..=40
    pub fn points(&self) -> u32 {
        POINTS_PER_EXERCISE * self.completed_count()
    }

    pub fn is_full(&self) -> bool {
        self.points() == FULL_DAY_POINTS
    }
}

/// Completion records keyed by day
///
/// Backed by a `BTreeMap`, so iteration is chronological.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct DailyLog(BTreeMap<DateKey, DailyRecord>);

/// Body-weight samples in kilograms keyed by day
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct WeightLog(BTreeMap<DateKey, f64>);

impl DailyLog {
    pub fn get(&self, date: &DateKey) -> Option<&DailyRecord> {
        self.0.get(date)
    }

    /// Records in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &DailyRecord)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, date: &DateKey) -> &mut DailyRecord {
        self.0.entry(date.clone()).or_default()
    }
}

impl FromIterator<(DateKey, DailyRecord)> for DailyLog {
    fn from_iter<I: IntoIterator<Item = (DateKey, DailyRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl WeightLog {
    pub fn get(&self, date: &DateKey) -> Option<f64> {
        self.0.get(date).copied()
    }

    /// Samples in chronological order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&DateKey, f64)> {
        self.0.iter().map(|(date, kg)| (date, *kg))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, date: DateKey, kg: f64) {
        self.0.insert(date, kg);
    }

    pub(crate) fn range_up_to<'a>(
        &'a self,
        date: &'a DateKey,
    ) -> impl DoubleEndedIterator<Item = (&'a DateKey, &'a f64)> {
        self.0.range(..=date.clone())
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Everything that survives a restart
///
/// Field names match the persisted blob. Any missing, `null`, or unreadable
/// field falls back to its default on its own: empty logs, today as start
/// date, light mode. The other fields keep what was stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub daily_data: DailyLog,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub weight_data: WeightLog,

    #[serde(default = "DateKey::today", deserialize_with = "lenient_or_today")]
    pub start_date: DateKey,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            daily_data: DailyLog::default(),
            weight_data: WeightLog::default(),
            start_date: DateKey::today(),
            dark_mode: false,
        }
    }
}

// ============================================================================
// Field decoding
// ============================================================================

/// `null` decodes as the type's default, the same as an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` decodes as today, the same as an absent start date
pub(crate) fn null_as_today<'de, D>(deserializer: D) -> Result<DateKey, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateKey>::deserialize(deserializer)?.unwrap_or_else(DateKey::today))
}

fn lenient<'de, D, T>(deserializer: D, fallback: impl FnOnce() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(fallback());
    }

    match T::deserialize(value) {
        Ok(field) => Ok(field),
        Err(e) => {
            tracing::warn!("Discarding unreadable state field: {}", e);
            Ok(fallback())
        }
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer, T::default)
}

fn lenient_or_today<'de, D>(deserializer: D) -> Result<DateKey, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, DateKey::today)
}
