//! Exercise completion store.
//!
//! Updates never touch the log they are called on; they return a new log so
//! callers can publish the result as a fresh snapshot.

use crate::{DailyLog, DailyRecord, DateKey, Exercise};

impl DailyLog {
    /// Return a copy of the log with `exercise` flipped on `date`
    ///
    /// A day without a record gets a new record with only that flag set.
    pub fn toggled(&self, date: &DateKey, exercise: Exercise) -> DailyLog {
        let mut next = self.clone();
        next.entry_mut(date).toggle(exercise);

        tracing::debug!(
            "Toggled {} on {}: now {}",
            exercise,
            date,
            next.is_done(date, exercise)
        );
        next
    }

    /// Record for `date`, or an all-false record if none exists
    pub fn record(&self, date: &DateKey) -> DailyRecord {
        self.get(date).copied().unwrap_or_default()
    }

    pub fn is_done(&self, date: &DateKey, exercise: Exercise) -> bool {
        self.record(date).is_done(exercise)
    }

    pub fn points_for(&self, date: &DateKey) -> u32 {
        self.record(date).points()
    }
}
