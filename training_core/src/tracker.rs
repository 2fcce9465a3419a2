//! The state container owned by the application root.
//!
//! `Tracker` holds the current `AppState` and the selected day. Every
//! operation that changes the state builds the next snapshot first, swaps it
//! in whole, and hands a copy to the save queue. Views read through the
//! accessors and derived metrics; they never write fields directly.

use crate::catalog::{get_default_catalog, ExerciseInfo};
use crate::metrics::{compute_stats, hero_rank, HeroRank, Stats};
use crate::platform::{ExportOutcome, ExportPayload, Exporter, Importer};
use crate::save_queue::SaveQueue;
use crate::series::{bounds_for, build_window_at, AxisBounds, GraphMode, SeriesPoint};
use crate::storage::{load_state, BlobStore};
use crate::transfer::{export_document, export_file_name, import_document, EXPORT_MIME};
use crate::weight_log::{adjust_weight_input, parse_weight_input};
use crate::{AppState, Config, DailyRecord, DateKey, Exercise, Result};
use std::sync::Arc;

pub struct Tracker {
    state: AppState,
    selected: DateKey,
    config: Config,
    saves: SaveQueue,
}

impl Tracker {
    /// Load the saved state (defaults on any failure) and select today
    pub fn open<S>(store: Arc<S>, config: Config) -> Result<Self>
    where
        S: BlobStore + 'static,
    {
        let state = load_state(&*store);
        let saves = SaveQueue::spawn(store)?;

        tracing::info!(
            "Opened tracker: {} days logged, {} weight samples",
            state.daily_data.len(),
            state.weight_data.len()
        );

        Ok(Self {
            state,
            selected: DateKey::today(),
            config,
            saves,
        })
    }

    fn commit(&mut self, next: AppState) {
        self.state = next;
        self.saves.submit(self.state.clone());
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selected_date(&self) -> &DateKey {
        &self.selected
    }

    pub fn selected_record(&self) -> DailyRecord {
        self.state.daily_data.record(&self.selected)
    }

    pub fn selected_points(&self) -> u32 {
        self.state.daily_data.points_for(&self.selected)
    }

    /// Exercises in display order with their completion on the selected day
    pub fn selected_day(&self) -> Vec<(&'static ExerciseInfo, bool)> {
        let record = self.selected_record();
        get_default_catalog()
            .iter()
            .map(|info| (info, record.is_done(info.exercise)))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub fn toggle_exercise(&mut self, exercise: Exercise) {
        let next = AppState {
            daily_data: self.state.daily_data.toggled(&self.selected, exercise),
            ..self.state.clone()
        };
        self.commit(next);
    }

    /// Store a weight for the selected day
    ///
    /// Invalid values return `Error::InvalidWeight` and change nothing.
    pub fn set_weight(&mut self, kg: f64) -> Result<()> {
        let weight_data = self.state.weight_data.with_weight(&self.selected, kg)?;
        let next = AppState {
            weight_data,
            ..self.state.clone()
        };
        self.commit(next);
        Ok(())
    }

    /// Parse the weight entry text and store it for the selected day
    pub fn set_weight_input(&mut self, text: &str) -> Result<f64> {
        let kg = parse_weight_input(text)?;
        self.set_weight(kg)?;
        Ok(kg)
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let next = AppState {
            dark_mode: !self.state.dark_mode,
            ..self.state.clone()
        };
        self.commit(next);
        self.state.dark_mode
    }

    pub fn set_start_date(&mut self, start_date: DateKey) {
        let next = AppState {
            start_date,
            ..self.state.clone()
        };
        self.commit(next);
    }

    /// Clear both logs and restart from today, keeping the display preference
    pub fn reset(&mut self) {
        let next = AppState {
            dark_mode: self.state.dark_mode,
            ..AppState::default()
        };
        tracing::info!("Resetting all training data");
        self.commit(next);
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Move the selected day by `delta_days`; moving past today does nothing
    pub fn change_date(&mut self, delta_days: i64) -> bool {
        let next = match self.selected.offset(delta_days) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!("Cannot move selected day: {}", e);
                return false;
            }
        };
        self.select_date(next)
    }

    /// Jump to `date`; future or non-calendar dates are refused
    pub fn select_date(&mut self, date: DateKey) -> bool {
        if date.to_date().is_none() || date.is_after(&DateKey::today()) {
            tracing::debug!("Refusing to select {}", date);
            return false;
        }
        self.selected = date;
        true
    }

    pub fn can_go_forward(&self) -> bool {
        self.selected < DateKey::today()
    }

    // ------------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------------

    pub fn stats(&self) -> Stats {
        compute_stats(&self.state.daily_data)
    }

    pub fn hero_rank(&self) -> HeroRank {
        hero_rank(self.stats().total_points)
    }

    /// Weight to pre-fill the entry with for the selected day
    pub fn weight_prefill(&self) -> f64 {
        self.state
            .weight_data
            .latest_known_weight_or(&self.selected, self.config.weight.default_kg)
    }

    /// Apply `steps` stepper presses (negative to decrease) to the entry text
    pub fn step_weight_input(&self, text: &str, steps: i32) -> String {
        adjust_weight_input(text, f64::from(steps) * self.config.weight.step_kg)
    }

    /// Trend window ending today, with the selected day marked
    pub fn series(&self) -> Vec<SeriesPoint> {
        build_window_at(
            chrono::Local::now().date_naive(),
            &self.state.daily_data,
            &self.state.weight_data,
            &self.selected,
            self.config.series.window_days,
        )
    }

    pub fn axis_bounds(&self, mode: GraphMode) -> AxisBounds {
        bounds_for(mode, &self.state.weight_data)
    }

    // ------------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------------

    /// Hand the export document to `exporter`; never changes state
    pub fn export_with(&self, exporter: &dyn Exporter) -> Result<ExportOutcome> {
        let payload = ExportPayload {
            file_name: export_file_name(&DateKey::today()),
            mime: EXPORT_MIME,
            contents: export_document(&self.state)?,
        };
        exporter.export(&payload)
    }

    /// Replace logs and start date from a picked document
    ///
    /// Returns `Ok(false)` if the user cancelled. A parse failure leaves the
    /// current state untouched.
    pub fn import_with(&mut self, importer: &dyn Importer) -> Result<bool> {
        let Some(blob) = importer.pick()? else {
            tracing::debug!("Import cancelled");
            return Ok(false);
        };

        let imported = import_document(&blob)?;
        let next = imported.apply_to(&self.state);

        tracing::info!(
            "Imported {} days and {} weight samples",
            next.daily_data.len(),
            next.weight_data.len()
        );
        self.commit(next);
        Ok(true)
    }

    /// Block until every submitted snapshot has been written
    pub fn flush(&self) {
        self.saves.flush();
    }
}
