//! Fixed-length daily series for the trend graph.
//!
//! The window always ends today and is rebuilt from scratch on each call.
//! Points use the same formula as the metrics; weights are plain lookups with
//! no carry-forward, so days without a sample stay empty.

use crate::types::FULL_DAY_POINTS;
use crate::{DailyLog, DateKey, WeightLog};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days shown by the trend graph
pub const DEFAULT_WINDOW_DAYS: usize = 30;

/// Lowest upper bound of the weight axis, in kilograms
const WEIGHT_AXIS_MAX_SEED: f64 = 100.0;

/// Which quantity the graph is plotting
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    #[default]
    Progress,
    Weight,
}

/// One day of the window
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub day_of_month: u32,
    pub date_key: DateKey,
    pub points: u32,
    pub weight: Option<f64>,
    pub is_selected: bool,
}

impl SeriesPoint {
    /// Value plotted in `mode`; `None` for days without a weight sample
    pub fn value(&self, mode: GraphMode) -> Option<f64> {
        match mode {
            GraphMode::Progress => Some(f64::from(self.points)),
            GraphMode::Weight => self.weight,
        }
    }
}

/// Closed interval used to scale one graph axis
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Build the default 30-day window ending today
pub fn build_window(
    daily: &DailyLog,
    weights: &WeightLog,
    selected: &DateKey,
) -> Vec<SeriesPoint> {
    build_window_at(
        chrono::Local::now().date_naive(),
        daily,
        weights,
        selected,
        DEFAULT_WINDOW_DAYS,
    )
}

/// Build a `window_days` window ending on `today`, oldest day first
///
/// `selected` only marks an entry; it never moves the window.
pub fn build_window_at(
    today: NaiveDate,
    daily: &DailyLog,
    weights: &WeightLog,
    selected: &DateKey,
    window_days: usize,
) -> Vec<SeriesPoint> {
    let mut series = Vec::with_capacity(window_days);

    for offset in (0..window_days as u64).rev() {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            continue;
        };
        let key = DateKey::from_date(date);

        series.push(SeriesPoint {
            day_of_month: date.day(),
            points: daily.points_for(&key),
            weight: weights.get(&key),
            is_selected: key == *selected,
            date_key: key,
        });
    }

    series
}

/// Points axis is always `[0, 40]`
pub fn points_bounds() -> AxisBounds {
    AxisBounds {
        min: 0.0,
        max: f64::from(FULL_DAY_POINTS),
    }
}

/// Weight axis over every recorded sample, not just the visible window
///
/// Seeds keep the axis at least `[0, 100]`, which is also the result for an
/// empty log.
pub fn weight_bounds(weights: &WeightLog) -> AxisBounds {
    let (min, max) = weights
        .values()
        .fold((0.0_f64, WEIGHT_AXIS_MAX_SEED), |(min, max), kg| {
            (min.min(kg), max.max(kg))
        });

    AxisBounds { min, max }
}

/// Axis bounds for the graph currently shown
pub fn bounds_for(mode: GraphMode, weights: &WeightLog) -> AxisBounds {
    match mode {
        GraphMode::Progress => points_bounds(),
        GraphMode::Weight => weight_bounds(weights),
    }
}
