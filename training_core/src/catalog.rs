//! Built-in catalog of the four daily exercises.
//!
//! The exercise set is fixed; this module only attaches the display details
//! (label, daily target, colour token) that shells need to render a day.

use crate::types::Exercise;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display details for one exercise
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseInfo {
    pub exercise: Exercise,
    pub label: &'static str,
    pub daily_target: &'static str,
    pub color_token: &'static str,
}

/// The exercises with their display details, in display order
#[derive(Clone, Debug)]
pub struct ExerciseCatalog {
    entries: Vec<ExerciseInfo>,
    by_exercise: HashMap<Exercise, usize>,
}

/// Cached default catalog - built once and reused
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

fn build_default_catalog() -> ExerciseCatalog {
    let entries = vec![
        ExerciseInfo {
            exercise: Exercise::Pushups,
            label: "Push-ups",
            daily_target: "100 push-ups",
            color_token: "orange",
        },
        ExerciseInfo {
            exercise: Exercise::Situps,
            label: "Sit-ups",
            daily_target: "100 sit-ups",
            color_token: "blue",
        },
        ExerciseInfo {
            exercise: Exercise::Squats,
            label: "Squats",
            daily_target: "100 squats",
            color_token: "green",
        },
        ExerciseInfo {
            exercise: Exercise::Running,
            label: "Running",
            daily_target: "10 km run",
            color_token: "accent",
        },
    ];

    let by_exercise = entries
        .iter()
        .enumerate()
        .map(|(idx, info)| (info.exercise, idx))
        .collect();

    ExerciseCatalog {
        entries,
        by_exercise,
    }
}

impl ExerciseCatalog {
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseInfo> {
        self.entries.iter()
    }

    pub fn get(&self, exercise: Exercise) -> Option<&ExerciseInfo> {
        self.by_exercise.get(&exercise).map(|idx| &self.entries[*idx])
    }

    /// Check that every exercise has exactly one entry
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for exercise in Exercise::ALL {
            let count = self.entries.iter().filter(|e| e.exercise == exercise).count();
            if count != 1 {
                errors.push(format!("Exercise '{}' has {} catalog entries", exercise, count));
            }
        }

        errors
    }
}
