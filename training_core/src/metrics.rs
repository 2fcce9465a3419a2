//! Derived progress metrics: total points, streak, and hero rank.
//!
//! Streak rules (single pass, oldest day first):
//! - Full day (40 points): extends the streak if it follows the previous full
//!   day by exactly one calendar day, otherwise restarts it at 1
//! - Partial day (10-30 points): drops the streak to 0 but does not move the
//!   previous full day
//! - Empty day (0 points): ignored
//!
//! The reported streak is whatever the running value is after the last
//! recorded day, so a partial day after the last full day reports 0.

use crate::types::FULL_DAY_POINTS;
use crate::{DailyLog, DateKey};
use serde::Serialize;
use std::fmt;

/// Aggregate metrics over a whole log
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_points: u64,
    pub streak: u32,
}

/// Compute lifetime points and the current streak
pub fn compute_stats(log: &DailyLog) -> Stats {
    let mut total_points = 0u64;
    let mut streak = 0u32;
    let mut last_full_day: Option<&DateKey> = None;

    for (date, record) in log.iter() {
        let points = record.points();
        total_points += u64::from(points);

        if points == FULL_DAY_POINTS {
            streak = match last_full_day {
                None => streak + 1,
                Some(previous) if previous.is_consecutive(date) => streak + 1,
                Some(_) => 1,
            };
            last_full_day = Some(date);
        } else if points > 0 {
            streak = 0;
        }
    }

    tracing::debug!(
        "Computed stats over {} days: {} points, streak {}",
        log.len(),
        total_points,
        streak
    );

    Stats {
        total_points,
        streak,
    }
}

/// Hero rank tiers, lowest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    C,
    B,
    A,
    S,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        f.write_str(label)
    }
}

/// A rank together with the colour token it is shown in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeroRank {
    pub rank: Rank,
    pub color: &'static str,
}

/// Inclusive lower bounds, highest first
const RANK_LADDER: [(u64, Rank, &str); 3] = [
    (14_600, Rank::S, "#FFD700"),
    (10_000, Rank::A, "#FF6B35"),
    (5_000, Rank::B, "#4169E1"),
];

const BASE_RANK: HeroRank = HeroRank {
    rank: Rank::C,
    color: "#808080",
};

pub fn hero_rank(total_points: u64) -> HeroRank {
    RANK_LADDER
        .iter()
        .find(|(threshold, _, _)| total_points >= *threshold)
        .map(|(_, rank, color)| HeroRank {
            rank: *rank,
            color: *color,
        })
        .unwrap_or(BASE_RANK)
}

/// Points still missing for the next rank, or `None` at the top rank
pub fn points_to_next_rank(total_points: u64) -> Option<u64> {
    RANK_LADDER
        .iter()
        .rev()
        .find(|(threshold, _, _)| total_points < *threshold)
        .map(|(threshold, _, _)| threshold - total_points)
}
