//! Consecutive-day tracking streaks
//!
//! A streak counts calendar days in a row on which the person recorded
//! activity. Dates are compared as calendar days, never as timestamps, so
//! recording twice on the same day is a no-op.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A person's streak counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_tracked: Option<NaiveDate>,
}

/// Where a new record date falls relative to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakState {
    /// Nothing tracked yet
    Cold,
    /// Same day as the last record
    SameDay,
    /// The day after the last record
    Continued,
    /// More than one day after the last record
    Broken,
    /// Earlier than the last record
    BackDated,
}

impl Streak {
    /// Classify a record date against this streak
    pub fn state_for(&self, date: NaiveDate) -> StreakState {
        let Some(last) = self.last_tracked else {
            return StreakState::Cold;
        };

        match (date - last).num_days() {
            0 => StreakState::SameDay,
            1 => StreakState::Continued,
            gap if gap > 1 => StreakState::Broken,
            _ => StreakState::BackDated,
        }
    }

    /// Whether the streak still counts on `today`, i.e. the last record was
    /// today or yesterday
    pub fn is_alive(&self, today: NaiveDate) -> bool {
        matches!(
            self.state_for(today),
            StreakState::SameDay | StreakState::Continued
        )
    }
}

/// Advance a streak for a record on `date`.
///
/// `longest` only moves when a streak is extended, so a lone first day
/// leaves it at zero. A back-dated record leaves the streak untouched.
pub fn apply_streak(streak: Streak, date: NaiveDate) -> Streak {
    match streak.state_for(date) {
        StreakState::Cold | StreakState::Broken => Streak {
            current: 1,
            longest: streak.longest,
            last_tracked: Some(date),
        },
        StreakState::SameDay | StreakState::BackDated => streak,
        StreakState::Continued => {
            let current = streak.current + 1;
            Streak {
                current,
                longest: streak.longest.max(current),
                last_tracked: Some(date),
            }
        }
    }
}

/// [`apply_streak`] for a timestamp, normalized to its UTC calendar day
pub fn apply_streak_at(streak: Streak, at: DateTime<Utc>) -> Streak {
    apply_streak(streak, at.date_naive())
}
