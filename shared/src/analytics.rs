//! History summaries and analytics
//!
//! Aggregates work on unrounded record totals and round only the values they
//! return. Records may be passed in any order; series are sorted by date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::person::Goal;
use crate::record::{round2, CategoryEmissions, EmissionRecord};

/// Number of records in each trend window
pub const TREND_WINDOW: usize = 7;

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HistorySummary {
    pub total: f64,
    pub average: f64,
    pub count: usize,
}

/// Total, average and count of a list of records
pub fn summarize_history(records: &[EmissionRecord]) -> HistorySummary {
    if records.is_empty() {
        return HistorySummary::default();
    }
    let total: f64 = records.iter().map(EmissionRecord::raw_total).sum();
    HistorySummary {
        total: round2(total),
        average: round2(total / records.len() as f64),
        count: records.len(),
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Transport,
    Energy,
    Diet,
    Lifestyle,
}

impl EmissionCategory {
    pub const ALL: [EmissionCategory; 4] = [
        EmissionCategory::Transport,
        EmissionCategory::Energy,
        EmissionCategory::Diet,
        EmissionCategory::Lifestyle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmissionCategory::Transport => "Transport",
            EmissionCategory::Energy => "Energy",
            EmissionCategory::Diet => "Diet",
            EmissionCategory::Lifestyle => "Lifestyle",
        }
    }

    fn of(&self, emissions: &CategoryEmissions) -> f64 {
        match self {
            EmissionCategory::Transport => emissions.transport,
            EmissionCategory::Energy => emissions.energy,
            EmissionCategory::Diet => emissions.diet,
            EmissionCategory::Lifestyle => emissions.lifestyle,
        }
    }
}

/// One day in the chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub transport: f64,
    pub energy: f64,
    pub diet: f64,
    pub lifestyle: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: EmissionCategory,
    /// Share of all emissions, whole percent
    pub percent: u32,
    /// kg CO2, 2 decimal places
    pub emissions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub total_emissions: f64,
    pub days_tracked: usize,
    pub average_daily: f64,
    /// Change of the last window's average against the one before, in percent
    pub change_percent: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub daily: Vec<DailyPoint>,
    pub breakdown: Vec<CategoryShare>,
    pub trend: Trend,
}

pub fn analyze(records: &[EmissionRecord]) -> Analytics {
    let mut sorted: Vec<&EmissionRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date());

    let daily = sorted
        .iter()
        .map(|r| {
            let e = r.emissions();
            DailyPoint {
                date: r.date(),
                transport: round2(e.transport),
                energy: round2(e.energy),
                diet: round2(e.diet),
                lifestyle: round2(e.lifestyle),
                total: r.total(),
            }
        })
        .collect();

    let totals = sorted.iter().fold(CategoryEmissions::default(), |acc, r| {
        let e = r.emissions();
        CategoryEmissions {
            transport: acc.transport + e.transport,
            energy: acc.energy + e.energy,
            diet: acc.diet + e.diet,
            lifestyle: acc.lifestyle + e.lifestyle,
        }
    });
    let total = totals.sum();

    let breakdown = EmissionCategory::ALL
        .iter()
        .map(|category| {
            let emissions = category.of(&totals);
            let percent = if total > 0.0 {
                (emissions / total * 100.0).round() as u32
            } else {
                0
            };
            CategoryShare {
                category: *category,
                percent,
                emissions: round2(emissions),
            }
        })
        .collect();

    let change = trend_change(&sorted);
    let trend = Trend {
        total_emissions: round2(total),
        days_tracked: sorted.len(),
        average_daily: round2(total / sorted.len().max(1) as f64),
        change_percent: round2(change),
        direction: if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        },
    };

    Analytics {
        daily,
        breakdown,
        trend,
    }
}

/// Percent change between the last window and the window before it.
///
/// Zero when there is no earlier window or it averaged zero.
fn trend_change(sorted: &[&EmissionRecord]) -> f64 {
    let recent_start = sorted.len().saturating_sub(TREND_WINDOW);
    let previous_start = recent_start.saturating_sub(TREND_WINDOW);

    let recent = window_average(&sorted[recent_start..]);
    let previous = window_average(&sorted[previous_start..recent_start]);

    if previous > 0.0 {
        (recent - previous) / previous * 100.0
    } else {
        0.0
    }
}

fn window_average(window: &[&EmissionRecord]) -> f64 {
    window.iter().map(|r| r.raw_total()).sum::<f64>() / window.len().max(1) as f64
}

// ============================================================================
// Goals
// ============================================================================

/// A goal with how close the daily average is to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    /// Percent, capped at 100
    pub progress: f64,
}

/// Progress of each goal given the daily average.
///
/// Progress is `average / target * 100`, capped at 100. A goal without a
/// positive target reports zero.
pub fn goal_progress(goals: &[Goal], average_daily: f64) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| {
            let progress = if goal.target > 0.0 && average_daily.is_finite() {
                (average_daily / goal.target * 100.0).min(100.0)
            } else {
                0.0
            };
            GoalProgress {
                goal: goal.clone(),
                progress,
            }
        })
        .collect()
}

/// Trailing average over `window` values; the first points average what is
/// available so far. A zero window is treated as one.
pub fn rolling_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}
