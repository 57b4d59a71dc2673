//! Replaying a person's reports through the tracking pipeline
//!
//! A replay file holds a starting person and a list of daily reports. Each
//! report is recorded in date order; rejected reports are collected rather
//! than aborting the run.

use std::fs;
use std::path::Path;

use carbon_tracker_shared::{
    analyze, goal_progress, summarize_history, total_reward_points, ActivityReport, Analytics,
    EmissionRecord, GoalProgress, HistorySummary, Person,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineResult, ErrorDetail};
use crate::services::{TrackingOutcome, TrackingService};
use crate::state::EngineState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFile {
    pub person: Person,
    #[serde(default)]
    pub reports: Vec<ActivityReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedReport {
    pub date: NaiveDate,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayResult {
    pub person: Person,
    pub outcomes: Vec<TrackingOutcome>,
    pub rejected: Vec<RejectedReport>,
    pub summary: HistorySummary,
    pub analytics: Analytics,
    /// Goals measured against the replayed daily average
    pub goals: Vec<GoalProgress>,
    pub reward_points: u32,
}

impl ReplayFile {
    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Record every report in date order against the file's person
pub fn replay(state: &EngineState, file: ReplayFile, now: DateTime<Utc>) -> ReplayResult {
    let mut person = file.person;
    let mut reports = file.reports;
    reports.sort_by_key(|r| r.date);

    let mut outcomes = Vec::with_capacity(reports.len());
    let mut rejected = Vec::new();

    for report in &reports {
        match TrackingService::record_activity(state, &mut person, report, now) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                warn!(date = %report.date, error = %err, "Report rejected");
                rejected.push(RejectedReport {
                    date: report.date,
                    error: err.detail(),
                });
            }
        }
    }

    let records: Vec<EmissionRecord> = outcomes.iter().map(|o| o.record.clone()).collect();
    let reward_points = total_reward_points(state.achievements().catalog(), &person);

    let summary = summarize_history(&records);
    ReplayResult {
        goals: goal_progress(&person.goals, summary.average),
        summary,
        analytics: analyze(&records),
        reward_points,
        person,
        outcomes,
        rejected,
    }
}
