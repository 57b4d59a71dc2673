//! Activity tracking service
//!
//! Runs one day's report through the whole pipeline:
//! - Factor resolution for the person's location
//! - Emission calculation
//! - Stats and streak updates
//! - Achievement evaluation
//!
//! The person is updated in place; persisting it and the returned record is
//! the caller's job.

use carbon_tracker_shared::{
    apply_streak, calculate_emissions, ActivityReport, EarnedBadge, EmissionRecord, Person,
    PersonStats, Streak,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::EngineResult;
use crate::state::EngineState;

/// Everything that changed for one recorded day
#[derive(Debug, Clone, Serialize)]
pub struct TrackingOutcome {
    pub record: EmissionRecord,
    pub new_badges: Vec<EarnedBadge>,
    pub streak: Streak,
    pub stats: PersonStats,
}

/// Tracking service for business logic
pub struct TrackingService;

impl TrackingService {
    /// Record a day of activity for `person`.
    ///
    /// A rejected report leaves the person untouched.
    pub fn record_activity(
        state: &EngineState,
        person: &mut Person,
        report: &ActivityReport,
        now: DateTime<Utc>,
    ) -> EngineResult<TrackingOutcome> {
        let factors = state.resolve(&person.location);
        let record = calculate_emissions(report, &factors)?;

        person.stats.apply_record(&record);
        person.streak = apply_streak(person.streak, record.date());

        let engine = state.achievements();
        let new_badges = engine.evaluate_and_award(person, Some(&record), now);

        info!(
            person_id = %person.id,
            date = %record.date(),
            total = record.total(),
            streak = person.streak.current,
            new_badges = new_badges.len(),
            "Recorded activity"
        );

        Ok(TrackingOutcome {
            record,
            new_badges,
            streak: person.streak,
            stats: person.stats.clone(),
        })
    }

    /// Undo a deleted record's contribution to the person's stats.
    ///
    /// Streaks and badges already earned are not taken back.
    pub fn remove_record(person: &mut Person, record: &EmissionRecord) -> PersonStats {
        person.stats.revert_record(record);

        info!(
            person_id = %person.id,
            date = %record.date(),
            days_tracked = person.stats.days_tracked,
            "Removed record"
        );
        person.stats.clone()
    }

    /// Replace `original` with a record calculated from a corrected report.
    ///
    /// Stats are swapped over; the streak is only advanced if the corrected
    /// report moves to a later date. No badges are evaluated.
    pub fn correct_record(
        state: &EngineState,
        person: &mut Person,
        original: &EmissionRecord,
        report: &ActivityReport,
    ) -> EngineResult<EmissionRecord> {
        let factors = state.resolve(&person.location);
        let corrected = original.corrected(report, &factors)?;

        person.stats.revert_record(original);
        person.stats.apply_record(&corrected);
        person.streak = apply_streak(person.streak, corrected.date());

        info!(
            person_id = %person.id,
            date = %corrected.date(),
            previous_total = original.total(),
            total = corrected.total(),
            "Corrected record"
        );
        Ok(corrected)
    }
}
