//! Person state threaded through the tracking pipeline
//!
//! Nothing here is persisted by this crate. The caller loads a [`Person`],
//! passes it through calculation, streak and achievement updates, and saves
//! whatever comes back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::{BadgeCategory, BadgeDefinition};
use crate::factors::LocationKey;
use crate::record::EmissionRecord;
use crate::streak::Streak;

/// Progress value stored on every awarded badge
pub const BADGE_COMPLETE: u8 = 100;

/// Running emission statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersonStats {
    /// Sum of unrounded daily totals, kg CO2
    pub total_emissions: f64,
    pub days_tracked: u32,
    pub average_daily: f64,
    /// Lowest single-day total seen
    pub best_day: Option<f64>,
    /// Highest single-day total seen
    pub worst_day: Option<f64>,
}

impl PersonStats {
    /// Fold one new record into the stats
    pub fn apply_record(&mut self, record: &EmissionRecord) {
        self.total_emissions += record.raw_total();
        self.days_tracked += 1;
        self.average_daily = self.total_emissions / self.days_tracked as f64;

        let day_total = record.total();
        self.best_day = Some(self.best_day.map_or(day_total, |best| best.min(day_total)));
        self.worst_day = Some(self.worst_day.map_or(day_total, |worst| worst.max(day_total)));
    }

    /// Undo a deleted record's contribution.
    ///
    /// Best and worst days are kept; recomputing them needs the full history.
    pub fn revert_record(&mut self, record: &EmissionRecord) {
        self.days_tracked = self.days_tracked.saturating_sub(1);
        if self.days_tracked == 0 {
            self.total_emissions = 0.0;
            self.average_daily = 0.0;
            return;
        }
        self.total_emissions = (self.total_emissions - record.raw_total()).max(0.0);
        self.average_daily = self.total_emissions / self.days_tracked as f64;
    }
}

/// Counters owned by the social feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialStats {
    pub posts_count: u32,
    pub likes_received: u32,
    pub followers: u32,
    pub following: u32,
}

/// A badge a person holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub id: String,
    pub title: String,
    pub category: BadgeCategory,
    pub earned_at: DateTime<Utc>,
    pub progress: u8,
}

impl EarnedBadge {
    /// A completed award of `definition` at `earned_at`
    pub fn award(definition: &BadgeDefinition, earned_at: DateTime<Utc>) -> Self {
        Self {
            id: definition.id.clone(),
            title: definition.title.clone(),
            category: definition.category,
            earned_at,
            progress: BADGE_COMPLETE,
        }
    }
}

/// A daily emissions target the person set for themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub title: String,
    /// Target daily emissions, kg CO2
    pub target: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub achieved: bool,
}

impl Goal {
    pub fn new(title: impl Into<String>, target: f64) -> Self {
        Self {
            title: title.into(),
            target,
            unit: "kg".to_string(),
            deadline: None,
            achieved: false,
        }
    }
}

/// Everything the engine reads and updates for one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub location: LocationKey,
    #[serde(default)]
    pub stats: PersonStats,
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub social: SocialStats,
    #[serde(default)]
    pub badges: Vec<EarnedBadge>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Person {
    pub fn new(location: LocationKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            location,
            stats: PersonStats::default(),
            streak: Streak::default(),
            social: SocialStats::default(),
            badges: Vec::new(),
            goals: Vec::new(),
        }
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }

    /// Append a badge unless one with the same id is already held.
    ///
    /// Returns whether the badge was added.
    pub fn award(&mut self, badge: EarnedBadge) -> bool {
        if self.has_badge(&badge.id) {
            return false;
        }
        self.badges.push(badge);
        true
    }

    pub fn earned(&self, badge_id: &str) -> Option<&EarnedBadge> {
        self.badges.iter().find(|b| b.id == badge_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityReport;
    use crate::record::CategoryEmissions;
    use chrono::NaiveDate;
    use fake::Fake;
    use proptest::prelude::*;

    fn record(total: f64) -> EmissionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let emissions = CategoryEmissions {
            transport: total,
            ..CategoryEmissions::default()
        };
        EmissionRecord::new(date, ActivityReport::new(date), emissions, None)
    }

    // =========================================================================
    // Stats
    // =========================================================================

    #[test]
    fn test_first_record_sets_best_and_worst() {
        let mut stats = PersonStats::default();
        assert_eq!(stats.best_day, None);

        stats.apply_record(&record(4.0));
        assert_eq!(stats.days_tracked, 1);
        assert_eq!(stats.average_daily, 4.0);
        assert_eq!(stats.best_day, Some(4.0));
        assert_eq!(stats.worst_day, Some(4.0));
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = PersonStats::default();
        for total in [4.0, 1.5, 9.0] {
            stats.apply_record(&record(total));
        }
        assert_eq!(stats.total_emissions, 14.5);
        assert_eq!(stats.days_tracked, 3);
        assert!((stats.average_daily - 14.5 / 3.0).abs() < 1e-9);
        assert_eq!(stats.best_day, Some(1.5));
        assert_eq!(stats.worst_day, Some(9.0));
    }

    #[test]
    fn test_zero_emission_day_is_best() {
        let mut stats = PersonStats::default();
        stats.apply_record(&record(3.0));
        stats.apply_record(&record(0.0));
        assert_eq!(stats.best_day, Some(0.0));
    }

    #[test]
    fn test_revert_record() {
        let mut stats = PersonStats::default();
        let a = record(4.0);
        let b = record(6.0);
        stats.apply_record(&a);
        stats.apply_record(&b);

        stats.revert_record(&b);
        assert_eq!(stats.days_tracked, 1);
        assert_eq!(stats.total_emissions, 4.0);
        assert_eq!(stats.average_daily, 4.0);
        assert_eq!(stats.worst_day, Some(6.0));

        stats.revert_record(&a);
        assert_eq!(stats.days_tracked, 0);
        assert_eq!(stats.average_daily, 0.0);
    }

    #[test]
    fn test_revert_on_empty_stats_saturates() {
        let mut stats = PersonStats::default();
        stats.revert_record(&record(2.0));
        assert_eq!(stats.days_tracked, 0);
        assert_eq!(stats.total_emissions, 0.0);
    }

    // =========================================================================
    // Badges
    // =========================================================================

    fn badge(id: &str) -> EarnedBadge {
        EarnedBadge {
            id: id.to_string(),
            title: "Test".to_string(),
            category: BadgeCategory::Special,
            earned_at: Utc::now(),
            progress: BADGE_COMPLETE,
        }
    }

    #[test]
    fn test_award_at_most_once() {
        let mut person = Person::new(LocationKey::country("Japan"));
        assert!(person.award(badge("first_track")));
        assert!(!person.award(badge("first_track")));
        assert_eq!(person.badges.len(), 1);
        assert!(person.has_badge("first_track"));
        assert!(person.earned("green_week").is_none());
    }

    #[test]
    fn test_person_from_minimal_json() {
        let json = r#"{
            "id": "8f0e6c43-2c6c-4f0b-9d55-3c1f5a0f1e2a",
            "location": {"country": "India", "city": "Pune"}
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.location.city.as_deref(), Some("Pune"));
        assert_eq!(person.streak, Streak::default());
        assert!(person.badges.is_empty());
        assert!(person.goals.is_empty());
    }

    #[test]
    fn test_goal_defaults() {
        let json = r#"{
            "id": "8f0e6c43-2c6c-4f0b-9d55-3c1f5a0f1e2a",
            "location": {"country": "Germany"},
            "goals": [{"title": "Under five", "target": 5, "deadline": "2024-12-31"}]
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        let goal = &person.goals[0];
        assert_eq!(goal.target, 5.0);
        assert_eq!(goal.unit, "");
        assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert!(!goal.achieved);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: best <= average <= worst after any sequence of records
        #[test]
        fn prop_average_between_best_and_worst(
            totals in prop::collection::vec(0.0f64..50.0, 1..30),
        ) {
            let mut stats = PersonStats::default();
            for total in &totals {
                stats.apply_record(&record((*total * 100.0).round() / 100.0));
            }
            let best = stats.best_day.unwrap();
            let worst = stats.worst_day.unwrap();
            prop_assert!(best <= stats.average_daily + 1e-9);
            prop_assert!(stats.average_daily <= worst + 1e-9);
            prop_assert_eq!(stats.days_tracked as usize, totals.len());
        }
    }

    #[test]
    fn test_apply_then_revert_restores_totals() {
        for _ in 0..20 {
            let mut stats = PersonStats::default();
            stats.apply_record(&record(5.0));
            let before = stats.clone();
            let extra = record((0.0..40.0).fake::<f64>());
            stats.apply_record(&extra);
            stats.revert_record(&extra);
            assert_eq!(stats.days_tracked, before.days_tracked);
            assert!((stats.total_emissions - before.total_emissions).abs() < 1e-9);
        }
    }
}
