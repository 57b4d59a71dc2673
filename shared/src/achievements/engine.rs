//! Achievement evaluation
//!
//! Evaluation is split in two: [`AchievementEngine::evaluate`] only reports
//! which badges the person now qualifies for, and
//! [`AchievementEngine::evaluate_and_award`] also appends them. Both skip
//! badges already held and inactive badges.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::catalog::{BadgeCatalog, BadgeDefinition, CriteriaKind};
use super::predicates::{PredicateContext, PredicateRegistry};
use crate::person::{EarnedBadge, Person};
use crate::record::EmissionRecord;

/// A badge catalog paired with the predicates its custom badges use
#[derive(Debug)]
pub struct AchievementEngine {
    catalog: BadgeCatalog,
    registry: Arc<PredicateRegistry>,
}

impl AchievementEngine {
    /// Engine over `catalog` using the builtin predicates
    pub fn new(catalog: BadgeCatalog) -> Self {
        Self::with_registry(catalog, PredicateRegistry::builtin())
    }

    /// Engine over `catalog` with a caller-supplied registry.
    ///
    /// Custom badges without a registered predicate are logged here, once,
    /// and never awarded.
    pub fn with_registry(catalog: BadgeCatalog, registry: Arc<PredicateRegistry>) -> Self {
        for badge in catalog.iter() {
            if badge.criteria.kind == CriteriaKind::Custom && !registry.contains(&badge.id) {
                warn!(
                    badge_id = %badge.id,
                    "Custom badge has no registered predicate and will never be awarded"
                );
            }
        }
        Self { catalog, registry }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Arc<PredicateRegistry> {
        &self.registry
    }

    /// Badges `person` newly qualifies for, without awarding them
    pub fn evaluate(
        &self,
        person: &Person,
        latest: Option<&EmissionRecord>,
        now: DateTime<Utc>,
    ) -> Vec<EarnedBadge> {
        newly_earned(&self.catalog, &self.registry, person, latest, now)
    }

    /// Evaluate and append the new badges to `person`.
    ///
    /// Calling again with the same state returns an empty list.
    pub fn evaluate_and_award(
        &self,
        person: &mut Person,
        latest: Option<&EmissionRecord>,
        now: DateTime<Utc>,
    ) -> Vec<EarnedBadge> {
        let earned = self.evaluate(person, latest, now);
        for badge in &earned {
            person.award(badge.clone());
        }
        earned
    }
}

fn newly_earned(
    catalog: &BadgeCatalog,
    registry: &PredicateRegistry,
    person: &Person,
    latest: Option<&EmissionRecord>,
    now: DateTime<Utc>,
) -> Vec<EarnedBadge> {
    let ctx = PredicateContext {
        person,
        record: latest,
    };

    catalog
        .active()
        .filter(|badge| !person.has_badge(&badge.id))
        .filter(|badge| is_satisfied(registry, badge, &ctx))
        .map(|badge| EarnedBadge::award(badge, now))
        .collect()
}

fn is_satisfied(
    registry: &PredicateRegistry,
    badge: &BadgeDefinition,
    ctx: &PredicateContext<'_>,
) -> bool {
    let criteria = &badge.criteria;
    let person = ctx.person;

    let measured = match &criteria.kind {
        CriteriaKind::Streak => {
            let streak = if criteria.reads_longest_streak() {
                person.streak.longest
            } else {
                person.streak.current
            };
            streak as f64
        }
        CriteriaKind::TotalEmissions => person.stats.total_emissions,
        CriteriaKind::DailyAverage => person.stats.average_daily,
        CriteriaKind::Posts => person.social.posts_count as f64,
        CriteriaKind::Likes => person.social.likes_received as f64,
        CriteriaKind::Reduction => {
            debug!(badge_id = %badge.id, "Reduction criteria are not evaluated");
            return false;
        }
        CriteriaKind::Custom => return registry.check(&badge.id, ctx),
        // Rejected when the catalog is built
        CriteriaKind::Unrecognized(_) => return false,
    };

    criteria.is_met_by(measured)
}

/// Evaluate `catalog` against `person` with the builtin predicates and
/// award whatever is newly earned.
///
/// The catalog is borrowed as is; custom badges missing from the builtin
/// registry are skipped without a warning.
pub fn evaluate_achievements(
    person: &mut Person,
    latest: &EmissionRecord,
    catalog: &BadgeCatalog,
    now: DateTime<Utc>,
) -> Vec<EarnedBadge> {
    let registry = PredicateRegistry::builtin();
    let earned = newly_earned(catalog, &registry, person, Some(latest), now);
    for badge in &earned {
        person.award(badge.clone());
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::{
        BadgeCategory, Criteria, Difficulty, Operator, Rarity, Rewards, PERIOD_LONGEST,
    };
    use crate::activity::{ActivityReport, TransportReport};
    use crate::calculator::calculate_emissions;
    use crate::factors::{FactorTable, LocationKey};
    use crate::streak::Streak;
    use chrono::NaiveDate;

    fn definition(id: &str, criteria: Criteria) -> BadgeDefinition {
        BadgeDefinition {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            icon: String::new(),
            category: BadgeCategory::Milestone,
            difficulty: Difficulty::Medium,
            rarity: Rarity::Rare,
            criteria,
            rewards: Rewards::default(),
            is_active: true,
        }
    }

    fn engine(definitions: Vec<BadgeDefinition>) -> AchievementEngine {
        AchievementEngine::new(BadgeCatalog::from_definitions(definitions).unwrap())
    }

    fn record(mode: &str, distance: f64) -> EmissionRecord {
        let report = ActivityReport::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
            .with_transport(TransportReport::new(mode, distance));
        calculate_emissions(&report, &FactorTable::builtin().global).unwrap()
    }

    fn person() -> Person {
        Person::new(LocationKey::country("Canada"))
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // =========================================================================
    // Kinds
    // =========================================================================

    #[test]
    fn test_streak_current_and_longest() {
        let engine = engine(vec![
            definition("current7", Criteria::at_least(CriteriaKind::Streak, 7.0)),
            definition(
                "longest7",
                Criteria {
                    period: Some(PERIOD_LONGEST.to_string()),
                    ..Criteria::at_least(CriteriaKind::Streak, 7.0)
                },
            ),
        ]);
        let mut p = person();
        p.streak = Streak {
            current: 2,
            longest: 9,
            last_tracked: None,
        };

        let earned = engine.evaluate(&p, None, now());
        let ids: Vec<_> = earned.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["longest7"]);
    }

    #[test]
    fn test_stat_kinds() {
        let engine = engine(vec![
            definition("total", Criteria::at_least(CriteriaKind::TotalEmissions, 100.0)),
            definition(
                "average",
                Criteria::new(CriteriaKind::DailyAverage, 3.0).with_operator(Operator::Lte),
            ),
            definition("posts", Criteria::at_least(CriteriaKind::Posts, 1.0)),
            definition(
                "likes",
                Criteria::new(CriteriaKind::Likes, 10.0).with_operator(Operator::Eq),
            ),
        ]);
        let mut p = person();
        p.stats.total_emissions = 120.0;
        p.stats.average_daily = 4.0;
        p.social.posts_count = 0;
        p.social.likes_received = 10;

        let ids: Vec<_> = engine
            .evaluate(&p, None, now())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["total".to_string(), "likes".to_string()]);
    }

    #[test]
    fn test_reduction_never_awarded() {
        let engine = engine(vec![definition(
            "reducer",
            Criteria::new(CriteriaKind::Reduction, 0.0),
        )]);
        let mut p = person();
        p.stats.total_emissions = 1000.0;
        assert!(engine.evaluate(&p, None, now()).is_empty());
    }

    #[test]
    fn test_unknown_operator_never_awarded() {
        let engine = engine(vec![definition(
            "odd",
            Criteria::new(CriteriaKind::Posts, 0.0)
                .with_operator(Operator::Other("gt".to_string())),
        )]);
        assert!(engine.evaluate(&person(), None, now()).is_empty());
    }

    #[test]
    fn test_missing_operator_never_awarded() {
        let engine = engine(vec![definition(
            "streaker",
            Criteria {
                period: Some("current".to_string()),
                ..Criteria::new(CriteriaKind::Streak, 1.0)
            },
        )]);
        let mut p = person();
        p.streak.current = 5;
        assert!(engine.evaluate_and_award(&mut p, None, now()).is_empty());
    }

    #[test]
    fn test_inactive_badge_skipped() {
        let mut inactive = definition("always", Criteria::at_least(CriteriaKind::Posts, 0.0));
        inactive.is_active = false;
        let engine = engine(vec![inactive]);
        assert!(engine.evaluate(&person(), None, now()).is_empty());
    }

    #[test]
    fn test_unregistered_custom_badge_never_awarded() {
        let engine = engine(vec![definition(
            "early_adopter",
            Criteria::new(CriteriaKind::Custom, 1000.0),
        )]);
        assert!(engine.evaluate(&person(), None, now()).is_empty());
    }

    #[test]
    fn test_custom_registry_is_used() {
        let mut registry = PredicateRegistry::new();
        registry.register("always", |_| true);
        let catalog = BadgeCatalog::from_definitions(vec![definition(
            "always",
            Criteria::new(CriteriaKind::Custom, 1.0),
        )])
        .unwrap();
        let engine = AchievementEngine::with_registry(catalog, Arc::new(registry));
        assert_eq!(engine.evaluate(&person(), None, now()).len(), 1);
    }

    // =========================================================================
    // Awarding
    // =========================================================================

    #[test]
    fn test_second_evaluation_returns_nothing() {
        let engine = AchievementEngine::new(BadgeCatalog::builtin().clone());
        let mut p = person();
        let r = record("bike", 4.0);
        p.stats.apply_record(&r);
        p.streak = crate::streak::apply_streak(p.streak, r.date());

        let first = engine.evaluate_and_award(&mut p, Some(&r), now());
        assert!(!first.is_empty());
        let second = engine.evaluate_and_award(&mut p, Some(&r), now());
        assert!(second.is_empty());
        assert_eq!(p.badges.len(), first.len());
    }

    #[test]
    fn test_first_day_badges() {
        let mut p = person();
        let r = record("bike", 4.0);
        p.stats.apply_record(&r);
        p.streak = crate::streak::apply_streak(p.streak, r.date());

        let at = now();
        let earned = evaluate_achievements(&mut p, &r, BadgeCatalog::builtin(), at);
        let mut ids: Vec<_> = earned.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["first_track", "low_impact", "perfect_day", "transport_hero"]);
        assert!(earned.iter().all(|b| b.progress == 100 && b.earned_at == at));
    }

    #[test]
    fn test_evaluate_achievements_borrows_catalog() {
        let catalog = BadgeCatalog::from_definitions(vec![
            definition("early_adopter", Criteria::new(CriteriaKind::Custom, 1000.0)),
            definition("first_track", Criteria::new(CriteriaKind::Custom, 1.0)),
        ])
        .unwrap();
        let before = catalog.clone();
        let mut p = person();
        let r = record("car", 10.0);
        p.stats.apply_record(&r);

        let first = evaluate_achievements(&mut p, &r, &catalog, now());
        let second = evaluate_achievements(&mut p, &r, &catalog, now());

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "first_track");
        assert!(second.is_empty());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let engine = AchievementEngine::new(BadgeCatalog::builtin().clone());
        let mut p = person();
        p.stats.days_tracked = 1;
        let before = p.clone();
        let earned = engine.evaluate(&p, None, now());
        assert!(!earned.is_empty());
        assert_eq!(p, before);
    }

    #[test]
    fn test_held_badges_skipped() {
        let engine = engine(vec![definition(
            "posts",
            Criteria::at_least(CriteriaKind::Posts, 0.0),
        )]);
        let mut p = person();
        let earned = engine.evaluate_and_award(&mut p, None, now());
        assert_eq!(earned.len(), 1);
        assert!(engine.evaluate(&p, None, now()).is_empty());
    }
}
