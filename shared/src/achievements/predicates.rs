//! Named predicates for `custom` badge criteria
//!
//! Custom badges carry no machine-readable rule; their behavior lives here,
//! keyed by badge id. The registry is built once and shared read-only.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::activity::{DIET_VEGAN, DIET_VEGETARIAN, MODE_BIKE, MODE_WALK};
use crate::person::Person;
use crate::record::EmissionRecord;

/// Everything a predicate may inspect
#[derive(Debug, Clone, Copy)]
pub struct PredicateContext<'a> {
    pub person: &'a Person,
    /// The record that triggered evaluation, if any
    pub record: Option<&'a EmissionRecord>,
}

pub type Predicate = Box<dyn Fn(&PredicateContext<'_>) -> bool + Send + Sync>;

/// Predicates keyed by badge id
#[derive(Default)]
pub struct PredicateRegistry {
    predicates: HashMap<String, Predicate>,
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.predicates.keys().collect();
        ids.sort();
        f.debug_struct("PredicateRegistry").field("ids", &ids).finish()
    }
}

static BUILTIN_REGISTRY: Lazy<Arc<PredicateRegistry>> =
    Lazy::new(|| Arc::new(PredicateRegistry::with_builtin_predicates()));

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry holding the builtin predicates
    pub fn builtin() -> Arc<PredicateRegistry> {
        Arc::clone(&BUILTIN_REGISTRY)
    }

    /// A fresh registry with the builtin predicates, ready for extension
    pub fn with_builtin_predicates() -> Self {
        let mut registry = Self::new();
        registry.register("first_track", |ctx| ctx.person.stats.days_tracked >= 1);
        registry.register("green_week", |ctx| ctx.person.streak.current >= 7);
        registry.register("eco_warrior", |ctx| {
            ctx.person.stats.average_daily < 3.0 && ctx.person.stats.days_tracked >= 30
        });
        registry.register("social_butterfly", |ctx| {
            ctx.person.social.posts_count >= 5 && ctx.person.social.likes_received >= 10
        });
        registry.register("perfect_day", |ctx| {
            ctx.record.is_some_and(|r| r.total() < 1.0)
        });
        registry.register("transport_hero", |ctx| {
            ctx.record
                .and_then(|r| r.activity().transport_mode())
                .is_some_and(|mode| mode == MODE_BIKE || mode == MODE_WALK)
        });
        registry.register("energy_saver", |ctx| {
            ctx.record
                .and_then(|r| r.activity().renewable_percentage())
                .is_some_and(|pct| pct >= 50.0)
        });
        registry.register("plant_based", |ctx| {
            ctx.record
                .and_then(|r| r.activity().diet_type())
                .is_some_and(|diet| diet == DIET_VEGAN || diet == DIET_VEGETARIAN)
        });
        registry
    }

    /// Register or replace the predicate for a badge id
    pub fn register<F>(&mut self, badge_id: impl Into<String>, predicate: F)
    where
        F: Fn(&PredicateContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(badge_id.into(), Box::new(predicate));
    }

    pub fn contains(&self, badge_id: &str) -> bool {
        self.predicates.contains_key(badge_id)
    }

    /// Run the predicate for `badge_id`. Unregistered ids are never satisfied.
    pub fn check(&self, badge_id: &str, ctx: &PredicateContext<'_>) -> bool {
        self.predicates
            .get(badge_id)
            .is_some_and(|predicate| predicate(ctx))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
