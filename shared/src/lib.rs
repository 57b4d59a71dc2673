//! Carbon Tracker Shared Library
//!
//! The calculation core: emission factor tables and their resolution by
//! location, the per-day emission calculator, streaks, running stats and the
//! achievement engine. Everything here is synchronous and free of I/O; the
//! engine and wasm crates wrap it.

pub mod achievements;
pub mod activity;
pub mod analytics;
pub mod calculator;
pub mod errors;
pub mod factors;
pub mod person;
pub mod record;
pub mod resolver;
pub mod streak;
pub mod validation;

// Re-export commonly used items
pub use achievements::{
    badge_board, badge_board_by_category, badge_leaderboard, evaluate_achievements,
    total_reward_points, AchievementEngine, BadgeCatalog, BadgeCategory, BadgeDefinition,
    BadgeStatus, CatalogDocument, Criteria, CriteriaKind, LeaderboardEntry, Operator,
    PredicateContext, PredicateRegistry,
};
pub use activity::*;
pub use analytics::{
    analyze, goal_progress, rolling_average, summarize_history, Analytics, CategoryShare,
    DailyPoint, EmissionCategory, GoalProgress, HistorySummary, Trend, TrendDirection,
};
pub use calculator::calculate_emissions;
pub use errors::*;
pub use factors::{CountryFactors, FactorSet, FactorTable, LocationAdjustment, LocationKey};
pub use person::{EarnedBadge, Goal, Person, PersonStats, SocialStats};
pub use record::{round2, CategoryEmissions, EmissionRecord};
pub use resolver::resolve_factors;
pub use streak::{apply_streak, apply_streak_at, Streak, StreakState};
