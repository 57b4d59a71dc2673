//! Achievement badges
//!
//! - [`catalog`]: badge definitions, criteria and the validated catalog
//! - [`predicates`]: named rules for `custom` criteria
//! - [`engine`]: evaluation and awarding
//! - [`board`]: per-person badge listings and the leaderboard

pub mod board;
pub mod catalog;
pub mod engine;
pub mod predicates;

pub use board::{
    badge_board, badge_board_by_category, badge_leaderboard, total_reward_points, BadgeStatus,
    LeaderboardEntry, LEADERBOARD_RECENT_BADGES,
};
pub use catalog::{
    default_definitions, BadgeCatalog, BadgeCategory, BadgeDefinition, CatalogDocument, Criteria,
    CriteriaKind, Difficulty, Operator, Rarity, Rewards, PERIOD_LONGEST,
};
pub use engine::{evaluate_achievements, AchievementEngine};
pub use predicates::{Predicate, PredicateContext, PredicateRegistry};
