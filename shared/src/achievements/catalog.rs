//! Badge definitions and the validated catalog
//!
//! A catalog is data: it can be loaded from JSON or TOML and written back
//! without loss, including criteria kinds and operators this crate does not
//! understand. Unknown or missing operators evaluate false; unknown
//! criteria kinds are rejected when the catalog is built.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

// ============================================================================
// Classification Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Streak,
    Emission,
    Social,
    Challenge,
    Milestone,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

// ============================================================================
// Criteria
// ============================================================================

/// What a badge's criteria measures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CriteriaKind {
    /// Current streak, or longest when the period is "longest"
    Streak,
    TotalEmissions,
    DailyAverage,
    /// Period-over-period reduction; never satisfied
    Reduction,
    Posts,
    Likes,
    /// Named predicate looked up by badge id
    Custom,
    /// Anything else, kept verbatim for round-tripping
    Unrecognized(String),
}

impl CriteriaKind {
    pub fn as_str(&self) -> &str {
        match self {
            CriteriaKind::Streak => "streak",
            CriteriaKind::TotalEmissions => "total_emissions",
            CriteriaKind::DailyAverage => "daily_average",
            CriteriaKind::Reduction => "reduction",
            CriteriaKind::Posts => "posts",
            CriteriaKind::Likes => "likes",
            CriteriaKind::Custom => "custom",
            CriteriaKind::Unrecognized(other) => other,
        }
    }
}

impl From<String> for CriteriaKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "streak" => CriteriaKind::Streak,
            "total_emissions" => CriteriaKind::TotalEmissions,
            "daily_average" => CriteriaKind::DailyAverage,
            "reduction" => CriteriaKind::Reduction,
            "posts" => CriteriaKind::Posts,
            "likes" => CriteriaKind::Likes,
            "custom" => CriteriaKind::Custom,
            _ => CriteriaKind::Unrecognized(value),
        }
    }
}

impl From<CriteriaKind> for String {
    fn from(kind: CriteriaKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CriteriaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison between a measured value and the criteria target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Gte,
    Lte,
    Eq,
    /// Unknown operator; never satisfied
    Other(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Eq => "eq",
            Operator::Other(other) => other,
        }
    }

    /// Compare `value` against `target`
    pub fn compare(&self, value: f64, target: f64) -> bool {
        match self {
            Operator::Gte => value >= target,
            Operator::Lte => value <= target,
            Operator::Eq => value == target,
            Operator::Other(_) => false,
        }
    }
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "gte" => Operator::Gte,
            "lte" => Operator::Lte,
            "eq" => Operator::Eq,
            _ => Operator::Other(value),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// Period value that makes a streak criteria read the longest streak
pub const PERIOD_LONGEST: &str = "longest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(alias = "type")]
    pub kind: CriteriaKind,
    pub value: f64,
    /// Absent for custom criteria; a comparator kind without one is never met
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl Criteria {
    /// Criteria with no operator
    pub fn new(kind: CriteriaKind, value: f64) -> Self {
        Self {
            kind,
            value,
            operator: None,
            period: None,
        }
    }

    /// `measured >= value`
    pub fn at_least(kind: CriteriaKind, value: f64) -> Self {
        Self::new(kind, value).with_operator(Operator::Gte)
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Compare a measured value against the target
    pub fn is_met_by(&self, measured: f64) -> bool {
        self.operator
            .as_ref()
            .is_some_and(|op| op.compare(measured, self.value))
    }

    pub fn reads_longest_streak(&self) -> bool {
        self.period.as_deref() == Some(PERIOD_LONGEST)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Rewards {
    #[serde(default)]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
}

fn default_active() -> bool {
    true
}

/// One achievement rule plus its presentation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: BadgeCategory,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub rarity: Rarity,
    pub criteria: Criteria,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

// ============================================================================
// Catalog
// ============================================================================

/// The on-disk shape of a catalog: `{"badges": [...]}` or `[[badges]]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogDocument {
    #[serde(default)]
    pub badges: Vec<BadgeDefinition>,
}

/// A validated list of badge definitions.
///
/// Ids are unique and non-empty, and every criteria kind is recognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument")]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl TryFrom<CatalogDocument> for BadgeCatalog {
    type Error = ConfigurationError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        BadgeCatalog::from_definitions(document.badges)
    }
}

static BUILTIN_CATALOG: Lazy<BadgeCatalog> = Lazy::new(|| BadgeCatalog {
    badges: default_definitions(),
});

impl BadgeCatalog {
    /// Validate and wrap a list of definitions, keeping their order
    pub fn from_definitions(badges: Vec<BadgeDefinition>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for (position, badge) in badges.iter().enumerate() {
            if badge.id.trim().is_empty() {
                return Err(ConfigurationError::EmptyBadgeId(position));
            }
            if !seen.insert(badge.id.as_str()) {
                return Err(ConfigurationError::DuplicateBadgeId(badge.id.clone()));
            }
            if let CriteriaKind::Unrecognized(kind) = &badge.criteria.kind {
                return Err(ConfigurationError::UnknownCriteriaKind {
                    badge_id: badge.id.clone(),
                    kind: kind.clone(),
                });
            }
        }
        Ok(Self { badges })
    }

    /// The fifteen badges shipped with the crate
    pub fn builtin() -> &'static BadgeCatalog {
        &BUILTIN_CATALOG
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter()
    }

    /// Badges that can still be awarded
    pub fn active(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter().filter(|b| b.is_active)
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            badges: self.badges.clone(),
        }
    }
}

// ============================================================================
// Default Badges
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn badge(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    category: BadgeCategory,
    difficulty: Difficulty,
    criteria: Criteria,
    points: u32,
    reward_title: &str,
    rarity: Rarity,
) -> BadgeDefinition {
    BadgeDefinition {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        difficulty,
        rarity,
        criteria,
        rewards: Rewards {
            points,
            title: Some(reward_title.to_string()),
            benefits: Vec::new(),
        },
        is_active: true,
    }
}

/// Definitions of the builtin catalog
pub fn default_definitions() -> Vec<BadgeDefinition> {
    use BadgeCategory::*;
    use CriteriaKind::{Custom, DailyAverage, Likes, Posts, Streak as StreakKind, TotalEmissions};

    vec![
        badge(
            "first_track",
            "First Steps",
            "Track your first day of emissions",
            "🌱",
            Streak,
            Difficulty::Easy,
            Criteria::new(Custom, 1.0),
            10,
            "Eco Beginner",
            Rarity::Common,
        ),
        badge(
            "green_week",
            "Green Week",
            "Track emissions for 7 consecutive days",
            "📅",
            Streak,
            Difficulty::Medium,
            Criteria::at_least(StreakKind, 7.0),
            50,
            "Consistent Tracker",
            Rarity::Rare,
        ),
        badge(
            "month_master",
            "Month Master",
            "Track emissions for 30 consecutive days",
            "🏆",
            Streak,
            Difficulty::Hard,
            Criteria::at_least(StreakKind, 30.0),
            200,
            "Dedication Champion",
            Rarity::Epic,
        ),
        badge(
            "low_impact",
            "Low Impact",
            "Maintain daily average below 3kg CO2",
            "🌿",
            Emission,
            Difficulty::Medium,
            Criteria::new(DailyAverage, 3.0).with_operator(Operator::Lte),
            75,
            "Eco Conscious",
            Rarity::Rare,
        ),
        badge(
            "perfect_day",
            "Perfect Day",
            "Have a day with less than 1kg CO2 emissions",
            "⭐",
            Emission,
            Difficulty::Hard,
            Criteria::new(Custom, 1.0),
            100,
            "Carbon Minimalist",
            Rarity::Epic,
        ),
        badge(
            "eco_warrior",
            "Eco Warrior",
            "Maintain low emissions for 30+ days",
            "🛡️",
            Emission,
            Difficulty::Legendary,
            Criteria::new(Custom, 30.0),
            500,
            "Environmental Guardian",
            Rarity::Legendary,
        ),
        badge(
            "first_post",
            "First Share",
            "Share your first post with the community",
            "📝",
            Social,
            Difficulty::Easy,
            Criteria::at_least(Posts, 1.0),
            25,
            "Community Member",
            Rarity::Common,
        ),
        badge(
            "social_butterfly",
            "Social Butterfly",
            "Get 10 likes on your posts",
            "🦋",
            Social,
            Difficulty::Medium,
            Criteria::new(Custom, 10.0),
            60,
            "Popular Eco-Advocate",
            Rarity::Rare,
        ),
        badge(
            "influencer",
            "Eco Influencer",
            "Get 100 likes across all posts",
            "📢",
            Social,
            Difficulty::Hard,
            Criteria::at_least(Likes, 100.0),
            300,
            "Green Influencer",
            Rarity::Epic,
        ),
        badge(
            "transport_hero",
            "Transport Hero",
            "Use bike or walk for transportation",
            "🚴",
            Challenge,
            Difficulty::Easy,
            Criteria::new(Custom, 1.0),
            30,
            "Green Commuter",
            Rarity::Common,
        ),
        badge(
            "energy_saver",
            "Energy Saver",
            "Use 50%+ renewable energy",
            "⚡",
            Challenge,
            Difficulty::Medium,
            Criteria::new(Custom, 50.0),
            40,
            "Renewable Champion",
            Rarity::Rare,
        ),
        badge(
            "plant_based",
            "Plant Based",
            "Choose vegetarian or vegan diet",
            "🥬",
            Challenge,
            Difficulty::Medium,
            Criteria::new(Custom, 1.0),
            45,
            "Plant Advocate",
            Rarity::Rare,
        ),
        badge(
            "hundred_club",
            "Hundred Club",
            "Track 100 days of emissions",
            "💯",
            Milestone,
            Difficulty::Hard,
            Criteria::at_least(TotalEmissions, 100.0),
            250,
            "Tracking Master",
            Rarity::Epic,
        ),
        badge(
            "year_tracker",
            "Year Tracker",
            "Track emissions for a full year",
            "🗓️",
            Milestone,
            Difficulty::Legendary,
            Criteria::at_least(StreakKind, 365.0),
            1000,
            "Annual Champion",
            Rarity::Legendary,
        ),
        badge(
            "early_adopter",
            "Early Adopter",
            "One of the first 1000 users",
            "🌟",
            Special,
            Difficulty::Legendary,
            Criteria::new(Custom, 1000.0),
            500,
            "Pioneer",
            Rarity::Legendary,
        ),
    ]
}
