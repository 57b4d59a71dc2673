//! Badge board: the catalog as seen by one person, and the leaderboard
//! across people

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{BadgeCatalog, BadgeCategory, Difficulty, Rarity};
use crate::factors::LocationKey;
use crate::person::{EarnedBadge, Person};

/// Most recent badges shown per leaderboard entry
pub const LEADERBOARD_RECENT_BADGES: usize = 3;

/// One active badge with the person's status on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: BadgeCategory,
    pub difficulty: Difficulty,
    pub rarity: Rarity,
    pub points: u32,
    pub earned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<DateTime<Utc>>,
}

/// Active badges in catalog order, marked earned or not
pub fn badge_board(catalog: &BadgeCatalog, person: &Person) -> Vec<BadgeStatus> {
    catalog
        .active()
        .map(|badge| {
            let earned = person.earned(&badge.id);
            BadgeStatus {
                id: badge.id.clone(),
                title: badge.title.clone(),
                description: badge.description.clone(),
                icon: badge.icon.clone(),
                category: badge.category,
                difficulty: badge.difficulty,
                rarity: badge.rarity,
                points: badge.rewards.points,
                earned: earned.is_some(),
                earned_at: earned.map(|b| b.earned_at),
            }
        })
        .collect()
}

pub fn badge_board_by_category(
    catalog: &BadgeCatalog,
    person: &Person,
) -> BTreeMap<BadgeCategory, Vec<BadgeStatus>> {
    let mut grouped: BTreeMap<BadgeCategory, Vec<BadgeStatus>> = BTreeMap::new();
    for status in badge_board(catalog, person) {
        grouped.entry(status.category).or_default().push(status);
    }
    grouped
}

/// Reward points for every badge the person holds.
///
/// Badges missing from the catalog count zero; deactivated ones still count.
pub fn total_reward_points(catalog: &BadgeCatalog, person: &Person) -> u32 {
    person
        .badges
        .iter()
        .filter_map(|earned| catalog.get(&earned.id))
        .map(|badge| badge.rewards.points)
        .sum()
}

/// One person's line on the badge leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub person_id: Uuid,
    pub location: LocationKey,
    pub badge_count: usize,
    /// Sum of the progress values of held badges
    pub total_progress: u32,
    /// Newest first
    pub recent_badges: Vec<EarnedBadge>,
}

impl LeaderboardEntry {
    fn for_person(person: &Person) -> Self {
        let mut recent = person.badges.clone();
        recent.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        recent.truncate(LEADERBOARD_RECENT_BADGES);

        Self {
            person_id: person.id,
            location: person.location.clone(),
            badge_count: person.badges.len(),
            total_progress: person.badges.iter().map(|b| u32::from(b.progress)).sum(),
            recent_badges: recent,
        }
    }
}

/// Rank people by badge count, then by summed badge progress.
///
/// Ties keep the input order. At most `limit` entries are returned.
pub fn badge_leaderboard(people: &[Person], limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> =
        people.iter().map(LeaderboardEntry::for_person).collect();
    entries.sort_by(|a, b| {
        b.badge_count
            .cmp(&a.badge_count)
            .then_with(|| b.total_progress.cmp(&a.total_progress))
    });
    entries.truncate(limit);
    entries
}
