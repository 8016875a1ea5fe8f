use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::BadgeCatalog;
use super::domain::{BadgeCategory, BadgeRarity, UserBadge};

/// Aggregate view of a member's badge collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeStats {
    /// Active badges in the catalog.
    pub total_badges: usize,
    pub earned_badges: usize,
    pub total_points: u64,
    pub badges_by_category: BTreeMap<BadgeCategory, usize>,
    pub badges_by_rarity: BTreeMap<BadgeRarity, usize>,
    pub completion_percentage: u8,
}

pub(crate) fn compute(catalog: &BadgeCatalog, earned: &[UserBadge]) -> BadgeStats {
    let total_badges = catalog.total_active();
    let total_points = earned
        .iter()
        .map(|badge| u64::from(badge.points_awarded))
        .sum();

    let mut badges_by_category = BTreeMap::new();
    let mut badges_by_rarity = BTreeMap::new();
    let mut earned_active = 0usize;
    for badge in earned {
        let Some(definition) = catalog.get(&badge.badge_id) else {
            continue;
        };
        *badges_by_category.entry(definition.category).or_insert(0) += 1;
        *badges_by_rarity.entry(definition.rarity).or_insert(0) += 1;
        if definition.is_active {
            earned_active += 1;
        }
    }

    BadgeStats {
        total_badges,
        earned_badges: earned.len(),
        total_points,
        badges_by_category,
        badges_by_rarity,
        completion_percentage: completion_percentage(earned_active, total_badges),
    }
}

fn completion_percentage(earned_active: usize, total_active: usize) -> u8 {
    if total_active == 0 {
        return 0;
    }
    let ratio = earned_active as f64 / total_active as f64;
    (ratio * 100.0).round().min(100.0) as u8
}
