use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::catalog::{BadgeCatalog, BadgeDefinition};
use super::domain::{ActivitySnapshot, BadgeId, UserBadge};
use super::stats::{self, BadgeStats};
use crate::domain::UserId;

/// Result of attempting to persist a newly qualified badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardOutcome {
    Awarded(UserBadge),
    /// The (user, badge) pair already existed, typically because a concurrent trigger won.
    AlreadyAwarded(BadgeId),
}

/// Pure evaluator over (catalog, snapshot, earned set).
#[derive(Debug, Clone)]
pub struct BadgeEngine {
    catalog: Arc<BadgeCatalog>,
}

impl BadgeEngine {
    pub fn new(catalog: Arc<BadgeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// Active badges not yet in `earned` whose criteria hold for `snapshot`.
    pub fn qualifying<'a>(
        &'a self,
        snapshot: &ActivitySnapshot,
        earned: &BTreeSet<BadgeId>,
    ) -> Vec<&'a BadgeDefinition> {
        self.catalog
            .active()
            .filter(|badge| !earned.contains(&badge.id))
            .filter(|badge| badge.criteria.is_met(snapshot))
            .collect()
    }

    /// Build the earned-badge record, snapshotting the catalog's current point value.
    pub fn grant(
        &self,
        user_id: &UserId,
        definition: &BadgeDefinition,
        earned_at: DateTime<Utc>,
    ) -> UserBadge {
        UserBadge {
            user_id: user_id.clone(),
            badge_id: definition.id.clone(),
            earned_at,
            points_awarded: definition.points_awarded,
            is_displayed: true,
        }
    }

    pub fn stats(&self, earned: &[UserBadge]) -> BadgeStats {
        stats::compute(&self.catalog, earned)
    }
}
