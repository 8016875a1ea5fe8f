use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::catalog::{BadgeCatalog, BadgeDefinition};
use super::domain::{ActivitySnapshot, BadgeId, TriggerAction, UserBadge, UserBadgeView};
use super::engine::{AwardOutcome, BadgeEngine};
use super::repository::{BadgeNotification, BadgeNotifier, BadgeRepository, RepositoryError};
use super::stats::BadgeStats;
use crate::domain::UserId;

/// Service composing the badge engine with persistence and notification hooks.
pub struct BadgeService<R, N> {
    engine: Arc<BadgeEngine>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> BadgeService<R, N>
where
    R: BadgeRepository + 'static,
    N: BadgeNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, catalog: Arc<BadgeCatalog>) -> Self {
        Self {
            engine: Arc::new(BadgeEngine::new(catalog)),
            repository,
            notifier,
        }
    }

    pub fn engine(&self) -> &BadgeEngine {
        &self.engine
    }

    /// Every catalog definition, including retired badges.
    pub fn get_all_badges(&self) -> &[BadgeDefinition] {
        self.engine.catalog().all()
    }

    /// Badges earned by `user_id`, oldest first, joined with their definitions.
    pub fn get_user_badges(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserBadgeView>, BadgeServiceError> {
        let mut earned = self.repository.earned(user_id)?;
        earned.sort_by(|left, right| {
            left.earned_at
                .cmp(&right.earned_at)
                .then_with(|| left.badge_id.cmp(&right.badge_id))
        });

        let catalog = self.engine.catalog();
        let views = earned
            .into_iter()
            .filter_map(|badge| match catalog.get(&badge.badge_id) {
                Some(definition) => Some(UserBadgeView {
                    definition: definition.clone(),
                    badge,
                }),
                None => {
                    warn!(user_id = %user_id, badge_id = %badge.badge_id, "earned badge missing from catalog");
                    None
                }
            })
            .collect();
        Ok(views)
    }

    /// Grant every active badge the snapshot now qualifies for, returning only the badges
    /// created by this call.
    ///
    /// Only reading the earned set can fail the call. A badge whose insert fails is logged
    /// and skipped while the remaining badges are still awarded.
    pub fn check_and_award_badges(
        &self,
        user_id: &UserId,
        trigger: TriggerAction,
        snapshot: &ActivitySnapshot,
    ) -> Result<Vec<UserBadge>, BadgeServiceError> {
        let earned: BTreeSet<BadgeId> = self
            .repository
            .earned(user_id)?
            .into_iter()
            .map(|badge| badge.badge_id)
            .collect();

        let qualifying = self.engine.qualifying(snapshot, &earned);
        debug!(
            user_id = %user_id,
            trigger = trigger.label(),
            already_earned = earned.len(),
            qualifying = qualifying.len(),
            "evaluated badge criteria"
        );

        let earned_at = Utc::now();
        let mut awarded = Vec::new();
        for definition in qualifying {
            let badge = self.engine.grant(user_id, definition, earned_at);
            match self.record(badge) {
                Ok(AwardOutcome::Awarded(badge)) => {
                    info!(
                        user_id = %user_id,
                        badge_id = %badge.badge_id,
                        points = badge.points_awarded,
                        trigger = trigger.label(),
                        "badge awarded"
                    );
                    self.notify(&badge, definition);
                    awarded.push(badge);
                }
                Ok(AwardOutcome::AlreadyAwarded(badge_id)) => {
                    debug!(user_id = %user_id, badge_id = %badge_id, "badge already awarded");
                }
                // Each award stands alone; a failed insert is retried by the next check.
                Err(err) => {
                    warn!(
                        user_id = %user_id,
                        badge_id = %definition.id,
                        error = %err,
                        "failed to record badge award"
                    );
                }
            }
        }

        Ok(awarded)
    }

    pub fn get_badge_stats(&self, user_id: &UserId) -> Result<BadgeStats, BadgeServiceError> {
        let earned = self.repository.earned(user_id)?;
        Ok(self.engine.stats(&earned))
    }

    /// Show or hide an earned badge on the member's profile.
    pub fn set_badge_display(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
        is_displayed: bool,
    ) -> Result<UserBadge, BadgeServiceError> {
        let mut badge = self
            .repository
            .fetch(user_id, badge_id)?
            .ok_or(RepositoryError::NotFound)?;

        badge.is_displayed = is_displayed;
        self.repository.update(badge.clone())?;
        Ok(badge)
    }

    fn record(&self, badge: UserBadge) -> Result<AwardOutcome, RepositoryError> {
        let badge_id = badge.badge_id.clone();
        match self.repository.insert(badge) {
            Ok(stored) => Ok(AwardOutcome::Awarded(stored)),
            Err(RepositoryError::Conflict) => Ok(AwardOutcome::AlreadyAwarded(badge_id)),
            Err(err) => Err(err),
        }
    }

    fn notify(&self, badge: &UserBadge, definition: &BadgeDefinition) {
        let mut details = BTreeMap::new();
        details.insert("name".to_string(), definition.name.clone());
        details.insert("rarity".to_string(), definition.rarity.label().to_string());
        details.insert("points".to_string(), badge.points_awarded.to_string());

        let notification = BadgeNotification {
            template: "badge_earned".to_string(),
            user_id: badge.user_id.clone(),
            badge_id: badge.badge_id.clone(),
            details,
        };

        if let Err(err) = self.notifier.publish(notification) {
            warn!(
                user_id = %badge.user_id,
                badge_id = %badge.badge_id,
                error = %err,
                "failed to queue badge notification"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BadgeServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
