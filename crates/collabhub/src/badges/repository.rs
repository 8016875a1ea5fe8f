use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{BadgeId, UserBadge};
use crate::domain::UserId;

/// Storage abstraction for earned badges.
///
/// Implementations must enforce uniqueness of (user, badge) on `insert` and report a
/// duplicate as [`RepositoryError::Conflict`]; that constraint is what keeps concurrent
/// triggers from double-awarding.
pub trait BadgeRepository: Send + Sync {
    fn earned(&self, user_id: &UserId) -> Result<Vec<UserBadge>, RepositoryError>;
    fn insert(&self, badge: UserBadge) -> Result<UserBadge, RepositoryError>;
    fn fetch(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, RepositoryError>;
    fn update(&self, badge: UserBadge) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook that queues "badge earned" notifications.
pub trait BadgeNotifier: Send + Sync {
    fn publish(&self, notification: BadgeNotification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeNotification {
    pub template: String,
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
