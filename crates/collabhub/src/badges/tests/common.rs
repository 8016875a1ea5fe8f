use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::badges::catalog::{BadgeCatalog, BadgeCriterion, BadgeDefinition};
use crate::badges::domain::{
    ActivityMetric, ActivitySnapshot, BadgeCategory, BadgeId, BadgeRarity, UserBadge,
};
use crate::badges::repository::{
    BadgeNotification, BadgeNotifier, BadgeRepository, NotifyError, RepositoryError,
};
use crate::badges::BadgeService;
use crate::domain::UserId;

pub(super) fn member() -> UserId {
    UserId::new("user-ada")
}

pub(super) fn newcomer_snapshot() -> ActivitySnapshot {
    ActivitySnapshot {
        projects_created: 1,
        comments_posted: 3,
        account_age_days: 12,
        ..ActivitySnapshot::default()
    }
}

pub(super) fn seasoned_snapshot() -> ActivitySnapshot {
    ActivitySnapshot {
        projects_created: 12,
        ideas_shared: 4,
        comments_posted: 64,
        likes_given: 30,
        likes_received: 140,
        collaboration_requests_sent: 6,
        collaborations_accepted: 3,
        collaborations_completed: 2,
        messages_sent: 40,
        account_age_days: 400,
        profile_completed: true,
    }
}

pub(super) fn definition(
    id: &str,
    category: BadgeCategory,
    rarity: BadgeRarity,
    points_awarded: u32,
    criteria: BadgeCriterion,
) -> BadgeDefinition {
    BadgeDefinition {
        id: BadgeId::new(id),
        name: id.replace('_', " "),
        description: format!("test badge {id}"),
        icon: "star".to_string(),
        category,
        rarity,
        points_awarded,
        criteria,
        is_active: true,
    }
}

/// Three-badge catalog: two reachable by a newcomer, one needing ten projects.
pub(super) fn small_catalog() -> BadgeCatalog {
    BadgeCatalog::new(vec![
        definition(
            "first_project",
            BadgeCategory::Milestone,
            BadgeRarity::Common,
            10,
            BadgeCriterion::at_least(ActivityMetric::ProjectsCreated, 1),
        ),
        definition(
            "first_comment",
            BadgeCategory::Engagement,
            BadgeRarity::Common,
            5,
            BadgeCriterion::at_least(ActivityMetric::CommentsPosted, 1),
        ),
        definition(
            "ten_projects",
            BadgeCategory::Milestone,
            BadgeRarity::Rare,
            50,
            BadgeCriterion::at_least(ActivityMetric::ProjectsCreated, 10),
        ),
    ])
    .expect("catalog ids are unique")
}

pub(super) fn earned_badge(user: &UserId, badge: &str, points: u32, day: u32) -> UserBadge {
    UserBadge {
        user_id: user.clone(),
        badge_id: BadgeId::new(badge),
        earned_at: Utc
            .with_ymd_and_hms(2025, 3, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        points_awarded: points,
        is_displayed: true,
    }
}

pub(super) fn build_service(
    catalog: BadgeCatalog,
) -> (
    BadgeService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = BadgeService::new(repository.clone(), notifier.clone(), Arc::new(catalog));
    (service, repository, notifier)
}

type BadgeKey = (UserId, BadgeId);

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<BadgeKey, UserBadge>>>,
}

impl MemoryRepository {
    pub(super) fn count_for(&self, user_id: &UserId) -> usize {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .keys()
            .filter(|(user, _)| user == user_id)
            .count()
    }

    pub(super) fn seed(&self, badge: UserBadge) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert((badge.user_id.clone(), badge.badge_id.clone()), badge);
    }
}

impl BadgeRepository for MemoryRepository {
    fn earned(&self, user_id: &UserId) -> Result<Vec<UserBadge>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|badge| &badge.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert(&self, badge: UserBadge) -> Result<UserBadge, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let key = (badge.user_id.clone(), badge.badge_id.clone());
        if guard.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(key, badge.clone());
        Ok(badge)
    }

    fn fetch(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(user_id.clone(), badge_id.clone())).cloned())
    }

    fn update(&self, badge: UserBadge) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let key = (badge.user_id.clone(), badge.badge_id.clone());
        match guard.get_mut(&key) {
            Some(existing) => {
                *existing = badge;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Repository whose reads never see earlier writes, forcing every award through the
/// uniqueness check the way two racing triggers would.
#[derive(Default, Clone)]
pub(super) struct StaleReadRepository {
    pub(super) inner: MemoryRepository,
}

impl BadgeRepository for StaleReadRepository {
    fn earned(&self, _user_id: &UserId) -> Result<Vec<UserBadge>, RepositoryError> {
        Ok(Vec::new())
    }

    fn insert(&self, badge: UserBadge) -> Result<UserBadge, RepositoryError> {
        self.inner.insert(badge)
    }

    fn fetch(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, RepositoryError> {
        self.inner.fetch(user_id, badge_id)
    }

    fn update(&self, badge: UserBadge) -> Result<(), RepositoryError> {
        self.inner.update(badge)
    }
}

/// Repository that rejects exactly one insert, the `fail_on`-th (1-based).
#[derive(Default)]
pub(super) struct FlakyInsertRepository {
    pub(super) inner: MemoryRepository,
    fail_on: usize,
    inserts: AtomicUsize,
}

impl FlakyInsertRepository {
    pub(super) fn failing_on(fail_on: usize) -> Self {
        Self {
            fail_on,
            ..Self::default()
        }
    }
}

impl BadgeRepository for FlakyInsertRepository {
    fn earned(&self, user_id: &UserId) -> Result<Vec<UserBadge>, RepositoryError> {
        self.inner.earned(user_id)
    }

    fn insert(&self, badge: UserBadge) -> Result<UserBadge, RepositoryError> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(RepositoryError::Unavailable("write timed out".to_string()));
        }
        self.inner.insert(badge)
    }

    fn fetch(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, RepositoryError> {
        self.inner.fetch(user_id, badge_id)
    }

    fn update(&self, badge: UserBadge) -> Result<(), RepositoryError> {
        self.inner.update(badge)
    }
}

pub(super) struct UnavailableRepository;

impl BadgeRepository for UnavailableRepository {
    fn earned(&self, _user_id: &UserId) -> Result<Vec<UserBadge>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _badge: UserBadge) -> Result<UserBadge, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _user_id: &UserId,
        _badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _badge: UserBadge) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<BadgeNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<BadgeNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl BadgeNotifier for MemoryNotifier {
    fn publish(&self, notification: BadgeNotification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl BadgeNotifier for OfflineNotifier {
    fn publish(&self, _notification: BadgeNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("queue offline".to_string()))
    }
}
