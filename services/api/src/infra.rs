use collabhub::badges::{
    BadgeCatalog, BadgeId, BadgeNotification, BadgeNotifier, BadgeRepository, NotifyError,
    RepositoryError, UserBadge,
};
use collabhub::config::BadgeConfig;
use collabhub::UserId;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type BadgeKey = (UserId, BadgeId);

/// Process-local badge store; the (user, badge) key doubles as the uniqueness constraint.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBadgeRepository {
    records: Arc<Mutex<HashMap<BadgeKey, UserBadge>>>,
}

impl BadgeRepository for InMemoryBadgeRepository {
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
        if guard.contains_key(&key) {
            guard.insert(key, badge);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

/// Notification queue stand-in that records and logs every "badge earned" event.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBadgeNotifier {
    events: Arc<Mutex<Vec<BadgeNotification>>>,
}

impl BadgeNotifier for InMemoryBadgeNotifier {
    fn publish(&self, notification: BadgeNotification) -> Result<(), NotifyError> {
        info!(
            user_id = %notification.user_id,
            badge_id = %notification.badge_id,
            template = %notification.template,
            "queued badge notification"
        );
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryBadgeNotifier {
    pub(crate) fn events(&self) -> Vec<BadgeNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn configured_catalog(config: &BadgeConfig) -> Arc<BadgeCatalog> {
    Arc::new(BadgeCatalog::standard().with_inactive(&config.inactive_badges))
}

pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
