//! Achievement badges: catalog, evaluation, and awarding.
//!
//! A badge moves from not-earned to earned exactly once per member. The engine re-checks
//! every unearned active badge on each trigger, and the repository's uniqueness constraint
//! on (user, badge) absorbs races between concurrent triggers.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod repository;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use catalog::{BadgeCatalog, BadgeCriterion, BadgeDefinition, CatalogError};
pub use domain::{
    ActivityMetric, ActivitySnapshot, BadgeCategory, BadgeId, BadgeRarity, TriggerAction,
    UnknownTriggerAction, UserBadge, UserBadgeView,
};
pub use engine::{AwardOutcome, BadgeEngine};
pub use repository::{
    BadgeNotification, BadgeNotifier, BadgeRepository, NotifyError, RepositoryError,
};
pub use service::{BadgeService, BadgeServiceError};
pub use stats::BadgeStats;
