use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::BadgeDefinition;
use crate::domain::UserId;

/// Identifier wrapper for catalog badges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BadgeId(pub String);

impl BadgeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Engagement,
    Collaboration,
    Milestone,
    Social,
    Creativity,
}

impl BadgeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            BadgeCategory::Engagement => "engagement",
            BadgeCategory::Collaboration => "collaboration",
            BadgeCategory::Milestone => "milestone",
            BadgeCategory::Social => "social",
            BadgeCategory::Creativity => "creativity",
        }
    }
}

/// Scarcity tier used for display and statistics. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    pub const fn label(self) -> &'static str {
        match self {
            BadgeRarity::Common => "common",
            BadgeRarity::Rare => "rare",
            BadgeRarity::Epic => "epic",
            BadgeRarity::Legendary => "legendary",
        }
    }
}

/// Aggregated facts about one member's activity, recomputed by the caller on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySnapshot {
    pub projects_created: u32,
    pub ideas_shared: u32,
    pub comments_posted: u32,
    pub likes_given: u32,
    pub likes_received: u32,
    pub collaboration_requests_sent: u32,
    pub collaborations_accepted: u32,
    pub collaborations_completed: u32,
    pub messages_sent: u32,
    pub account_age_days: u32,
    pub profile_completed: bool,
}

/// Countable activity a badge criterion can threshold on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityMetric {
    ProjectsCreated,
    IdeasShared,
    CommentsPosted,
    LikesGiven,
    LikesReceived,
    CollaborationRequestsSent,
    CollaborationsAccepted,
    CollaborationsCompleted,
    MessagesSent,
    AccountAgeDays,
}

impl ActivityMetric {
    pub fn value(self, snapshot: &ActivitySnapshot) -> u32 {
        match self {
            ActivityMetric::ProjectsCreated => snapshot.projects_created,
            ActivityMetric::IdeasShared => snapshot.ideas_shared,
            ActivityMetric::CommentsPosted => snapshot.comments_posted,
            ActivityMetric::LikesGiven => snapshot.likes_given,
            ActivityMetric::LikesReceived => snapshot.likes_received,
            ActivityMetric::CollaborationRequestsSent => snapshot.collaboration_requests_sent,
            ActivityMetric::CollaborationsAccepted => snapshot.collaborations_accepted,
            ActivityMetric::CollaborationsCompleted => snapshot.collaborations_completed,
            ActivityMetric::MessagesSent => snapshot.messages_sent,
            ActivityMetric::AccountAgeDays => snapshot.account_age_days,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivityMetric::ProjectsCreated => "projects created",
            ActivityMetric::IdeasShared => "ideas shared",
            ActivityMetric::CommentsPosted => "comments posted",
            ActivityMetric::LikesGiven => "likes given",
            ActivityMetric::LikesReceived => "likes received",
            ActivityMetric::CollaborationRequestsSent => "collaboration requests sent",
            ActivityMetric::CollaborationsAccepted => "collaborations accepted",
            ActivityMetric::CollaborationsCompleted => "collaborations completed",
            ActivityMetric::MessagesSent => "messages sent",
            ActivityMetric::AccountAgeDays => "days on the platform",
        }
    }
}

/// Action that caused a badge check. Recorded for diagnostics only; every unearned active
/// badge is re-evaluated regardless of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAction {
    ProjectCreated,
    IdeaShared,
    CommentPosted,
    LikeGiven,
    LikeReceived,
    CollaborationRequested,
    CollaborationAccepted,
    CollaborationCompleted,
    MessageSent,
    ProfileUpdated,
    DailyLogin,
}

impl TriggerAction {
    pub const ALL: [TriggerAction; 11] = [
        TriggerAction::ProjectCreated,
        TriggerAction::IdeaShared,
        TriggerAction::CommentPosted,
        TriggerAction::LikeGiven,
        TriggerAction::LikeReceived,
        TriggerAction::CollaborationRequested,
        TriggerAction::CollaborationAccepted,
        TriggerAction::CollaborationCompleted,
        TriggerAction::MessageSent,
        TriggerAction::ProfileUpdated,
        TriggerAction::DailyLogin,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            TriggerAction::ProjectCreated => "project_created",
            TriggerAction::IdeaShared => "idea_shared",
            TriggerAction::CommentPosted => "comment_posted",
            TriggerAction::LikeGiven => "like_given",
            TriggerAction::LikeReceived => "like_received",
            TriggerAction::CollaborationRequested => "collaboration_requested",
            TriggerAction::CollaborationAccepted => "collaboration_accepted",
            TriggerAction::CollaborationCompleted => "collaboration_completed",
            TriggerAction::MessageSent => "message_sent",
            TriggerAction::ProfileUpdated => "profile_updated",
            TriggerAction::DailyLogin => "daily_login",
        }
    }
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TriggerAction {
    type Err = UnknownTriggerAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.label() == normalized)
            .ok_or_else(|| UnknownTriggerAction(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trigger action '{0}'")]
pub struct UnknownTriggerAction(pub String);

/// Badge earned by a member. Unique per (user, badge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub earned_at: DateTime<Utc>,
    /// Points captured from the catalog at grant time.
    pub points_awarded: u32,
    pub is_displayed: bool,
}

/// Earned badge joined with its catalog definition for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBadgeView {
    #[serde(flatten)]
    pub badge: UserBadge,
    pub definition: BadgeDefinition,
}
