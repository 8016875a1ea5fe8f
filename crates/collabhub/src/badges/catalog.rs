use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{ActivityMetric, ActivitySnapshot, BadgeCategory, BadgeId, BadgeRarity};

/// Predicate over an [`ActivitySnapshot`] deciding whether a badge has been earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeCriterion {
    AtLeast {
        metric: ActivityMetric,
        threshold: u32,
    },
    ProfileCompleted,
    AllOf {
        criteria: Vec<BadgeCriterion>,
    },
}

impl BadgeCriterion {
    pub const fn at_least(metric: ActivityMetric, threshold: u32) -> Self {
        Self::AtLeast { metric, threshold }
    }

    pub fn is_met(&self, snapshot: &ActivitySnapshot) -> bool {
        match self {
            BadgeCriterion::AtLeast { metric, threshold } => metric.value(snapshot) >= *threshold,
            BadgeCriterion::ProfileCompleted => snapshot.profile_completed,
            BadgeCriterion::AllOf { criteria } => {
                criteria.iter().all(|criterion| criterion.is_met(snapshot))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BadgeCriterion::AtLeast { metric, threshold } => {
                format!("at least {threshold} {}", metric.label())
            }
            BadgeCriterion::ProfileCompleted => "complete your profile".to_string(),
            BadgeCriterion::AllOf { criteria } => criteria
                .iter()
                .map(BadgeCriterion::describe)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub points_awarded: u32,
    pub criteria: BadgeCriterion,
    pub is_active: bool,
}

/// Immutable registry of badge definitions injected into the badge engine.
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    pub fn new(badges: Vec<BadgeDefinition>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for badge in &badges {
            if !seen.insert(&badge.id) {
                return Err(CatalogError::DuplicateBadge(badge.id.clone()));
            }
        }
        Ok(Self { badges })
    }

    /// The catalog seeded at platform setup.
    pub fn standard() -> Self {
        Self {
            badges: standard_badges(),
        }
    }

    /// Retire the listed badges from future awarding. Earned instances are unaffected.
    pub fn with_inactive(mut self, ids: &[BadgeId]) -> Self {
        for id in ids {
            match self.badges.iter_mut().find(|badge| &badge.id == id) {
                Some(badge) => badge.is_active = false,
                None => warn!(badge_id = %id, "cannot deactivate unknown badge"),
            }
        }
        self
    }

    /// Every definition, active and retired.
    pub fn all(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn active(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter().filter(|badge| badge.is_active)
    }

    pub fn total_active(&self) -> usize {
        self.active().count()
    }

    pub fn get(&self, id: &BadgeId) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|badge| &badge.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("badge '{0}' is defined more than once")]
    DuplicateBadge(BadgeId),
}

/// Catalog entry as written in source; expanded into a [`BadgeDefinition`] on load.
struct StandardBadge {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: BadgeCategory,
    rarity: BadgeRarity,
    points_awarded: u32,
    criteria: BadgeCriterion,
}

impl StandardBadge {
    fn into_definition(self) -> BadgeDefinition {
        BadgeDefinition {
            id: BadgeId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            category: self.category,
            rarity: self.rarity,
            points_awarded: self.points_awarded,
            criteria: self.criteria,
            is_active: true,
        }
    }
}

fn standard_badges() -> Vec<BadgeDefinition> {
    use ActivityMetric::*;
    use BadgeCategory::*;
    use BadgeRarity::*;

    [
        StandardBadge {
            id: "first_project",
            name: "First Launch",
            description: "Published your first project.",
            icon: "rocket",
            category: Milestone,
            rarity: Common,
            points_awarded: 10,
            criteria: BadgeCriterion::at_least(ProjectsCreated, 1),
        },
        StandardBadge {
            id: "prolific_builder",
            name: "Prolific Builder",
            description: "Published ten projects.",
            icon: "hammer",
            category: Milestone,
            rarity: Rare,
            points_awarded: 50,
            criteria: BadgeCriterion::at_least(ProjectsCreated, 10),
        },
        StandardBadge {
            id: "idea_spark",
            name: "Idea Spark",
            description: "Shared your first idea with the community.",
            icon: "lightbulb",
            category: Creativity,
            rarity: Common,
            points_awarded: 10,
            criteria: BadgeCriterion::at_least(IdeasShared, 1),
        },
        StandardBadge {
            id: "visionary",
            name: "Visionary",
            description: "Shared twenty-five ideas.",
            icon: "telescope",
            category: Creativity,
            rarity: Epic,
            points_awarded: 100,
            criteria: BadgeCriterion::at_least(IdeasShared, 25),
        },
        StandardBadge {
            id: "conversation_starter",
            name: "Conversation Starter",
            description: "Posted your first comment.",
            icon: "speech-bubble",
            category: Engagement,
            rarity: Common,
            points_awarded: 5,
            criteria: BadgeCriterion::at_least(CommentsPosted, 1),
        },
        StandardBadge {
            id: "commentator",
            name: "Commentator",
            description: "Posted fifty comments.",
            icon: "megaphone",
            category: Engagement,
            rarity: Rare,
            points_awarded: 40,
            criteria: BadgeCriterion::at_least(CommentsPosted, 50),
        },
        StandardBadge {
            id: "supporter",
            name: "Supporter",
            description: "Liked twenty-five projects or ideas.",
            icon: "thumbs-up",
            category: Engagement,
            rarity: Common,
            points_awarded: 10,
            criteria: BadgeCriterion::at_least(LikesGiven, 25),
        },
        StandardBadge {
            id: "crowd_favorite",
            name: "Crowd Favorite",
            description: "Received one hundred likes.",
            icon: "heart",
            category: Social,
            rarity: Rare,
            points_awarded: 50,
            criteria: BadgeCriterion::at_least(LikesReceived, 100),
        },
        StandardBadge {
            id: "chatterbox",
            name: "Chatterbox",
            description: "Sent one hundred chat messages.",
            icon: "chat",
            category: Social,
            rarity: Common,
            points_awarded: 10,
            criteria: BadgeCriterion::at_least(MessagesSent, 100),
        },
        StandardBadge {
            id: "networker",
            name: "Networker",
            description: "Sent five collaboration requests.",
            icon: "handshake",
            category: Collaboration,
            rarity: Common,
            points_awarded: 15,
            criteria: BadgeCriterion::at_least(CollaborationRequestsSent, 5),
        },
        StandardBadge {
            id: "team_player",
            name: "Team Player",
            description: "Joined your first collaboration.",
            icon: "people",
            category: Collaboration,
            rarity: Common,
            points_awarded: 20,
            criteria: BadgeCriterion::at_least(CollaborationsAccepted, 1),
        },
        StandardBadge {
            id: "collaboration_master",
            name: "Collaboration Master",
            description: "Completed ten collaborations.",
            icon: "trophy",
            category: Collaboration,
            rarity: Epic,
            points_awarded: 150,
            criteria: BadgeCriterion::at_least(CollaborationsCompleted, 10),
        },
        StandardBadge {
            id: "all_set",
            name: "All Set",
            description: "Completed your profile.",
            icon: "id-card",
            category: Milestone,
            rarity: Common,
            points_awarded: 5,
            criteria: BadgeCriterion::ProfileCompleted,
        },
        StandardBadge {
            id: "veteran",
            name: "Veteran",
            description: "Active member for a full year.",
            icon: "medal",
            category: Milestone,
            rarity: Rare,
            points_awarded: 75,
            criteria: BadgeCriterion::at_least(AccountAgeDays, 365),
        },
        StandardBadge {
            id: "community_legend",
            name: "Community Legend",
            description: "Twenty-five projects, twenty-five completed collaborations, and five hundred likes.",
            icon: "crown",
            category: Milestone,
            rarity: Legendary,
            points_awarded: 500,
            criteria: BadgeCriterion::AllOf {
                criteria: vec![
                    BadgeCriterion::at_least(ProjectsCreated, 25),
                    BadgeCriterion::at_least(CollaborationsCompleted, 25),
                    BadgeCriterion::at_least(LikesReceived, 500),
                ],
            },
        },
    ]
    .into_iter()
    .map(StandardBadge::into_definition)
    .collect()
}
