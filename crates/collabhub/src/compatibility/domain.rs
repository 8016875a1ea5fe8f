use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Skills and interests a member advertises on their profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub interests: BTreeSet<String>,
}

impl Profile {
    pub fn new<S, I>(skills: S, interests: I) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            interests: interests.into_iter().map(Into::into).collect(),
        }
    }
}

/// Facts about the pair's shared history supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipContext {
    #[serde(default)]
    pub past_collaboration: bool,
}

/// Factors contributing to a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityFactor {
    SkillOverlap,
    InterestOverlap,
    PastCollaboration,
}

impl CompatibilityFactor {
    pub const fn label(self) -> &'static str {
        match self {
            CompatibilityFactor::SkillOverlap => "skill_overlap",
            CompatibilityFactor::InterestOverlap => "interest_overlap",
            CompatibilityFactor::PastCollaboration => "past_collaboration",
        }
    }
}

/// Raw factor value (0.0..=1.0) alongside the points it added to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub raw: f64,
    pub weighted: f64,
}

/// Outcome of scoring one pair of profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub score: u8,
    pub breakdown: BTreeMap<CompatibilityFactor, FactorContribution>,
}

impl CompatibilityResult {
    pub fn factor(&self, factor: CompatibilityFactor) -> Option<&FactorContribution> {
        self.breakdown.get(&factor)
    }

    /// Points contributed by `factor`, zero when the factor was not scored.
    pub fn weighted(&self, factor: CompatibilityFactor) -> f64 {
        self.factor(factor)
            .map(|contribution| contribution.weighted)
            .unwrap_or(0.0)
    }
}

/// Candidate collaborator offered to the matching workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub user_id: UserId,
    pub profile: Profile,
    #[serde(default)]
    pub context: Option<RelationshipContext>,
}

/// Candidate annotated with its compatibility against the requesting member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub user_id: UserId,
    pub match_percentage: u8,
    pub result: CompatibilityResult,
}
