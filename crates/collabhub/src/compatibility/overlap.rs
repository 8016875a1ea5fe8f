use std::collections::{BTreeMap, BTreeSet};

use super::domain::{CompatibilityFactor, FactorContribution, Profile, RelationshipContext};
use super::weights::CompatibilityWeights;

const MAX_SCORE: f64 = 100.0;

/// Trim and lower-case entries so "React " and "react" count as the same skill.
pub(crate) fn normalized(values: &BTreeSet<String>) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Jaccard index of two normalized sets. Two empty sets overlap by 0.
pub(crate) fn jaccard(left: &BTreeSet<String>, right: &BTreeSet<String>) -> f64 {
    let shared = left.intersection(right).count();
    let union = left.len() + right.len() - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

pub(crate) fn score_profiles(
    a: &Profile,
    b: &Profile,
    context: Option<&RelationshipContext>,
    weights: &CompatibilityWeights,
) -> (BTreeMap<CompatibilityFactor, FactorContribution>, f64) {
    let mut breakdown = BTreeMap::new();

    let skill_overlap = jaccard(&normalized(&a.skills), &normalized(&b.skills));
    let skill_points = skill_overlap * weights.skill_weight() * MAX_SCORE;
    breakdown.insert(
        CompatibilityFactor::SkillOverlap,
        FactorContribution {
            raw: skill_overlap,
            weighted: skill_points,
        },
    );

    let interest_overlap = jaccard(&normalized(&a.interests), &normalized(&b.interests));
    let interest_points = interest_overlap * weights.interest_weight() * MAX_SCORE;
    breakdown.insert(
        CompatibilityFactor::InterestOverlap,
        FactorContribution {
            raw: interest_overlap,
            weighted: interest_points,
        },
    );

    let base = (skill_points + interest_points).clamp(0.0, MAX_SCORE);

    let past_collaboration = context.is_some_and(|context| context.past_collaboration);
    let bonus = if past_collaboration {
        weights.collaboration_bonus().min(MAX_SCORE - base)
    } else {
        0.0
    };
    breakdown.insert(
        CompatibilityFactor::PastCollaboration,
        FactorContribution {
            raw: if past_collaboration { 1.0 } else { 0.0 },
            weighted: bonus,
        },
    );

    (breakdown, base + bonus)
}
