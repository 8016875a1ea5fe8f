//! Collaboration compatibility scoring.
//!
//! Scores are computed from the Jaccard overlap of both members' skills and interests,
//! weighted by [`CompatibilityWeights`], plus an additive bonus when the pair has already
//! worked together. The engine is stateless and may be shared across threads.

pub mod domain;
mod overlap;
mod ranking;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateProfile, CompatibilityFactor, CompatibilityResult, FactorContribution, Profile,
    RankedCandidate, RelationshipContext,
};
pub use weights::{CompatibilityWeights, WeightsError};

/// Stateless scorer applying a weight configuration to pairs of profiles.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityEngine {
    weights: CompatibilityWeights,
}

impl CompatibilityEngine {
    pub fn new(weights: CompatibilityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CompatibilityWeights {
        &self.weights
    }

    /// Score how well `a` and `b` fit as collaborators.
    ///
    /// Empty skill or interest sets are valid and contribute nothing. The result is
    /// symmetric in `a` and `b`.
    pub fn score(
        &self,
        a: &Profile,
        b: &Profile,
        context: Option<&RelationshipContext>,
    ) -> CompatibilityResult {
        let (breakdown, total) = overlap::score_profiles(a, b, context, &self.weights);

        CompatibilityResult {
            score: total.round().clamp(0.0, 100.0) as u8,
            breakdown,
        }
    }

    /// Rank candidates for `target`, best match first.
    pub fn rank_candidates(
        &self,
        target: &Profile,
        candidates: &[CandidateProfile],
    ) -> Vec<RankedCandidate> {
        ranking::rank(self, target, candidates)
    }
}

/// Score two profiles with the default weights.
pub fn compute_compatibility(
    a: &Profile,
    b: &Profile,
    context: Option<&RelationshipContext>,
) -> CompatibilityResult {
    CompatibilityEngine::default().score(a, b, context)
}
