use super::domain::{CandidateProfile, Profile, RankedCandidate};
use super::CompatibilityEngine;

pub(crate) fn rank(
    engine: &CompatibilityEngine,
    target: &Profile,
    candidates: &[CandidateProfile],
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| {
            let result = engine.score(target, &candidate.profile, candidate.context.as_ref());
            RankedCandidate {
                user_id: candidate.user_id.clone(),
                match_percentage: result.score,
                result,
            }
        })
        .collect();

    ranked.sort_by(|left, right| {
        right
            .match_percentage
            .cmp(&left.match_percentage)
            .then_with(|| left.user_id.cmp(&right.user_id))
    });
    ranked
}
