use serde::{Deserialize, Serialize};

pub const DEFAULT_SKILL_WEIGHT: f64 = 0.65;
pub const DEFAULT_INTEREST_WEIGHT: f64 = 0.35;
pub const DEFAULT_COLLABORATION_BONUS: f64 = 15.0;

/// Weighting applied to each compatibility factor.
///
/// Skill and interest weights split the 100-point base score and must sum to one. The
/// collaboration bonus is added on top of the base score; the total is capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityWeights {
    skill_weight: f64,
    interest_weight: f64,
    collaboration_bonus: f64,
}

impl CompatibilityWeights {
    pub fn new(
        skill_weight: f64,
        interest_weight: f64,
        collaboration_bonus: f64,
    ) -> Result<Self, WeightsError> {
        check_range("skill_weight", skill_weight, 1.0)?;
        check_range("interest_weight", interest_weight, 1.0)?;
        check_range("collaboration_bonus", collaboration_bonus, 100.0)?;

        let sum = skill_weight + interest_weight;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(WeightsError::Unbalanced { sum });
        }

        Ok(Self {
            skill_weight,
            interest_weight,
            collaboration_bonus,
        })
    }

    pub fn skill_weight(&self) -> f64 {
        self.skill_weight
    }

    pub fn interest_weight(&self) -> f64 {
        self.interest_weight
    }

    pub fn collaboration_bonus(&self) -> f64 {
        self.collaboration_bonus
    }
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            skill_weight: DEFAULT_SKILL_WEIGHT,
            interest_weight: DEFAULT_INTEREST_WEIGHT,
            collaboration_bonus: DEFAULT_COLLABORATION_BONUS,
        }
    }
}

fn check_range(name: &'static str, value: f64, max: f64) -> Result<(), WeightsError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(WeightsError::OutOfRange { name, value, max })
    }
}

/// Rejected weight configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("{name} must be between 0 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        max: f64,
    },
    #[error("skill and interest weights must sum to 1.0, got {sum}")]
    Unbalanced { sum: f64 },
}
