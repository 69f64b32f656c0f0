use serde::{Deserialize, Serialize};

use crate::error::ReferralError;
use crate::models::domain::Candidate;

/// Tolerance used when checking that a weight vector sums to 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Named scoring profile, selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Quick,
    #[default]
    Thorough,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Quick => "quick",
            ProfileKind::Thorough => "thorough",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(ProfileKind::Quick),
            "thorough" => Ok(ProfileKind::Thorough),
            other => Err(format!("unknown scoring profile '{}'", other)),
        }
    }
}

/// Weights of the five compatibility sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityWeights {
    pub skill: f64,
    pub company: f64,
    pub role: f64,
    pub experience: f64,
    pub industry: f64,
}

impl CompatibilityWeights {
    pub fn thorough() -> Self {
        Self {
            skill: 0.30,
            company: 0.25,
            role: 0.20,
            experience: 0.15,
            industry: 0.10,
        }
    }

    pub fn quick() -> Self {
        Self {
            skill: 0.40,
            company: 0.30,
            role: 0.20,
            experience: 0.10,
            industry: 0.0,
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), ReferralError> {
        check_weights(
            name,
            &[
                ("skill", self.skill),
                ("company", self.company),
                ("role", self.role),
                ("experience", self.experience),
                ("industry", self.industry),
            ],
        )
    }
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self::thorough()
    }
}

/// Reject weight vectors that are negative, non-finite, or do not sum to 1.0.
///
/// Vectors are never renormalized.
pub fn check_weights(name: &str, weights: &[(&str, f64)]) -> Result<(), ReferralError> {
    for (label, value) in weights {
        if !value.is_finite() || *value < 0.0 {
            return Err(ReferralError::InvalidWeights {
                name: name.to_string(),
                reason: format!("weight '{}' is {}, expected a finite value >= 0", label, value),
            });
        }
    }

    let sum: f64 = weights.iter().map(|(_, v)| v).sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ReferralError::InvalidWeights {
            name: name.to_string(),
            reason: format!("weights sum to {:.6}, expected 1.0", sum),
        });
    }

    Ok(())
}

/// One breakpoint band of the experience-gap table (bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBand {
    pub min_gap: i32,
    pub max_gap: Option<i32>,
    pub score: f64,
}

impl ExperienceBand {
    const fn new(min_gap: i32, max_gap: Option<i32>, score: f64) -> Self {
        Self { min_gap, max_gap, score }
    }

    pub fn contains(&self, gap: i32) -> bool {
        gap >= self.min_gap && self.max_gap.map_or(true, |max| gap <= max)
    }
}

/// Weights and thresholds for one named way of scoring compatibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub kind: ProfileKind,
    pub weights: CompatibilityWeights,
    /// Skill score used when either side has no skills
    pub empty_skill_score: f64,
    pub company_miss_score: f64,
    /// Role score when target and role share a keyword category
    pub role_partial_score: f64,
    pub role_miss_score: f64,
    pub industry_miss_score: f64,
    /// First matching band wins
    pub experience_bands: Vec<ExperienceBand>,
    pub experience_fallback: f64,
}

impl ScoringProfile {
    pub fn thorough() -> Self {
        Self {
            kind: ProfileKind::Thorough,
            weights: CompatibilityWeights::thorough(),
            empty_skill_score: 0.0,
            company_miss_score: 0.0,
            role_partial_score: 0.8,
            role_miss_score: 0.2,
            industry_miss_score: 0.3,
            experience_bands: vec![
                ExperienceBand::new(3, Some(10), 1.0),
                ExperienceBand::new(1, Some(2), 0.8),
                ExperienceBand::new(11, Some(15), 0.7),
                ExperienceBand::new(16, None, 0.5),
            ],
            experience_fallback: 0.3,
        }
    }

    pub fn quick() -> Self {
        Self {
            kind: ProfileKind::Quick,
            weights: CompatibilityWeights::quick(),
            empty_skill_score: 0.3,
            company_miss_score: 0.2,
            role_partial_score: 0.8,
            role_miss_score: 0.3,
            industry_miss_score: 0.3,
            experience_bands: vec![
                ExperienceBand::new(3, Some(7), 1.0),
                ExperienceBand::new(1, Some(2), 0.8),
                ExperienceBand::new(8, Some(12), 0.7),
            ],
            experience_fallback: 0.4,
        }
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Quick => Self::quick(),
            ProfileKind::Thorough => Self::thorough(),
        }
    }

    /// Replace the composite weights, rejecting vectors that do not sum to 1.0
    pub fn with_weights(mut self, weights: CompatibilityWeights) -> Result<Self, ReferralError> {
        weights.validate(self.kind.as_str())?;
        self.weights = weights;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ReferralError> {
        self.weights.validate(self.kind.as_str())?;

        let fixed = [
            ("empty_skill_score", self.empty_skill_score),
            ("company_miss_score", self.company_miss_score),
            ("role_partial_score", self.role_partial_score),
            ("role_miss_score", self.role_miss_score),
            ("industry_miss_score", self.industry_miss_score),
            ("experience_fallback", self.experience_fallback),
        ];
        let bands = self
            .experience_bands
            .iter()
            .map(|band| ("experience_band", band.score));

        for (label, value) in fixed.into_iter().chain(bands) {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReferralError::InvalidWeights {
                    name: self.kind.as_str().to_string(),
                    reason: format!("{} is {}, expected a value in [0, 1]", label, value),
                });
            }
        }

        Ok(())
    }

    pub fn experience_score(&self, gap: i32) -> f64 {
        self.experience_bands
            .iter()
            .find(|band| band.contains(gap))
            .map_or(self.experience_fallback, |band| band.score)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::thorough()
    }
}

/// Compatibility between one seeker and one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScore {
    pub candidate_id: String,
    pub profile: ProfileKind,
    pub skill: f64,
    pub company: f64,
    pub role: f64,
    pub experience: f64,
    pub industry: f64,
    pub composite: f64,
    pub shared_skills: Vec<String>,
}

/// Three-level qualitative label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Low => f.write_str("low"),
            Rating::Medium => f.write_str("medium"),
            Rating::High => f.write_str("high"),
        }
    }
}

/// A candidate together with its compatibility against the current seeker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: CompatibilityScore,
    pub referral_potential: Rating,
    pub contact_feasibility: Rating,
}

impl ScoredCandidate {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}
