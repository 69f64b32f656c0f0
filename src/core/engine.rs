use serde::{Deserialize, Serialize};

use crate::core::{
    paths::PathBuilder,
    ranking::PathRanker,
    scoring::{current_year, CompatibilityScorer},
    validation::{validate_candidate, validate_seeker},
};
use crate::error::ReferralError;
use crate::models::{
    BuilderConfig, Candidate, CompatibilityScore, DroppedPath, ProfileKind, RankedRecommendation,
    RankerConfig, ScoredCandidate, ScoringProfile, Seeker,
};

/// Everything the pipeline needs, already resolved from settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub profile: ScoringProfile,
    pub reference_year: i32,
    /// Candidates with a lower composite never reach the path builder
    pub min_compatibility: f64,
    pub builder: BuilderConfig,
    pub ranker: RankerConfig,
}

impl EngineConfig {
    pub fn for_profile(kind: ProfileKind) -> Self {
        Self {
            profile: ScoringProfile::for_kind(kind),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile: ScoringProfile::default(),
            reference_year: current_year(),
            min_compatibility: 0.0,
            builder: BuilderConfig::default(),
            ranker: RankerConfig::default(),
        }
    }
}

/// Result of one recommendation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    /// Scored candidates that passed the compatibility floor, best first
    pub matches: Vec<ScoredCandidate>,
    pub recommendations: Vec<RankedRecommendation>,
    pub dropped: Vec<DroppedPath>,
    pub total_candidates: usize,
    pub total_paths: usize,
}

/// Main referral orchestrator
///
/// # Pipeline Stages
/// 1. Record validation (fails fast on the first malformed record)
/// 2. Parallel compatibility scoring
/// 3. Compatibility floor
/// 4. Path construction
/// 5. Path ranking and annotation
#[derive(Debug, Clone)]
pub struct ReferralEngine {
    scorer: CompatibilityScorer,
    builder: PathBuilder,
    ranker: PathRanker,
    min_compatibility: f64,
}

impl ReferralEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ReferralError> {
        if !config.min_compatibility.is_finite() || !(0.0..=1.0).contains(&config.min_compatibility) {
            return Err(ReferralError::InvalidWeights {
                name: "min_compatibility".to_string(),
                reason: format!("{} is outside [0, 1]", config.min_compatibility),
            });
        }

        Ok(Self {
            scorer: CompatibilityScorer::new(config.profile, config.reference_year)?,
            builder: PathBuilder::new(config.builder),
            ranker: PathRanker::new(config.ranker)?,
            min_compatibility: config.min_compatibility,
        })
    }

    pub fn with_default_config() -> Self {
        Self {
            scorer: CompatibilityScorer::default(),
            builder: PathBuilder::default(),
            ranker: PathRanker::default(),
            min_compatibility: 0.0,
        }
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    pub fn profile_kind(&self) -> ProfileKind {
        self.scorer.profile().kind
    }

    /// Score a single pair after validating both records
    pub fn score(&self, seeker: &Seeker, candidate: &Candidate) -> Result<CompatibilityScore, ReferralError> {
        validate_seeker(seeker)?;
        validate_candidate(candidate)?;
        Ok(self.scorer.score(seeker, candidate))
    }

    /// Run the complete pipeline for one seeker
    ///
    /// # Arguments
    /// * `seeker` - The student asking for referrals
    /// * `candidates` - Every alumnus who could refer
    ///
    /// # Returns
    /// RecommendationResult with the scored matches and ranked paths.
    /// An empty candidate pool yields an empty result, not an error.
    pub fn recommend(
        &self,
        seeker: &Seeker,
        candidates: &[Candidate],
    ) -> Result<RecommendationResult, ReferralError> {
        validate_seeker(seeker)?;
        for candidate in candidates {
            validate_candidate(candidate)?;
        }

        let matches: Vec<ScoredCandidate> = self
            .scorer
            .score_all(seeker, candidates)
            .into_iter()
            .filter(|sc| sc.score.composite >= self.min_compatibility)
            .collect();

        tracing::debug!(
            "{} of {} candidates passed the compatibility floor {:.2}",
            matches.len(),
            candidates.len(),
            self.min_compatibility
        );

        let paths = self.builder.build_paths(seeker, &matches);
        let outcome = self.ranker.rank(&paths, seeker);

        tracing::info!(
            "Recommended {} paths for seeker {} ({} candidates, {} paths built, {} dropped, profile {})",
            outcome.recommendations.len(),
            seeker.id,
            candidates.len(),
            paths.len(),
            outcome.dropped.len(),
            self.profile_kind()
        );

        Ok(RecommendationResult {
            matches,
            recommendations: outcome.recommendations,
            dropped: outcome.dropped,
            total_candidates: candidates.len(),
            total_paths: paths.len(),
        })
    }
}

impl Default for ReferralEngine {
    fn default() -> Self {
        Self::with_default_config()
    }
}
