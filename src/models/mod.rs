// Model exports
pub mod domain;
pub mod paths;
pub mod requests;
pub mod responses;
pub mod scoring;

pub use domain::{Candidate, ContactMethod, ContactPreferences, ResponseWindow, Seeker};
pub use paths::{
    BackupPlan, BuilderConfig, DroppedPath, KindCaps, OutreachBrief, PathEvaluation, PathKind,
    PathWeights, RankedRecommendation, RankerConfig, RankingOutcome, ReferralPath,
};
pub use requests::{EvaluateRequest, RecommendRequest, ScoreRequest};
pub use responses::{ErrorResponse, HealthResponse, RecommendResponse};
pub use scoring::{
    CompatibilityScore, CompatibilityWeights, ExperienceBand, ProfileKind, Rating, ScoredCandidate,
    ScoringProfile,
};
