// Core algorithm exports
pub mod advice;
pub mod engine;
pub mod normalize;
pub mod paths;
pub mod ranking;
pub mod scoring;
pub mod validation;

pub use engine::{EngineConfig, RecommendationResult, ReferralEngine};
pub use normalize::{normalize_text, tag_set, Normalize, NormalizedCandidate, NormalizedSeeker};
pub use paths::PathBuilder;
pub use ranking::PathRanker;
pub use scoring::CompatibilityScorer;
pub use validation::{validate_candidate, validate_seeker};
