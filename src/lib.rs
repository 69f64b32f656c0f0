//! Referral Engine - compatibility scoring and referral path ranking
//!
//! This library scores how well alumni match a student looking for a
//! referral, enumerates the ways the student could reach them, and ranks
//! those paths into a short, balanced recommendation list.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CompatibilityScorer, EngineConfig, PathBuilder, PathRanker, RecommendationResult, ReferralEngine};
pub use error::ReferralError;
pub use models::{
    Candidate, CompatibilityScore, ProfileKind, RankedRecommendation, ReferralPath, ScoredCandidate,
    ScoringProfile, Seeker,
};
