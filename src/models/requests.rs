use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Candidate, Seeker};
use crate::models::scoring::ProfileKind;

/// Request to score a single seeker/candidate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub seeker: Seeker,
    pub candidate: Candidate,
    #[serde(default)]
    pub profile: Option<ProfileKind>,
}

/// Request to run the full pipeline over inline records
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateRequest {
    pub seeker: Seeker,
    #[validate(length(max = 5000))]
    #[serde(default, alias = "alumni")]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub profile: Option<ProfileKind>,
}

/// Request to recommend referral paths for a stored seeker
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "seeker_id", rename = "seekerId")]
    pub seeker_id: String,
    #[serde(default)]
    pub profile: Option<ProfileKind>,
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}
