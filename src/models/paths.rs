use serde::{Deserialize, Serialize};

use crate::error::ReferralError;
use crate::models::domain::ResponseWindow;
use crate::models::scoring::{check_weights, Rating, ScoredCandidate};

/// Rule that produced a referral path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Direct,
    CompanyNetwork,
    MutualConnection,
    SkillBased,
}

impl PathKind {
    pub const ALL: [PathKind; 4] = [
        PathKind::Direct,
        PathKind::CompanyNetwork,
        PathKind::MutualConnection,
        PathKind::SkillBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathKind::Direct => "direct",
            PathKind::CompanyNetwork => "company_network",
            PathKind::MutualConnection => "mutual_connection",
            PathKind::SkillBased => "skill_based",
        }
    }

    /// Prior probability that this kind of path ends in a referral
    pub fn base_success_probability(&self) -> f64 {
        match self {
            PathKind::Direct => 0.6,
            PathKind::CompanyNetwork => 0.7,
            PathKind::MutualConnection => 0.8,
            PathKind::SkillBased => 0.5,
        }
    }
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed contact strategy from the seeker to a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralPath {
    pub id: String,
    pub kind: PathKind,
    /// Seeker id, optional intermediary id, target candidate id
    pub participants: Vec<String>,
    /// Candidates on the path; first is contacted first, last is the referrer
    pub contacts: Vec<ScoredCandidate>,
    pub company: Option<String>,
    pub alternates: Vec<String>,
    pub shared_skills: Vec<String>,
    pub connection_strength: f64,
    pub success_probability: f64,
    pub response_window: ResponseWindow,
    pub description: String,
    pub risks: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ReferralPath {
    /// Candidate contacted first
    pub fn primary(&self) -> Option<&ScoredCandidate> {
        self.contacts.first()
    }

    /// Candidate expected to submit the referral
    pub fn target(&self) -> Option<&ScoredCandidate> {
        self.contacts.last()
    }

    pub fn intermediary(&self) -> Option<&ScoredCandidate> {
        match self.kind {
            PathKind::MutualConnection if self.contacts.len() > 1 => self.contacts.first(),
            _ => None,
        }
    }
}

/// Qualitative sub-evaluations of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEvaluation {
    pub accessibility: f64,
    pub influence: f64,
    pub responsiveness: f64,
    pub relevance: f64,
    pub timing: f64,
}

/// Fallback to try when a recommendation stalls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPlan {
    pub kind: String,
    pub description: String,
    pub trigger: String,
}

/// Structured inputs handed to an outreach message generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachBrief {
    pub seeker_name: String,
    pub contact_name: String,
    pub contact_company: String,
    pub contact_role: String,
    pub intermediary_name: Option<String>,
    pub shared_skills: Vec<String>,
    pub common_interests: Vec<String>,
    pub conversation_starters: Vec<String>,
}

/// A ranked, annotated referral path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecommendation {
    pub rank: usize,
    pub confidence: Rating,
    pub score: f64,
    pub evaluation: PathEvaluation,
    pub path: ReferralPath,
    pub next_steps: Vec<String>,
    pub backup_plans: Vec<BackupPlan>,
    pub outreach: OutreachBrief,
}

/// A path removed before or during ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedPath {
    pub path_id: String,
    pub reason: String,
}

/// Output of the ranking stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingOutcome {
    pub recommendations: Vec<RankedRecommendation>,
    pub dropped: Vec<DroppedPath>,
}

/// Weights of the path score factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathWeights {
    pub connection_strength: f64,
    pub success_probability: f64,
    pub response_likelihood: f64,
    pub influence: f64,
    pub accessibility: f64,
}

impl PathWeights {
    pub fn validate(&self) -> Result<(), ReferralError> {
        check_weights(
            "path",
            &[
                ("connection_strength", self.connection_strength),
                ("success_probability", self.success_probability),
                ("response_likelihood", self.response_likelihood),
                ("influence", self.influence),
                ("accessibility", self.accessibility),
            ],
        )
    }
}

impl Default for PathWeights {
    fn default() -> Self {
        Self {
            connection_strength: 0.25,
            success_probability: 0.25,
            response_likelihood: 0.20,
            influence: 0.15,
            accessibility: 0.15,
        }
    }
}

/// Maximum number of recommendations kept per path kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindCaps {
    pub direct: usize,
    pub company_network: usize,
    pub mutual_connection: usize,
    pub skill_based: usize,
}

impl KindCaps {
    pub fn get(&self, kind: PathKind) -> usize {
        match kind {
            PathKind::Direct => self.direct,
            PathKind::CompanyNetwork => self.company_network,
            PathKind::MutualConnection => self.mutual_connection,
            PathKind::SkillBased => self.skill_based,
        }
    }
}

impl Default for KindCaps {
    fn default() -> Self {
        Self {
            direct: 3,
            company_network: 2,
            mutual_connection: 2,
            skill_based: 1,
        }
    }
}

/// Thresholds for path construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Composite compatibility a candidate must exceed for a direct path
    pub direct_threshold: f64,
    pub min_shared_skills: usize,
    pub max_company_primaries: usize,
    pub alternates_per_primary: usize,
    /// Graduation years at most this far apart suggest a mutual connection
    pub mutual_graduation_window: i32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            direct_threshold: 0.5,
            min_shared_skills: 3,
            max_company_primaries: 3,
            alternates_per_primary: 2,
            mutual_graduation_window: 2,
        }
    }
}

/// Selection policy of the ranking stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub weights: PathWeights,
    pub per_kind_cap: KindCaps,
    pub final_cap: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: PathWeights::default(),
            per_kind_cap: KindCaps::default(),
            final_cap: 8,
        }
    }
}
