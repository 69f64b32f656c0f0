use std::cmp::Ordering;

use crate::core::advice::{backup_plans, next_steps, outreach_brief};
use crate::error::ReferralError;
use crate::models::{
    Candidate, DroppedPath, PathEvaluation, PathKind, RankedRecommendation, RankerConfig,
    RankingOutcome, Rating, ReferralPath, ResponseWindow, Seeker,
};

const SENIOR_TITLES: [&str; 4] = ["director", "vp", "head", "principal"];
const MID_TITLES: [&str; 2] = ["manager", "lead"];

/// Scores referral paths and selects a balanced, capped recommendation list
///
/// # Pipeline Stages
/// 1. Drop paths whose referrer is out of capacity (when alternatives exist)
/// 2. Score each path; paths that fail evaluation are dropped, not fatal
/// 3. Keep the best paths of each kind up to its cap
/// 4. Re-sort the union, truncate to the final cap, annotate rank and confidence
#[derive(Debug, Clone)]
pub struct PathRanker {
    config: RankerConfig,
}

/// A path that survived evaluation, with its input position for tie-breaks
struct Evaluated<'a> {
    order: usize,
    score: f64,
    evaluation: PathEvaluation,
    path: &'a ReferralPath,
}

impl PathRanker {
    pub fn new(config: RankerConfig) -> Result<Self, ReferralError> {
        config.weights.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank paths, highest score first. No paths is a valid, empty outcome.
    pub fn rank(&self, paths: &[ReferralPath], seeker: &Seeker) -> RankingOutcome {
        if paths.is_empty() {
            return RankingOutcome::default();
        }

        let mut dropped = Vec::new();
        let mut evaluated = Vec::with_capacity(paths.len());

        let any_available = paths
            .iter()
            .any(|path| path.target().is_some_and(|t| t.candidate.has_capacity()));

        for (order, path) in paths.iter().enumerate() {
            let exhausted = path.target().is_some_and(|t| !t.candidate.has_capacity());
            if any_available && exhausted {
                dropped.push(DroppedPath {
                    path_id: path.id.clone(),
                    reason: "referring contact has no referral capacity left this month".to_string(),
                });
                continue;
            }

            match self.score_path(path) {
                Ok((score, evaluation)) => evaluated.push(Evaluated {
                    order,
                    score,
                    evaluation,
                    path,
                }),
                Err(err) => {
                    tracing::warn!("Skipping path during ranking: {}", err);
                    dropped.push(DroppedPath {
                        path_id: path.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Keep the strongest paths of each kind so one kind cannot crowd out the rest
        let mut selected: Vec<&Evaluated> = Vec::new();
        for kind in PathKind::ALL {
            let mut group: Vec<&Evaluated> = evaluated.iter().filter(|e| e.path.kind == kind).collect();
            group.sort_by(|a, b| by_score_then_order(a, b));
            selected.extend(group.into_iter().take(self.config.per_kind_cap.get(kind)));
        }

        selected.sort_by(|a, b| by_score_then_order(a, b));
        selected.truncate(self.config.final_cap);

        let recommendations: Vec<RankedRecommendation> = selected
            .into_iter()
            .enumerate()
            .map(|(i, e)| RankedRecommendation {
                rank: i + 1,
                confidence: confidence_for(e.score),
                score: e.score,
                evaluation: e.evaluation,
                next_steps: next_steps(e.path),
                backup_plans: backup_plans(e.path),
                outreach: outreach_brief(seeker, e.path),
                path: e.path.clone(),
            })
            .collect();

        tracing::debug!(
            "Ranked {} of {} paths for seeker {} ({} dropped)",
            recommendations.len(),
            paths.len(),
            seeker.id,
            dropped.len()
        );

        RankingOutcome {
            recommendations,
            dropped,
        }
    }

    /// Weighted path score (0-1) and the qualitative sub-evaluations
    ///
    /// Scoring formula:
    /// score = (
    ///     connection_strength * 0.25 +
    ///     success_probability * 0.25 +
    ///     response_likelihood * 0.20 +   # 1-3 day responders score higher
    ///     influence_factor * 0.15 +      # Seniority of the first contact
    ///     accessibility * 0.15           # Direct paths are easiest to start
    /// )
    pub fn score_path(&self, path: &ReferralPath) -> Result<(f64, PathEvaluation), ReferralError> {
        let fail = |reason: String| ReferralError::PathEvaluation {
            path_id: path.id.clone(),
            reason,
        };

        if !(2..=3).contains(&path.participants.len()) {
            return Err(fail(format!(
                "expected 2 or 3 participants, found {}",
                path.participants.len()
            )));
        }

        let (Some(primary), Some(target)) = (path.primary(), path.target()) else {
            return Err(fail("path has no contacts".to_string()));
        };

        for (label, value) in [
            ("connection strength", path.connection_strength),
            ("success probability", path.success_probability),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(fail(format!("{} {} is outside [0, 1]", label, value)));
            }
        }

        let weights = &self.config.weights;
        let response_likelihood = match path.response_window {
            ResponseWindow::OneToThreeDays => 0.8,
            _ => 0.6,
        };
        let accessibility = if path.kind == PathKind::Direct { 0.8 } else { 0.6 };

        let score = path.connection_strength * weights.connection_strength
            + path.success_probability * weights.success_probability
            + response_likelihood * weights.response_likelihood
            + influence_factor(&primary.candidate) * weights.influence
            + accessibility * weights.accessibility;

        let evaluation = PathEvaluation {
            accessibility: evaluate_accessibility(&primary.candidate),
            influence: evaluate_influence(&primary.candidate),
            responsiveness: evaluate_responsiveness(path.response_window),
            relevance: evaluate_relevance(path),
            timing: evaluate_timing(&target.candidate),
        };

        Ok((score.clamp(0.0, 1.0), evaluation))
    }
}

impl Default for PathRanker {
    fn default() -> Self {
        Self {
            config: RankerConfig::default(),
        }
    }
}

fn by_score_then_order(a: &Evaluated, b: &Evaluated) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.order.cmp(&b.order))
}

/// Confidence label from a path score
pub fn confidence_for(score: f64) -> Rating {
    if score >= 0.8 {
        Rating::High
    } else if score >= 0.6 {
        Rating::Medium
    } else {
        Rating::Low
    }
}

fn has_title(role: &str, titles: &[&str]) -> bool {
    titles.iter().any(|title| role.contains(title))
}

/// Seniority of the first contact, as used in the path score
pub fn influence_factor(candidate: &Candidate) -> f64 {
    let role = candidate.role_lower();
    let years = candidate.years_of_experience;

    if years >= 10 || has_title(&role, &SENIOR_TITLES) {
        0.9
    } else if years >= 5 || has_title(&role, &MID_TITLES) {
        0.7
    } else {
        0.5
    }
}

fn evaluate_accessibility(candidate: &Candidate) -> f64 {
    let mut score: f64 = 0.5;
    if candidate.has_linkedin() {
        score += 0.2;
    }
    if candidate.has_email() {
        score += 0.2;
    }
    if candidate.willing_to_refer {
        score += 0.1;
    }
    score.min(1.0)
}

fn evaluate_influence(candidate: &Candidate) -> f64 {
    let role = candidate.role_lower();
    let years = candidate.years_of_experience;

    if years >= 15 || has_title(&role, &SENIOR_TITLES) {
        0.9
    } else if years >= 10 || has_title(&role, &["senior", "lead", "manager"]) {
        0.7
    } else if years >= 5 {
        0.6
    } else {
        0.4
    }
}

fn evaluate_responsiveness(window: ResponseWindow) -> f64 {
    match window {
        ResponseWindow::OneToThreeDays => 0.9,
        ResponseWindow::TwoToFiveDays => 0.7,
        ResponseWindow::ThreeToSevenDays => 0.6,
    }
}

fn evaluate_relevance(path: &ReferralPath) -> f64 {
    if path.shared_skills.is_empty() {
        0.6
    } else {
        (0.5 + path.shared_skills.len() as f64 * 0.1).min(1.0)
    }
}

/// Remaining monthly referral budget of the referrer
fn evaluate_timing(candidate: &Candidate) -> f64 {
    let used = candidate.referrals_used_this_month;
    let capacity = candidate.monthly_referral_capacity;

    if !candidate.has_capacity() {
        0.2
    } else if used == 0 {
        1.0
    } else if (used as f64) < capacity as f64 / 2.0 {
        0.8
    } else {
        0.6
    }
}
