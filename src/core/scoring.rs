use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Datelike;
use rayon::prelude::*;

use crate::core::normalize::{NormalizedSeeker, Normalize};
use crate::error::ReferralError;
use crate::models::{
    Candidate, CompatibilityScore, ProfileKind, Rating, ScoredCandidate, ScoringProfile, Seeker,
};

/// Score given when a side declared nothing to compare against
const NEUTRAL_SCORE: f64 = 0.5;

/// Role keyword categories used for partial role matches
const ROLE_CATEGORIES: [&[&str]; 4] = [
    &["engineer", "developer", "programmer", "architect"],
    &["manager", "lead", "director", "head"],
    &["analyst", "researcher", "scientist"],
    &["consultant", "advisor", "strategist"],
];

/// Computes seeker/candidate compatibility under one scoring profile
///
/// Scoring formula:
/// composite = (
///     skill_score * w.skill +            # Jaccard overlap of skill sets
///     company_score * w.company +        # Candidate works at a target company
///     role_score * w.role +              # Candidate holds a target role
///     experience_score * w.experience +  # Mentor-sized experience gap
///     industry_score * w.industry        # Industry matches seeker interests
/// )
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    profile: ScoringProfile,
    reference_year: i32,
}

impl CompatibilityScorer {
    pub fn new(profile: ScoringProfile, reference_year: i32) -> Result<Self, ReferralError> {
        profile.validate()?;
        Ok(Self {
            profile,
            reference_year,
        })
    }

    /// Built-in profile, measured against the current calendar year
    pub fn for_kind(kind: ProfileKind) -> Self {
        Self {
            profile: ScoringProfile::for_kind(kind),
            reference_year: current_year(),
        }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Score one seeker/candidate pair
    pub fn score(&self, seeker: &Seeker, candidate: &Candidate) -> CompatibilityScore {
        self.score_normalized(&seeker.normalize(), seeker.graduation_year, candidate)
    }

    /// Score one pair and attach the qualitative referral labels
    pub fn score_candidate(&self, seeker: &Seeker, candidate: &Candidate) -> ScoredCandidate {
        let score = self.score(seeker, candidate);
        attach_labels(candidate, score)
    }

    /// Score a batch in parallel.
    ///
    /// Output is sorted by composite descending, then candidate id, so it does
    /// not depend on the order in which workers finish.
    pub fn score_all(&self, seeker: &Seeker, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        let normalized = seeker.normalize();

        let mut scored: Vec<ScoredCandidate> = candidates
            .par_iter()
            .map(|candidate| {
                let score = self.score_normalized(&normalized, seeker.graduation_year, candidate);
                attach_labels(candidate, score)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .composite
                .partial_cmp(&a.score.composite)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });

        scored
    }

    fn score_normalized(
        &self,
        seeker: &NormalizedSeeker,
        graduation_year: Option<i32>,
        candidate: &Candidate,
    ) -> CompatibilityScore {
        let profile = &self.profile;
        let normalized = candidate.normalize();

        let skill = skill_score(&seeker.skills, &normalized.skills, profile.empty_skill_score);
        let company = company_score(
            &seeker.target_companies,
            &normalized.company,
            profile.company_miss_score,
        );
        let role = role_score(
            &seeker.target_roles,
            &normalized.role,
            profile.role_partial_score,
            profile.role_miss_score,
        );
        let gap = candidate.years_of_experience.max(0)
            - career_stage(graduation_year, self.reference_year);
        let experience = profile.experience_score(gap);
        let industry = industry_score(
            &seeker.interests,
            &normalized.industry,
            profile.industry_miss_score,
        );

        let weights = &profile.weights;
        let composite = skill * weights.skill
            + company * weights.company
            + role * weights.role
            + experience * weights.experience
            + industry * weights.industry;

        CompatibilityScore {
            candidate_id: candidate.id.clone(),
            profile: profile.kind,
            skill,
            company,
            role,
            experience,
            industry,
            composite: composite.clamp(0.0, 1.0),
            shared_skills: seeker
                .skills
                .intersection(&normalized.skills)
                .cloned()
                .collect(),
        }
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::for_kind(ProfileKind::default())
    }
}

fn attach_labels(candidate: &Candidate, score: CompatibilityScore) -> ScoredCandidate {
    ScoredCandidate {
        candidate: candidate.clone(),
        score,
        referral_potential: referral_potential(candidate),
        contact_feasibility: contact_feasibility(candidate),
    }
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Years since graduation, floored at 0; a seeker without a year is still studying
#[inline]
pub fn career_stage(graduation_year: Option<i32>, reference_year: i32) -> i32 {
    graduation_year.map_or(0, |year| reference_year.saturating_sub(year).max(0))
}

/// Jaccard similarity of two skill sets (0-1)
///
/// Falls back to `empty_score` when either side has no skills.
#[inline]
pub fn skill_score(seeker: &BTreeSet<String>, candidate: &BTreeSet<String>, empty_score: f64) -> f64 {
    if seeker.is_empty() || candidate.is_empty() {
        return empty_score;
    }

    let shared = seeker.intersection(candidate).count() as f64;
    let union = seeker.union(candidate).count() as f64;

    shared / union
}

/// Company alignment (0-1)
/// Substring match in either direction counts as working at a target
#[inline]
pub fn company_score(targets: &BTreeSet<String>, company: &str, miss_score: f64) -> f64 {
    if targets.is_empty() || company.is_empty() {
        return NEUTRAL_SCORE;
    }

    if targets
        .iter()
        .any(|target| target.contains(company) || company.contains(target.as_str()))
    {
        1.0
    } else {
        miss_score
    }
}

/// Role relevance (0-1)
#[inline]
pub fn role_score(targets: &BTreeSet<String>, role: &str, partial_score: f64, miss_score: f64) -> f64 {
    if targets.is_empty() || role.is_empty() {
        return NEUTRAL_SCORE;
    }

    if targets
        .iter()
        .any(|target| role.contains(target.as_str()) || target.contains(role))
    {
        return 1.0;
    }

    let same_category = targets.iter().any(|target| {
        ROLE_CATEGORIES.iter().any(|keywords| {
            keywords.iter().any(|kw| target.contains(kw)) && keywords.iter().any(|kw| role.contains(kw))
        })
    });

    if same_category {
        partial_score
    } else {
        miss_score
    }
}

/// Industry fit against seeker interests (0-1)
#[inline]
pub fn industry_score(interests: &BTreeSet<String>, industry: &str, miss_score: f64) -> f64 {
    if interests.is_empty() || industry.is_empty() {
        return NEUTRAL_SCORE;
    }

    let keywords: Vec<&str> = industry.split_whitespace().collect();
    let matched = interests.iter().any(|interest| {
        keywords
            .iter()
            .any(|kw| interest.contains(kw) || kw.contains(interest.as_str()))
    });

    if matched {
        1.0
    } else {
        miss_score
    }
}

/// How likely the candidate is to follow through with a referral
pub fn referral_potential(candidate: &Candidate) -> Rating {
    let used = candidate.referrals_used_this_month;
    let capacity = candidate.monthly_referral_capacity;

    if !candidate.willing_to_refer || !candidate.has_capacity() {
        Rating::Low
    } else if candidate.years_of_experience >= 5 && used < capacity / 2 {
        Rating::High
    } else if candidate.years_of_experience >= 3 {
        Rating::Medium
    } else {
        Rating::Low
    }
}

/// How easy the candidate is to reach
pub fn contact_feasibility(candidate: &Candidate) -> Rating {
    match (candidate.has_linkedin(), candidate.has_email()) {
        (true, true) => Rating::High,
        (true, false) | (false, true) => Rating::Medium,
        (false, false) => Rating::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::tag_set;

    fn create_seeker() -> Seeker {
        Seeker {
            id: "s1".to_string(),
            name: "Sam".to_string(),
            graduation_year: Some(2024),
            skills: vec!["Python".to_string(), "AWS".to_string()],
            target_companies: vec!["Google".to_string()],
            ..Seeker::default()
        }
    }

    fn create_candidate(id: &str, company: &str, skills: &[&str], years: i32) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Alum {}", id),
            current_company: company.to_string(),
            current_role: "Software Engineer".to_string(),
            years_of_experience: years,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Candidate::default()
        }
    }

    fn thorough_2024() -> CompatibilityScorer {
        CompatibilityScorer::new(ScoringProfile::thorough(), 2024).unwrap()
    }

    #[test]
    fn test_jaccard_one_third() {
        let score = skill_score(&tag_set(["a", "b"]), &tag_set(["b", "c"]), 0.0);
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_skill_convention_per_profile() {
        let empty = BTreeSet::new();
        let some = tag_set(["rust"]);
        assert_eq!(skill_score(&empty, &some, ScoringProfile::thorough().empty_skill_score), 0.0);
        assert_eq!(skill_score(&some, &empty, ScoringProfile::quick().empty_skill_score), 0.3);
    }

    #[test]
    fn test_company_score() {
        let targets = tag_set(["Google", "Meta"]);
        assert_eq!(company_score(&targets, "google", 0.0), 1.0);
        assert_eq!(company_score(&targets, "google cloud", 0.0), 1.0);
        assert_eq!(company_score(&targets, "amazon", 0.2), 0.2);
        assert_eq!(company_score(&BTreeSet::new(), "amazon", 0.0), 0.5);
    }

    #[test]
    fn test_role_score_keyword_category() {
        let targets = tag_set(["Software Engineer"]);
        assert_eq!(role_score(&targets, "senior software engineer", 0.8, 0.2), 1.0);
        assert_eq!(role_score(&targets, "backend developer", 0.8, 0.2), 0.8);
        assert_eq!(role_score(&targets, "product marketing", 0.8, 0.2), 0.2);
        assert_eq!(role_score(&BTreeSet::new(), "anything", 0.8, 0.2), 0.5);
    }

    #[test]
    fn test_industry_score() {
        let interests = tag_set(["fintech", "machine learning"]);
        assert_eq!(industry_score(&interests, "learning technology", 0.3), 1.0);
        assert_eq!(industry_score(&interests, "retail", 0.3), 0.3);
        assert_eq!(industry_score(&BTreeSet::new(), "retail", 0.3), 0.5);
    }

    #[test]
    fn test_career_stage_floor() {
        assert_eq!(career_stage(Some(2020), 2024), 4);
        assert_eq!(career_stage(Some(2026), 2024), 0);
        assert_eq!(career_stage(None, 2024), 0);
        assert_eq!(career_stage(Some(i32::MIN), 2024), i32::MAX);
        assert_eq!(career_stage(Some(i32::MAX), 2024), 0);
    }

    #[test]
    fn test_google_candidate_scores_high() {
        let scorer = thorough_2024();
        let candidate = create_candidate("a", "Google", &["python", "aws", "go"], 6);

        let score = scorer.score(&create_seeker(), &candidate);

        assert!((score.skill - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(score.company, 1.0);
        assert_eq!(score.experience, 1.0);
        assert!(score.composite >= 0.7);
        assert_eq!(score.shared_skills, vec!["aws", "python"]);
    }

    #[test]
    fn test_score_is_idempotent() {
        let scorer = thorough_2024();
        let seeker = create_seeker();
        let candidate = create_candidate("a", "Google", &["python"], 4);

        assert_eq!(scorer.score(&seeker, &candidate), scorer.score(&seeker, &candidate));
    }

    #[test]
    fn test_score_all_is_sorted_with_id_tiebreak() {
        let scorer = thorough_2024();
        let candidates = vec![
            create_candidate("b", "Acme", &[], 0),
            create_candidate("a", "Acme", &[], 0),
            create_candidate("c", "Google", &["python", "aws"], 5),
        ];

        let scored = scorer.score_all(&create_seeker(), &candidates);
        let ids: Vec<&str> = scored.iter().map(|s| s.id()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_referral_potential_labels() {
        let mut candidate = create_candidate("a", "Google", &[], 6);
        candidate.monthly_referral_capacity = 4;
        assert_eq!(referral_potential(&candidate), Rating::High);

        candidate.referrals_used_this_month = 2;
        assert_eq!(referral_potential(&candidate), Rating::Medium);

        candidate.referrals_used_this_month = 4;
        assert_eq!(referral_potential(&candidate), Rating::Low);

        candidate.referrals_used_this_month = 0;
        candidate.willing_to_refer = false;
        assert_eq!(referral_potential(&candidate), Rating::Low);
    }

    #[test]
    fn test_contact_feasibility_labels() {
        let mut candidate = create_candidate("a", "Google", &[], 6);
        assert_eq!(contact_feasibility(&candidate), Rating::Low);

        candidate.email = Some("a@example.com".to_string());
        assert_eq!(contact_feasibility(&candidate), Rating::Medium);

        candidate.linkedin_url = Some("https://linkedin.com/in/a".to_string());
        assert_eq!(contact_feasibility(&candidate), Rating::High);
    }
}
