// Unit tests for the referral engine building blocks

use referral_engine::core::{
    normalize::{normalize_text, tag_set, Normalize},
    paths::{response_window, success_probability},
    ranking::{confidence_for, influence_factor},
    scoring::{
        career_stage, company_score, contact_feasibility, industry_score, referral_potential,
        role_score, skill_score,
    },
    validation::validate_candidate,
};
use referral_engine::models::{
    Candidate, CompatibilityWeights, PathKind, PathWeights, ProfileKind, Rating, ResponseWindow,
    ScoringProfile, Seeker,
};
use referral_engine::ReferralError;

fn create_candidate(id: &str, years: i32) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("Alum {}", id),
        current_company: "Acme".to_string(),
        current_role: "Software Engineer".to_string(),
        years_of_experience: years,
        ..Candidate::default()
    }
}

#[test]
fn test_normalize_text_trims_and_lowercases() {
    assert_eq!(normalize_text("  Machine Learning "), "machine learning");
    assert_eq!(normalize_text(""), "");
}

#[test]
fn test_seeker_sets_are_deduplicated() {
    let seeker = Seeker {
        id: "s1".to_string(),
        skills: vec!["SQL".to_string(), "sql".to_string(), " ".to_string()],
        target_roles: vec!["Data Scientist".to_string()],
        ..Seeker::default()
    };

    let normalized = seeker.normalize();
    assert_eq!(normalized.skills.len(), 1);
    assert!(normalized.target_roles.contains("data scientist"));
}

#[test]
fn test_jaccard_exactness() {
    let score = skill_score(&tag_set(["a", "b"]), &tag_set(["b", "c"]), 0.0);
    assert!((score - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_empty_skills_use_profile_convention() {
    let thorough = ScoringProfile::thorough();
    let quick = ScoringProfile::quick();
    let seeker = tag_set(["python"]);
    let none = tag_set(Vec::<String>::new());

    assert_eq!(skill_score(&seeker, &none, thorough.empty_skill_score), 0.0);
    assert_eq!(skill_score(&none, &seeker, quick.empty_skill_score), 0.3);
}

#[test]
fn test_company_substring_either_direction() {
    let targets = tag_set(["google"]);
    assert_eq!(company_score(&targets, "google llc", 0.0), 1.0);
    assert_eq!(company_score(&tag_set(["google cloud"]), "google", 0.0), 1.0);
    assert_eq!(company_score(&targets, "stripe", 0.2), 0.2);
    assert_eq!(company_score(&targets, "", 0.0), 0.5);
    assert_eq!(company_score(&tag_set(Vec::<String>::new()), "stripe", 0.0), 0.5);
}

#[test]
fn test_role_categories() {
    let targets = tag_set(["software engineer"]);
    assert_eq!(role_score(&targets, "senior software engineer", 0.8, 0.2), 1.0);
    assert_eq!(role_score(&targets, "backend developer", 0.8, 0.2), 0.8);
    assert_eq!(role_score(&targets, "product designer", 0.8, 0.2), 0.2);
    assert_eq!(role_score(&targets, "", 0.8, 0.2), 0.5);
}

#[test]
fn test_industry_keywords() {
    let interests = tag_set(["fintech", "health"]);
    assert_eq!(industry_score(&interests, "healthcare services", 0.3), 1.0);
    assert_eq!(industry_score(&interests, "retail", 0.3), 0.3);
    assert_eq!(industry_score(&interests, "", 0.3), 0.5);
}

#[test]
fn test_experience_bands_per_profile() {
    let thorough = ScoringProfile::thorough();
    assert_eq!(thorough.experience_score(3), 1.0);
    assert_eq!(thorough.experience_score(10), 1.0);
    assert_eq!(thorough.experience_score(2), 0.8);
    assert_eq!(thorough.experience_score(12), 0.7);
    assert_eq!(thorough.experience_score(20), 0.5);
    assert_eq!(thorough.experience_score(0), 0.3);
    assert_eq!(thorough.experience_score(-4), 0.3);

    let quick = ScoringProfile::quick();
    assert_eq!(quick.experience_score(7), 1.0);
    assert_eq!(quick.experience_score(1), 0.8);
    assert_eq!(quick.experience_score(12), 0.7);
    assert_eq!(quick.experience_score(13), 0.4);
    assert_eq!(quick.experience_score(0), 0.4);
}

#[test]
fn test_career_stage() {
    assert_eq!(career_stage(None, 2024), 0);
    assert_eq!(career_stage(Some(2020), 2024), 4);
    assert_eq!(career_stage(Some(2026), 2024), 0);
}

#[test]
fn test_weight_vectors_sum_to_one() {
    assert!(CompatibilityWeights::thorough().validate("thorough").is_ok());
    assert!(CompatibilityWeights::quick().validate("quick").is_ok());
    assert!(PathWeights::default().validate().is_ok());
}

#[test]
fn test_weights_are_never_renormalized() {
    let weights = CompatibilityWeights {
        skill: 0.6,
        company: 0.6,
        role: 0.0,
        experience: 0.0,
        industry: 0.0,
    };

    let err = ScoringProfile::thorough().with_weights(weights).unwrap_err();
    assert!(matches!(err, ReferralError::InvalidWeights { .. }));

    let negative = CompatibilityWeights {
        skill: 1.2,
        company: -0.2,
        ..CompatibilityWeights::quick()
    };
    assert!(negative.validate("quick").is_err());
}

#[test]
fn test_profile_kind_parsing() {
    assert_eq!("Quick".parse::<ProfileKind>().unwrap(), ProfileKind::Quick);
    assert_eq!(" thorough ".parse::<ProfileKind>().unwrap(), ProfileKind::Thorough);
    assert!("fast".parse::<ProfileKind>().is_err());
}

#[test]
fn test_referral_potential_labels() {
    let mut senior = create_candidate("a", 6);
    assert_eq!(referral_potential(&senior), Rating::High);

    senior.willing_to_refer = false;
    assert_eq!(referral_potential(&senior), Rating::Low);

    let mid = create_candidate("b", 3);
    assert_eq!(referral_potential(&mid), Rating::Medium);

    let mut busy = create_candidate("c", 8);
    busy.referrals_used_this_month = busy.monthly_referral_capacity;
    assert_eq!(referral_potential(&busy), Rating::Low);
}

#[test]
fn test_contact_feasibility_labels() {
    let mut candidate = create_candidate("a", 4);
    assert_eq!(contact_feasibility(&candidate), Rating::Low);

    candidate.linkedin_url = Some("https://linkedin.com/in/alum".to_string());
    assert_eq!(contact_feasibility(&candidate), Rating::Medium);

    candidate.email = Some("alum@example.com".to_string());
    assert_eq!(contact_feasibility(&candidate), Rating::High);
}

#[test]
fn test_success_probability_is_clamped() {
    let candidate = create_candidate("a", 4);
    for kind in PathKind::ALL {
        let p = success_probability(&candidate, kind);
        assert!((0.0..=1.0).contains(&p), "{} gave {}", kind, p);
    }
}

#[test]
fn test_response_window_from_title() {
    let mut candidate = create_candidate("a", 4);
    candidate.current_role = "VP Engineering".to_string();
    assert_eq!(response_window(&candidate), ResponseWindow::ThreeToSevenDays);
    assert_eq!(response_window(&candidate).to_string(), "3-7 days");
}

#[test]
fn test_influence_factor_by_experience() {
    assert_eq!(influence_factor(&create_candidate("a", 12)), 0.9);
    assert_eq!(influence_factor(&create_candidate("b", 6)), 0.7);
    assert_eq!(influence_factor(&create_candidate("c", 1)), 0.5);
}

#[test]
fn test_confidence_labels() {
    assert_eq!(confidence_for(0.95), Rating::High);
    assert_eq!(confidence_for(0.7), Rating::Medium);
    assert_eq!(confidence_for(0.1), Rating::Low);
}

#[test]
fn test_candidate_record_aliases() {
    let candidate: Candidate = serde_json::from_value(serde_json::json!({
        "alumni_id": "a9",
        "max_referrals_per_month": 5,
        "referral_count_this_month": 2,
        "contact_preferences": { "preferred_method": "email", "response_time": "2-5 days" }
    }))
    .unwrap();

    assert_eq!(candidate.id, "a9");
    assert_eq!(candidate.monthly_referral_capacity, 5);
    assert_eq!(candidate.referrals_used_this_month, 2);
    assert!(candidate.willing_to_refer);
    assert_eq!(
        candidate.contact_preferences.response_time,
        Some(ResponseWindow::TwoToFiveDays)
    );
    assert!(validate_candidate(&candidate).is_ok());
}
