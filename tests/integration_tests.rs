// Integration tests for the referral engine pipeline

use referral_engine::core::{EngineConfig, PathBuilder, PathRanker, ReferralEngine};
use referral_engine::models::{
    Candidate, KindCaps, PathKind, ProfileKind, RankerConfig, ReferralPath, ScoringProfile, Seeker,
};
use referral_engine::CompatibilityScorer;

fn create_test_seeker(targets: &[&str]) -> Seeker {
    Seeker {
        id: "student_1".to_string(),
        name: "Jordan".to_string(),
        graduation_year: None,
        major: Some("Computer Science".to_string()),
        skills: vec!["Python".to_string(), "SQL".to_string(), "AWS".to_string()],
        interests: vec!["technology".to_string()],
        target_companies: targets.iter().map(|t| t.to_string()).collect(),
        target_roles: vec!["Software Engineer".to_string()],
    }
}

fn create_test_candidate(
    id: &str,
    company: &str,
    role: &str,
    years: i32,
    skills: &[&str],
    graduation_year: Option<i32>,
) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("Alum {}", id),
        current_company: company.to_string(),
        current_role: role.to_string(),
        years_of_experience: years,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        industry: "Technology".to_string(),
        graduation_year,
        linkedin_url: Some(format!("https://linkedin.com/in/{}", id)),
        ..Candidate::default()
    }
}

fn create_engine() -> ReferralEngine {
    ReferralEngine::new(EngineConfig {
        reference_year: 2024,
        ..EngineConfig::default()
    })
    .expect("default configuration is valid")
}

/// A pool where every company has several alumni, so every path kind appears
fn create_large_pool(size: usize) -> Vec<Candidate> {
    let companies = ["Google", "Microsoft", "Stripe", "Airbnb"];
    (0..size)
        .map(|i| {
            create_test_candidate(
                &format!("alum_{:03}", i),
                companies[i % companies.len()],
                if i % 5 == 0 { "Engineering Manager" } else { "Software Engineer" },
                (i % 15) as i32,
                &["python", "sql", "aws", "go"][..(i % 4) + 1],
                Some(2010 + (i % 12) as i32),
            )
        })
        .collect()
}

#[test]
fn test_integration_google_scenario() {
    let engine = create_engine();
    let seeker = create_test_seeker(&["Google"]);

    let candidates = vec![
        create_test_candidate("a", "Google", "Senior Software Engineer", 5, &["python", "sql"], None),
        create_test_candidate("b", "Stripe", "Data Analyst", 2, &["excel"], None),
        create_test_candidate("c", "Initech", "Product Designer", 1, &["figma"], None),
    ];

    let result = engine.recommend(&seeker, &candidates).unwrap();

    let top = &result.matches[0];
    assert_eq!(top.id(), "a");
    assert!((top.score.skill - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(top.score.company, 1.0);
    assert!(top.score.composite >= 0.7);
    assert_eq!(top.score.shared_skills, vec!["python", "sql"]);

    let first = &result.recommendations[0];
    assert_eq!(first.rank, 1);
    assert_eq!(first.path.kind, PathKind::Direct);
    assert_eq!(first.path.target().unwrap().id(), "a");
    assert_eq!(first.outreach.contact_company, "Google");
}

#[test]
fn test_integration_microsoft_scenario() {
    let engine = create_engine();
    let seeker = create_test_seeker(&["Microsoft"]);

    let candidates = vec![
        create_test_candidate("b", "Microsoft", "Principal Engineer", 10, &["python"], Some(2014)),
        create_test_candidate("c", "Microsoft", "Software Engineer", 4, &["sql"], Some(2016)),
    ];

    let result = engine.recommend(&seeker, &candidates).unwrap();

    let mutual = result
        .recommendations
        .iter()
        .find(|r| r.path.kind == PathKind::MutualConnection)
        .expect("mutual connection path is recommended");

    assert_eq!(mutual.path.participants, vec!["student_1", "b", "c"]);
    assert_eq!(mutual.path.intermediary().unwrap().id(), "b");
    assert_eq!(mutual.outreach.intermediary_name.as_deref(), Some("Alum b"));
    assert!(mutual.next_steps[0].contains("intermediary"));
}

#[test]
fn test_integration_empty_laws() {
    let seeker = create_test_seeker(&["Google"]);

    assert!(PathBuilder::default().build_paths(&seeker, &[]).is_empty());
    assert!(PathRanker::default().rank(&[], &seeker).recommendations.is_empty());

    let result = create_engine().recommend(&seeker, &[]).unwrap();
    assert!(result.recommendations.is_empty());
    assert_eq!(result.total_candidates, 0);
}

fn kind_count(paths: &[ReferralPath], kind: PathKind) -> usize {
    paths.iter().filter(|p| p.kind == kind).count()
}

#[test]
fn test_integration_cap_and_diversity_laws() {
    let seeker = create_test_seeker(&["Google", "Stripe"]);
    let scorer = CompatibilityScorer::new(ScoringProfile::thorough(), 2024).unwrap();
    let scored = scorer.score_all(&seeker, &create_large_pool(40));
    let paths = PathBuilder::default().build_paths(&seeker, &scored);

    for final_cap in [1, 3, 8, 20] {
        let config = RankerConfig {
            final_cap,
            ..RankerConfig::default()
        };
        let caps = config.per_kind_cap;
        let outcome = PathRanker::new(config).unwrap().rank(&paths, &seeker);

        let survivors: usize = PathKind::ALL
            .iter()
            .map(|&kind| kind_count(&paths, kind).min(caps.get(kind)))
            .sum();
        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.recommendations.len(), final_cap.min(survivors));

        for kind in PathKind::ALL {
            let count = outcome.recommendations.iter().filter(|r| r.path.kind == kind).count();
            assert!(count <= caps.get(kind), "{} exceeded its cap", kind);
        }
    }
}

#[test]
fn test_integration_zero_caps_exclude_kind() {
    let seeker = create_test_seeker(&["Google"]);
    let config = EngineConfig {
        reference_year: 2024,
        ranker: RankerConfig {
            per_kind_cap: KindCaps {
                mutual_connection: 0,
                ..KindCaps::default()
            },
            ..RankerConfig::default()
        },
        ..EngineConfig::default()
    };

    let result = ReferralEngine::new(config)
        .unwrap()
        .recommend(&seeker, &create_large_pool(20))
        .unwrap();

    assert!(!result.recommendations.is_empty());
    assert!(result
        .recommendations
        .iter()
        .all(|r| r.path.kind != PathKind::MutualConnection));
}

#[test]
fn test_integration_at_capacity_candidates_are_not_referrers() {
    let seeker = create_test_seeker(&["Google"]);
    let mut candidates = create_large_pool(12);
    for candidate in candidates.iter_mut().skip(1) {
        candidate.referrals_used_this_month = candidate.monthly_referral_capacity;
    }

    let result = create_engine().recommend(&seeker, &candidates).unwrap();

    assert!(!result.recommendations.is_empty());
    for rec in &result.recommendations {
        assert!(rec.path.target().unwrap().candidate.has_capacity());
    }
    assert!(!result.dropped.is_empty());
}

#[test]
fn test_integration_output_independent_of_input_order() {
    let engine = create_engine();
    let seeker = create_test_seeker(&["Google"]);
    let pool = create_large_pool(30);
    let mut reversed = pool.clone();
    reversed.reverse();

    let forward = engine.recommend(&seeker, &pool).unwrap();
    let backward = engine.recommend(&seeker, &reversed).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_integration_ranked_output_is_sorted() {
    let result = create_engine()
        .recommend(&create_test_seeker(&["Microsoft"]), &create_large_pool(40))
        .unwrap();

    assert!(result.recommendations.len() <= 8);
    for (i, rec) in result.recommendations.iter().enumerate() {
        assert_eq!(rec.rank, i + 1);
        assert!((0.0..=1.0).contains(&rec.score));
        assert!(!rec.backup_plans.is_empty());
    }
    for pair in result.recommendations.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_integration_profiles_disagree_on_empty_skills() {
    let seeker = Seeker {
        id: "s".to_string(),
        ..create_test_seeker(&["Google"])
    };
    let candidate = create_test_candidate("x", "Google", "Software Engineer", 4, &[], None);

    let thorough = CompatibilityScorer::new(ScoringProfile::thorough(), 2024).unwrap();
    let quick = CompatibilityScorer::new(ScoringProfile::quick(), 2024).unwrap();

    assert_eq!(thorough.score(&seeker, &candidate).skill, 0.0);
    assert_eq!(quick.score(&seeker, &candidate).skill, 0.3);
    assert_eq!(quick.score(&seeker, &candidate).profile, ProfileKind::Quick);
}

#[test]
fn test_integration_result_serializes_camel_case() {
    let result = create_engine()
        .recommend(&create_test_seeker(&["Google"]), &create_large_pool(8))
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("totalCandidates").is_some());
    assert!(json["recommendations"][0]["path"].get("successProbability").is_some());
}
