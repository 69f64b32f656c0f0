use std::collections::HashMap;

use crate::core::advice::{display_name, path_risks, path_suggestions};
use crate::core::normalize::normalize_text;
use crate::models::{
    BuilderConfig, Candidate, PathKind, ReferralPath, ResponseWindow, ScoredCandidate, Seeker,
};

const COMPANY_CONNECTION_STRENGTH: f64 = 0.7;
const MUTUAL_CONNECTION_STRENGTH: f64 = 0.8;

/// Enumerates referral paths from a seeker to scored candidates
///
/// # Rules (applied in order)
/// 1. Direct: composite compatibility above the threshold
/// 2. Company network: two or more candidates at the same company
/// 3. Mutual connection: pairs sharing a company or graduating close together
/// 4. Skill based: enough shared skills, regardless of company or role
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    config: BuilderConfig,
}

impl PathBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build every candidate path; an empty pool yields no paths
    pub fn build_paths(&self, seeker: &Seeker, scored: &[ScoredCandidate]) -> Vec<ReferralPath> {
        if scored.is_empty() {
            return Vec::new();
        }

        let mut paths = Vec::new();
        paths.extend(self.direct_paths(seeker, scored));
        paths.extend(self.company_paths(seeker, scored));
        paths.extend(self.mutual_paths(seeker, scored));
        paths.extend(self.skill_paths(seeker, scored));

        tracing::debug!(
            "Built {} referral paths for seeker {} from {} candidates",
            paths.len(),
            seeker.id,
            scored.len()
        );

        paths
    }

    fn direct_paths(&self, seeker: &Seeker, scored: &[ScoredCandidate]) -> Vec<ReferralPath> {
        scored
            .iter()
            .filter(|sc| sc.score.composite > self.config.direct_threshold)
            .map(|sc| {
                let candidate = &sc.candidate;
                assemble(PathDraft {
                    id: format!("direct_{}", candidate.id),
                    kind: PathKind::Direct,
                    participants: vec![seeker.id.clone(), candidate.id.clone()],
                    contacts: vec![sc.clone()],
                    company: company_of(candidate),
                    alternates: vec![],
                    shared_skills: sc.score.shared_skills.clone(),
                    connection_strength: sc.score.composite,
                    description: format!(
                        "Direct contact with {} at {}",
                        display_name(candidate),
                        company_label(candidate)
                    ),
                })
            })
            .collect()
    }

    fn company_paths(&self, seeker: &Seeker, scored: &[ScoredCandidate]) -> Vec<ReferralPath> {
        let mut paths = Vec::new();

        for (key, mut members) in group_by_company(scored) {
            if members.len() < 2 {
                continue;
            }

            // Candidates with referral budget left come first, then the most senior
            members.sort_by(|a, b| {
                b.candidate
                    .has_capacity()
                    .cmp(&a.candidate.has_capacity())
                    .then_with(|| {
                        b.candidate
                            .years_of_experience
                            .cmp(&a.candidate.years_of_experience)
                    })
            });

            let available = members
                .iter()
                .take_while(|sc| sc.candidate.has_capacity())
                .count();
            let primaries = match available {
                0 => 1,
                n => n.min(self.config.max_company_primaries),
            };

            for (i, primary) in members.iter().take(primaries).enumerate() {
                let candidate = &primary.candidate;
                let alternates = members
                    .iter()
                    .skip(i + 1)
                    .take(self.config.alternates_per_primary)
                    .map(|sc| sc.candidate.id.clone())
                    .collect();

                paths.push(assemble(PathDraft {
                    id: format!("company_{}_{}", key.replace(char::is_whitespace, "-"), i),
                    kind: PathKind::CompanyNetwork,
                    participants: vec![seeker.id.clone(), candidate.id.clone()],
                    contacts: vec![(*primary).clone()],
                    company: company_of(candidate),
                    alternates,
                    shared_skills: primary.score.shared_skills.clone(),
                    connection_strength: COMPANY_CONNECTION_STRENGTH,
                    description: format!(
                        "Contact {} (senior contact) at {}",
                        display_name(candidate),
                        company_label(candidate)
                    ),
                }));
            }
        }

        paths
    }

    fn mutual_paths(&self, seeker: &Seeker, scored: &[ScoredCandidate]) -> Vec<ReferralPath> {
        let mut paths = Vec::new();

        for (i, first) in scored.iter().enumerate() {
            for second in &scored[i + 1..] {
                if !self.likely_acquainted(&first.candidate, &second.candidate) {
                    continue;
                }

                // The more experienced of the pair makes the introduction
                let (intermediary, target) =
                    if first.candidate.years_of_experience > second.candidate.years_of_experience {
                        (first, second)
                    } else {
                        (second, first)
                    };

                paths.push(assemble(PathDraft {
                    id: format!("mutual_{}_{}", intermediary.candidate.id, target.candidate.id),
                    kind: PathKind::MutualConnection,
                    participants: vec![
                        seeker.id.clone(),
                        intermediary.candidate.id.clone(),
                        target.candidate.id.clone(),
                    ],
                    contacts: vec![intermediary.clone(), target.clone()],
                    company: company_of(&target.candidate),
                    alternates: vec![],
                    shared_skills: target.score.shared_skills.clone(),
                    connection_strength: MUTUAL_CONNECTION_STRENGTH,
                    description: format!(
                        "Contact {} at {} through {}",
                        display_name(&target.candidate),
                        company_label(&target.candidate),
                        display_name(&intermediary.candidate)
                    ),
                }));
            }
        }

        paths
    }

    fn skill_paths(&self, seeker: &Seeker, scored: &[ScoredCandidate]) -> Vec<ReferralPath> {
        scored
            .iter()
            .filter(|sc| sc.score.shared_skills.len() >= self.config.min_shared_skills)
            .map(|sc| {
                let candidate = &sc.candidate;
                let shared = &sc.score.shared_skills;
                let highlighted: Vec<&str> = shared.iter().take(3).map(String::as_str).collect();

                assemble(PathDraft {
                    id: format!("skill_{}", candidate.id),
                    kind: PathKind::SkillBased,
                    participants: vec![seeker.id.clone(), candidate.id.clone()],
                    contacts: vec![sc.clone()],
                    company: company_of(candidate),
                    alternates: vec![],
                    shared_skills: shared.clone(),
                    connection_strength: (0.6 + shared.len() as f64 * 0.1).min(1.0),
                    description: format!(
                        "Connect with {} based on shared expertise in {}",
                        display_name(candidate),
                        highlighted.join(", ")
                    ),
                })
            })
            .collect()
    }

    /// Same current company, or graduation years within the configured window
    fn likely_acquainted(&self, a: &Candidate, b: &Candidate) -> bool {
        let company_a = normalize_text(&a.current_company);
        if !company_a.is_empty() && company_a == normalize_text(&b.current_company) {
            return true;
        }

        match (a.graduation_year, b.graduation_year) {
            (Some(x), Some(y)) => u32::try_from(self.config.mutual_graduation_window)
                .map_or(false, |window| x.abs_diff(y) <= window),
            _ => false,
        }
    }
}

/// Fields of a path known before the derived annotations are computed
struct PathDraft {
    id: String,
    kind: PathKind,
    participants: Vec<String>,
    contacts: Vec<ScoredCandidate>,
    company: Option<String>,
    alternates: Vec<String>,
    shared_skills: Vec<String>,
    connection_strength: f64,
    description: String,
}

fn assemble(draft: PathDraft) -> ReferralPath {
    let (success_probability, response_window) = match (draft.contacts.first(), draft.contacts.last()) {
        (Some(primary), Some(target)) => (
            success_probability(&target.candidate, draft.kind),
            response_window(&primary.candidate),
        ),
        _ => (0.0, ResponseWindow::ThreeToSevenDays),
    };

    let mut path = ReferralPath {
        id: draft.id,
        kind: draft.kind,
        participants: draft.participants,
        contacts: draft.contacts,
        company: draft.company,
        alternates: draft.alternates,
        shared_skills: draft.shared_skills,
        connection_strength: draft.connection_strength.clamp(0.0, 1.0),
        success_probability,
        response_window,
        description: draft.description,
        risks: vec![],
        suggestions: vec![],
    };

    path.risks = path_risks(&path);
    path.suggestions = path_suggestions(&path);
    path
}

/// Probability that the referring candidate follows through on this kind of path
pub fn success_probability(candidate: &Candidate, kind: PathKind) -> f64 {
    let mut probability = kind.base_success_probability();

    if candidate.willing_to_refer {
        probability += 0.1;
    }

    if candidate.has_capacity() {
        probability += 0.1;
    } else {
        probability -= 0.2;
    }

    probability.clamp(0.0, 1.0)
}

/// Declared response window, or one estimated from title seniority
pub fn response_window(candidate: &Candidate) -> ResponseWindow {
    if let Some(window) = candidate.contact_preferences.response_time {
        return window;
    }

    let role = candidate.role_lower();
    if ["director", "vp", "head"].iter().any(|title| role.contains(title)) {
        ResponseWindow::ThreeToSevenDays
    } else if ["manager", "lead"].iter().any(|title| role.contains(title)) {
        ResponseWindow::TwoToFiveDays
    } else {
        ResponseWindow::OneToThreeDays
    }
}

/// Group candidates by normalized company, in order of first appearance
fn group_by_company(scored: &[ScoredCandidate]) -> Vec<(String, Vec<&ScoredCandidate>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&ScoredCandidate>)> = Vec::new();

    for sc in scored {
        let key = normalize_text(&sc.candidate.current_company);
        if key.is_empty() {
            continue;
        }

        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(sc),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![sc]));
            }
        }
    }

    groups
}

fn company_of(candidate: &Candidate) -> Option<String> {
    let company = candidate.current_company.trim();
    (!company.is_empty()).then(|| company.to_string())
}

fn company_label(candidate: &Candidate) -> &str {
    let company = candidate.current_company.trim();
    if company.is_empty() {
        "an undisclosed company"
    } else {
        company
    }
}
