//! Qualitative annotations attached to referral paths and recommendations.
//!
//! Everything here is a deterministic function of the path and the seeker;
//! nothing is generated text from an external model.

use crate::models::{BackupPlan, OutreachBrief, PathKind, ReferralPath, Seeker};

pub const LIMITED_CONTACT_RISK: &str = "Limited contact information available";

const MAX_COMMON_INTERESTS: usize = 5;
const MAX_CONVERSATION_STARTERS: usize = 3;

/// Risks that could stop the path from producing a referral
pub fn path_risks(path: &ReferralPath) -> Vec<String> {
    let mut risks = Vec::new();

    if let Some(target) = path.target() {
        if !target.candidate.willing_to_refer {
            risks.push("Contact may not be willing to provide referrals".to_string());
        }
        if !target.candidate.has_capacity() {
            risks.push("Contact has reached referral limit for this month".to_string());
        }
    }

    if let Some(primary) = path.primary() {
        if !primary.candidate.has_linkedin() && !primary.candidate.has_email() {
            risks.push(LIMITED_CONTACT_RISK.to_string());
        }
    }

    if path.kind == PathKind::MutualConnection {
        risks.push("Depends on intermediary's willingness to help".to_string());
    }

    if path.success_probability < 0.5 {
        risks.push("Lower probability of successful referral".to_string());
    }

    risks
}

/// Suggestions for improving the odds of a path; expects `path.risks` filled
pub fn path_suggestions(path: &ReferralPath) -> Vec<String> {
    let mut suggestions = Vec::new();

    if path.connection_strength < 0.6 {
        suggestions.push("Research common connections or shared interests before reaching out".to_string());
    }

    if path.risks.iter().any(|risk| risk == LIMITED_CONTACT_RISK) {
        suggestions.push("Try to find mutual connections who can provide better contact details".to_string());
    }

    if path.kind == PathKind::Direct {
        suggestions.push("Personalize outreach message with specific details about their work".to_string());
    }

    if path.success_probability < 0.7 {
        suggestions.push("Consider timing the outreach for better response rates".to_string());
    }

    suggestions
}

pub fn next_steps(path: &ReferralPath) -> Vec<String> {
    let mut steps: Vec<String> = match path.kind {
        PathKind::Direct | PathKind::SkillBased => vec![
            "Research the contact's recent work and achievements".to_string(),
            "Craft personalized outreach message".to_string(),
            "Send connection request or email".to_string(),
        ],
        PathKind::CompanyNetwork => vec![
            "Research the team and open roles at the company".to_string(),
            "Reach out to the primary contact first".to_string(),
        ],
        PathKind::MutualConnection => vec![
            "Contact the intermediary first".to_string(),
            "Request an introduction to the target contact".to_string(),
            "Prepare background for the intermediary to share".to_string(),
        ],
    };

    steps.push("Follow up if no response within a week".to_string());
    steps.push("Prepare for potential conversation or interview".to_string());
    steps
}

pub fn backup_plans(path: &ReferralPath) -> Vec<BackupPlan> {
    let mut plans = vec![BackupPlan {
        kind: "alternative_contact".to_string(),
        description: "Try a different contact method (LinkedIn vs email)".to_string(),
        trigger: "No response after 7 days".to_string(),
    }];

    if !path.alternates.is_empty() {
        plans.push(BackupPlan {
            kind: "alternative_candidate".to_string(),
            description: format!(
                "Contact an alternative colleague at the same company ({})",
                path.alternates.join(", ")
            ),
            trigger: "Primary contact declines or doesn't respond".to_string(),
        });
    }

    plans.push(BackupPlan {
        kind: "different_approach".to_string(),
        description: "Ask for an informational interview instead of a direct referral".to_string(),
        trigger: "Referral request is declined".to_string(),
    });

    plans
}

/// Structured inputs for an outreach message about this path
pub fn outreach_brief(seeker: &Seeker, path: &ReferralPath) -> OutreachBrief {
    let Some(target) = path.target() else {
        return OutreachBrief {
            seeker_name: seeker.name.clone(),
            ..OutreachBrief::default()
        };
    };
    let candidate = &target.candidate;

    let mut common_interests = target.score.shared_skills.clone();
    if let (Some(seeker_major), Some(candidate_major)) = (&seeker.major, &candidate.major) {
        if !seeker_major.trim().is_empty() && seeker_major.trim().eq_ignore_ascii_case(candidate_major.trim()) {
            common_interests.push(format!("Both studied {}", seeker_major.trim()));
        }
    }
    common_interests.truncate(MAX_COMMON_INTERESTS);

    let mut starters = Vec::new();
    if let Some(skill) = path.shared_skills.first() {
        starters.push(format!("I noticed we both have experience with {}", skill));
    }
    if target.score.company >= 1.0 && !candidate.current_company.is_empty() {
        starters.push(format!(
            "I'm very interested in opportunities at {}",
            candidate.current_company
        ));
    }
    if !candidate.current_role.is_empty() {
        starters.push(format!(
            "I'd love to learn more about the {} role",
            candidate.current_role
        ));
    }
    starters.truncate(MAX_CONVERSATION_STARTERS);

    OutreachBrief {
        seeker_name: seeker.name.clone(),
        contact_name: display_name(candidate),
        contact_company: candidate.current_company.clone(),
        contact_role: candidate.current_role.clone(),
        intermediary_name: path
            .intermediary()
            .map(|intermediary| display_name(&intermediary.candidate)),
        shared_skills: path.shared_skills.clone(),
        common_interests,
        conversation_starters: starters,
    }
}

/// Name to show for a candidate, falling back to the id
pub fn display_name(candidate: &crate::models::Candidate) -> String {
    if candidate.name.trim().is_empty() {
        candidate.id.clone()
    } else {
        candidate.name.clone()
    }
}
