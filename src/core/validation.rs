use crate::error::{RecordKind, ReferralError};
use crate::models::{Candidate, Seeker};

const MISSING_ID: &str = "<missing>";

/// Plausible graduation years; anything outside is a data-entry error
pub const GRADUATION_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Reject seeker records the scorer cannot work with
pub fn validate_seeker(seeker: &Seeker) -> Result<(), ReferralError> {
    if seeker.id.trim().is_empty() {
        return Err(malformed(RecordKind::Seeker, MISSING_ID, "id", "must not be empty"));
    }

    check_graduation_year(RecordKind::Seeker, seeker.id.trim(), seeker.graduation_year)
}

/// Reject candidate records with a missing id or inconsistent referral counters
pub fn validate_candidate(candidate: &Candidate) -> Result<(), ReferralError> {
    let id = candidate.id.trim();
    if id.is_empty() {
        return Err(malformed(RecordKind::Candidate, MISSING_ID, "id", "must not be empty"));
    }

    check_graduation_year(RecordKind::Candidate, id, candidate.graduation_year)?;

    if candidate.years_of_experience < 0 {
        return Err(malformed(RecordKind::Candidate, id, "years_of_experience", "must not be negative"));
    }

    if candidate.monthly_referral_capacity < 0 {
        return Err(malformed(
            RecordKind::Candidate,
            id,
            "monthly_referral_capacity",
            "must not be negative",
        ));
    }

    if candidate.referrals_used_this_month < 0 {
        return Err(malformed(
            RecordKind::Candidate,
            id,
            "referrals_used_this_month",
            "must not be negative",
        ));
    }

    if candidate.referrals_used_this_month > candidate.monthly_referral_capacity {
        return Err(malformed(
            RecordKind::Candidate,
            id,
            "referrals_used_this_month",
            &format!(
                "exceeds monthly capacity ({} > {})",
                candidate.referrals_used_this_month, candidate.monthly_referral_capacity
            ),
        ));
    }

    Ok(())
}

fn check_graduation_year(kind: RecordKind, id: &str, year: Option<i32>) -> Result<(), ReferralError> {
    match year {
        Some(year) if !GRADUATION_YEARS.contains(&year) => Err(malformed(
            kind,
            id,
            "graduation_year",
            &format!(
                "{} is outside {}..={}",
                year,
                GRADUATION_YEARS.start(),
                GRADUATION_YEARS.end()
            ),
        )),
        _ => Ok(()),
    }
}

fn malformed(kind: RecordKind, record_id: &str, field: &'static str, reason: &str) -> ReferralError {
    ReferralError::MalformedRecord {
        kind,
        record_id: record_id.to_string(),
        field,
        reason: reason.to_string(),
    }
}
