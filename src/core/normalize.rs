use std::collections::BTreeSet;

use crate::models::{Candidate, Seeker};

/// Seeker attributes prepared for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSeeker {
    pub skills: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub target_companies: BTreeSet<String>,
    pub target_roles: BTreeSet<String>,
    pub major: String,
}

/// Candidate attributes prepared for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCandidate {
    pub skills: BTreeSet<String>,
    pub company: String,
    pub role: String,
    pub industry: String,
    pub major: String,
}

/// Lower-case and set-ify the free-text fields of a profile
pub trait Normalize {
    type Output;

    fn normalize(&self) -> Self::Output;
}

impl Normalize for Seeker {
    type Output = NormalizedSeeker;

    fn normalize(&self) -> NormalizedSeeker {
        NormalizedSeeker {
            skills: tag_set(&self.skills),
            interests: tag_set(&self.interests),
            target_companies: tag_set(&self.target_companies),
            target_roles: tag_set(&self.target_roles),
            major: normalize_text(self.major.as_deref().unwrap_or_default()),
        }
    }
}

impl Normalize for Candidate {
    type Output = NormalizedCandidate;

    fn normalize(&self) -> NormalizedCandidate {
        NormalizedCandidate {
            skills: tag_set(&self.skills),
            company: normalize_text(&self.current_company),
            role: normalize_text(&self.current_role),
            industry: normalize_text(&self.industry),
            major: normalize_text(self.major.as_deref().unwrap_or_default()),
        }
    }
}

/// Trim and lower-case a single value
#[inline]
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Build a deduplicated set of trimmed, lower-cased, non-empty tags
pub fn tag_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| normalize_text(value.as_ref()))
        .filter(|value| !value.is_empty())
        .collect()
}
