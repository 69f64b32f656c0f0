use thiserror::Error;

/// Errors raised by the scoring and ranking core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferralError {
    #[error("malformed {kind} record '{record_id}': field '{field}' {reason}")]
    MalformedRecord {
        kind: RecordKind,
        record_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("invalid weight configuration '{name}': {reason}")]
    InvalidWeights { name: String, reason: String },

    #[error("path '{path_id}' could not be evaluated: {reason}")]
    PathEvaluation { path_id: String, reason: String },
}

/// Which record type failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Seeker,
    Candidate,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Seeker => f.write_str("seeker"),
            RecordKind::Candidate => f.write_str("candidate"),
        }
    }
}
