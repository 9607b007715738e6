//! Vote-specific error types.

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, Reference, ValidationError};

/// Why a vote was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteRejection {
    /// The member already has a vote in this session.
    AlreadyVoted,
    /// The eligibility service reports the member cannot vote.
    Ineligible,
    /// The session's deadline has passed.
    SessionClosed,
}

impl VoteRejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            VoteRejection::AlreadyVoted => ErrorCode::AlreadyVoted,
            VoteRejection::Ineligible => ErrorCode::MemberIneligible,
            VoteRejection::SessionClosed => ErrorCode::SessionClosed,
        }
    }
}

impl fmt::Display for VoteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            VoteRejection::AlreadyVoted => "already voted",
            VoteRejection::Ineligible => "ineligible",
            VoteRejection::SessionClosed => "session closed",
        };
        write!(f, "{}", reason)
    }
}

/// Errors raised while casting votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// The session (or its canvass) does not exist.
    NotFoundReference(Reference),
    /// The vote breaks a voting rule.
    Rejected(VoteRejection),
    /// Request input was malformed.
    ValidationFailed { field: String, message: String },
    /// The eligibility service could not be reached.
    EligibilityUnavailable(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl VoteError {
    pub fn rejected(reason: VoteRejection) -> Self {
        VoteError::Rejected(reason)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VoteError::NotFoundReference(Reference::Agenda(_)) => ErrorCode::AgendaNotFound,
            VoteError::NotFoundReference(Reference::Canvass(_)) => ErrorCode::CanvassNotFound,
            VoteError::NotFoundReference(_) => ErrorCode::SessionNotFound,
            VoteError::Rejected(reason) => reason.code(),
            VoteError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            VoteError::EligibilityUnavailable(_) => ErrorCode::EligibilityUnavailable,
            VoteError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            VoteError::NotFoundReference(reference) => format!("Not found: {}", reference),
            VoteError::Rejected(reason) => format!("Vote rejected: {}", reason),
            VoteError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            VoteError::EligibilityUnavailable(msg) => {
                format!("Eligibility service unavailable: {}", msg)
            }
            VoteError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl fmt::Display for VoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for VoteError {}

impl From<ValidationError> for VoteError {
    fn from(err: ValidationError) -> Self {
        VoteError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for VoteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyVoted => VoteError::Rejected(VoteRejection::AlreadyVoted),
            ErrorCode::MemberIneligible => VoteError::Rejected(VoteRejection::Ineligible),
            ErrorCode::SessionClosed => VoteError::Rejected(VoteRejection::SessionClosed),
            ErrorCode::EligibilityUnavailable => VoteError::EligibilityUnavailable(err.message),
            _ => VoteError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reasons_render_as_short_phrases() {
        assert_eq!(VoteRejection::AlreadyVoted.to_string(), "already voted");
        assert_eq!(VoteRejection::Ineligible.to_string(), "ineligible");
        assert_eq!(VoteRejection::SessionClosed.to_string(), "session closed");
    }

    #[test]
    fn rejection_code_flows_through_error() {
        let err = VoteError::rejected(VoteRejection::SessionClosed);
        assert_eq!(err.code(), ErrorCode::SessionClosed);
        assert_eq!(err.to_string(), "Vote rejected: session closed");
    }

    #[test]
    fn eligibility_outage_keeps_its_code() {
        let err: VoteError =
            DomainError::new(ErrorCode::EligibilityUnavailable, "timeout").into();
        assert_eq!(err.code(), ErrorCode::EligibilityUnavailable);
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err: VoteError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
