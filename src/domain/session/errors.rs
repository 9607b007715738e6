//! Session-specific error types.

use crate::domain::foundation::{AgendaId, DomainError, ErrorCode, Reference, ValidationError};

/// Errors raised while opening or loading sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A referenced agenda, session or canvass does not exist.
    NotFoundReference(Reference),
    /// A session has already been opened for this agenda.
    AlreadyOpen(AgendaId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(reference: Reference) -> Self {
        SessionError::NotFoundReference(reference)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFoundReference(Reference::Agenda(_)) => ErrorCode::AgendaNotFound,
            SessionError::NotFoundReference(Reference::Canvass(_)) => ErrorCode::CanvassNotFound,
            SessionError::NotFoundReference(_) => ErrorCode::SessionNotFound,
            SessionError::AlreadyOpen(_) => ErrorCode::SessionAlreadyOpen,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFoundReference(reference) => format!("Not found: {}", reference),
            SessionError::AlreadyOpen(agenda_id) => {
                format!("A session was already opened for agenda {}", agenda_id)
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
