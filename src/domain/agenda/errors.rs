//! Agenda-specific error types.

use crate::domain::foundation::{AgendaId, DomainError, ErrorCode, ValidationError};

/// Agenda-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// Agenda was not found.
    NotFound(AgendaId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AgendaError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AgendaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AgendaError::NotFound(_) => ErrorCode::AgendaNotFound,
            AgendaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AgendaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AgendaError::NotFound(id) => format!("Agenda not found: {}", id),
            AgendaError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AgendaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AgendaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AgendaError {}

impl From<ValidationError> for AgendaError {
    fn from(err: ValidationError) -> Self {
        AgendaError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for AgendaError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AgendaError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AgendaError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_agenda_not_found_code() {
        let err = AgendaError::NotFound(AgendaId::new());
        assert_eq!(err.code(), ErrorCode::AgendaNotFound);
    }

    #[test]
    fn validation_error_keeps_field_name() {
        let err: AgendaError = ValidationError::empty_field("title").into();
        assert!(matches!(err, AgendaError::ValidationFailed { ref field, .. } if field == "title"));
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err: AgendaError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, AgendaError::Infrastructure(_)));
    }
}
