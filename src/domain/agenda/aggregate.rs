//! Agenda aggregate - the topic put to the assembly.
//!
//! Agendas are immutable once registered. A session references an agenda
//! by ID and never owns it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AgendaId, Timestamp, ValidationError};

/// Maximum length for an agenda title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Agenda aggregate.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `title` is 1-100 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    id: AgendaId,
    title: String,
    created_at: Timestamp,
}

impl Agenda {
    /// Registers a new agenda with a fresh ID.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `OutOfRange` if the title exceeds [`MAX_TITLE_LENGTH`]
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        Self::validate_title(&title)?;

        Ok(Self {
            id: AgendaId::new(),
            title,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an agenda from persistence (no validation).
    pub fn reconstitute(id: AgendaId, title: String, created_at: Timestamp) -> Self {
        Self {
            id,
            title,
            created_at,
        }
    }

    pub fn id(&self) -> &AgendaId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let length = title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                length as i64,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_agenda_trims_title() {
        let agenda = Agenda::new("  Board Election  ").unwrap();
        assert_eq!(agenda.title(), "Board Election");
    }

    #[test]
    fn new_agenda_gets_unique_id() {
        let a = Agenda::new("A").unwrap();
        let b = Agenda::new("A").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rejects_blank_title() {
        assert!(matches!(
            Agenda::new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn accepts_title_at_limit() {
        let title = "x".repeat(MAX_TITLE_LENGTH);
        assert!(Agenda::new(title).is_ok());
    }

    #[test]
    fn rejects_title_over_limit() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(
            Agenda::new(title),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(Agenda::new(title).is_ok());
    }
}
