//! Session aggregate entity.
//!
//! A session is the time-boxed window during which votes on an agenda
//! are accepted.
//!
//! # Ownership
//!
//! Sessions reference their agenda and canvass by ID but do NOT own them.
//! Agendas are managed by the agenda registry, counters by the canvass
//! store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    status_for, AgendaId, CanvassId, DomainError, ErrorCode, SessionId, SessionStatus,
    StateMachine, Timestamp, ValidationError,
};

/// Length of a voting window, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DeadlineMinutes(u32);

impl DeadlineMinutes {
    /// Window used when the caller does not ask for one.
    pub const DEFAULT: DeadlineMinutes = DeadlineMinutes(1);

    /// # Errors
    ///
    /// - `OutOfRange` if `minutes` is zero
    pub fn new(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::out_of_range(
                "deadline_minutes",
                1,
                u32::MAX as i64,
                0,
            ));
        }
        Ok(Self(minutes))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for DeadlineMinutes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for DeadlineMinutes {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeadlineMinutes> for u32 {
    fn from(value: DeadlineMinutes) -> Self {
        value.0
    }
}

/// Session aggregate.
///
/// # Invariants
///
/// - `opening_time < closing_time`
/// - `status` moves only `Waiting -> Open -> Closed`
/// - `published` moves only `false -> true`, and only once `Closed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    agenda_id: AgendaId,
    canvass_id: CanvassId,
    opening_time: Timestamp,
    closing_time: Timestamp,
    status: SessionStatus,
    published: bool,
}

impl Session {
    /// Opens a new session at `now` that closes `deadline` minutes later.
    pub fn open(
        agenda_id: AgendaId,
        canvass_id: CanvassId,
        now: Timestamp,
        deadline: DeadlineMinutes,
    ) -> Self {
        Self {
            id: SessionId::new(),
            agenda_id,
            canvass_id,
            opening_time: now,
            closing_time: now.plus_minutes(i64::from(deadline.get())),
            status: SessionStatus::Open,
            published: false,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        agenda_id: AgendaId,
        canvass_id: CanvassId,
        opening_time: Timestamp,
        closing_time: Timestamp,
        status: SessionStatus,
        published: bool,
    ) -> Self {
        Self {
            id,
            agenda_id,
            canvass_id,
            opening_time,
            closing_time,
            status,
            published,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn agenda_id(&self) -> &AgendaId {
        &self.agenda_id
    }

    pub fn canvass_id(&self) -> &CanvassId {
        &self.canvass_id
    }

    pub fn opening_time(&self) -> &Timestamp {
        &self.opening_time
    }

    pub fn closing_time(&self) -> &Timestamp {
        &self.closing_time
    }

    /// The persisted status, as last written by the closer.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clock-derived queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Status derived from the voting window, for display.
    pub fn status_at(&self, now: Timestamp) -> SessionStatus {
        status_for(now, self.opening_time, self.closing_time)
    }

    /// True once the deadline has strictly passed. Used by the closer sweep.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.closing_time < now
    }

    /// True if a vote cast at `now` may be recorded.
    ///
    /// Checks the persisted status and the closing timestamp, so a vote is
    /// refused at the deadline even if the closer has not run yet.
    pub fn accepts_votes_at(&self, now: Timestamp) -> bool {
        self.status.accepts_votes() && now < self.closing_time
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the session to `Closed`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is `Open`
    pub fn close(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SessionStatus::Closed)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }

    /// Records that the final report has been published.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is not `Closed` or was
    ///   already published
    pub fn mark_published(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::Closed {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session {} is {} and cannot be published", self.id, self.status),
            ));
        }
        if self.published {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session {} was already published", self.id),
            ));
        }
        self.published = true;
        Ok(())
    }

    /// Hands a publication claim back after the report failed to send.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is `Closed` and
    ///   marked published
    pub fn release_publication(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::Closed || !self.published {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session {} holds no publication claim", self.id),
            ));
        }
        self.published = false;
        Ok(())
    }
}
