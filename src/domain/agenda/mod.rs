//! Agenda domain module.
//!
//! An agenda is the immutable topic a session votes on.

mod aggregate;
mod errors;

pub use aggregate::{Agenda, MAX_TITLE_LENGTH};
pub use errors::AgendaError;
