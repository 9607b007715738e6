//! Session command and query handlers.

mod get_session;
mod open_session;

pub use get_session::{GetSessionHandler, GetSessionQuery, SessionView};
pub use open_session::{OpenSessionCommand, OpenSessionHandler, OpenSessionResult};
