//! Coop Assembly - cooperative assembly voting service
//!
//! Members vote YES or NO on agendas during time-boxed sessions. Each
//! member votes at most once per session, the tally is available while
//! voting runs, and the final result is published to a message broker
//! once the session closes.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
