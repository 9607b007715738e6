//! Canvass domain module.
//!
//! Vote counters per session and the reports derived from them.

#[allow(clippy::module_inception)]
mod canvass;
mod report;

pub use canvass::{Canvass, Outcome};
pub use report::{PublishedReport, Report};
