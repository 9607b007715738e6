//! ReportEncoder port - turns a published report into its wire payload.

use thiserror::Error;

use crate::domain::canvass::PublishedReport;

/// The report could not be encoded.
#[derive(Debug, Clone, Error)]
#[error("Failed to serialize report: {0}")]
pub struct SerializationFailure(pub String);

/// Port for encoding reports before publication.
pub trait ReportEncoder: Send + Sync {
    fn encode(&self, report: &PublishedReport) -> Result<String, SerializationFailure>;
}
