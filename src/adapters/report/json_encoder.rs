//! JSON encoding for published results.

use crate::domain::canvass::PublishedReport;
use crate::ports::{ReportEncoder, SerializationFailure};

/// Encodes reports as compact JSON with camelCase keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportEncoder;

impl ReportEncoder for JsonReportEncoder {
    fn encode(&self, report: &PublishedReport) -> Result<String, SerializationFailure> {
        serde_json::to_string(report).map_err(|e| SerializationFailure(e.to_string()))
    }
}
