//! Report encoders.

mod json_encoder;

pub use json_encoder::JsonReportEncoder;
