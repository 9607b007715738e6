//! Eligibility service adapters.

mod http_checker;

pub use http_checker::HttpEligibilityChecker;
