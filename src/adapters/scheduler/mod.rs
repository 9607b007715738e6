//! Background sweeps driven by wall-clock intervals.

mod sweep_scheduler;

pub use sweep_scheduler::{SweepScheduler, SweepSchedulerConfig};
