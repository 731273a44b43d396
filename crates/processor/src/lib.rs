//! Review latency aggregation: derivation, weekly bucketing, per-user
//! statistics, filtering and background scheduling

pub mod derive;
pub mod filter;
pub mod mean;
pub mod pipeline;
pub mod scheduler;
pub mod users;
pub mod week;
pub mod weekly;
pub mod window;

#[cfg(test)]
mod scheduler_test;

pub use filter::MetricFilter;
pub use pipeline::{MetricsReport, PipelineConfig};
pub use scheduler::{MetricsScheduler, MetricsSnapshot, SchedulerState, SchedulerStatus};
