//! Resolve → fetch → join → calculate → classify.

mod classify;
mod engine;
mod fetch;
mod lineage;
mod metrics;
mod resolve;

#[cfg(test)]
mod fakes;

pub use classify::{classify, Classification, MetricKind, Tier};
pub use engine::DoraEngine;
pub use metrics::DoraMetrics;
