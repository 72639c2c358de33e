//! Infrastructure shared by aggregation passes
//!
//! A pass carries a [`PassContext`] (trace id, stage timings, skip counters)
//! and reports progress through an [`EventBus`]. The pass itself lives in the
//! `vitaltrend` crate.

pub mod context;
pub mod events;

pub use context::{PassContext, SkipReason};
pub use events::{
    skip_summary, EventBus, EventHandler, LoggingHandler, MetricsHandler, NullEventHandler, PassEvent,
    PassMetrics,
};
