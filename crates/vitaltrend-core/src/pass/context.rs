//! Aggregation pass context
//!
//! The PassContext flows through every stage of one pass, accumulating
//! timing information and counts of records skipped for data-quality reasons.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Why a record was left out of the statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The record has no value for the grouping attribute
    MissingAttribute,
    /// Missing, NaN or infinite value for the signal
    MissingValue,
    /// Normalized time outside [0, 1] or not finite
    OutOfRange,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingAttribute => "missing_attribute",
            Self::MissingValue => "missing_value",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Context that flows through one aggregation pass
#[derive(Debug, Clone)]
pub struct PassContext {
    /// Unique trace ID for this pass
    pub trace_id: Uuid,
    /// When the pass started
    pub start_time: Instant,
    stage_timings: HashMap<String, Duration>,
    skipped: HashMap<SkipReason, usize>,
}

impl PassContext {
    pub fn new() -> Self {
        Self::with_trace_id(Uuid::new_v4())
    }

    /// Create a context with a specific trace ID
    pub fn with_trace_id(trace_id: Uuid) -> Self {
        Self {
            trace_id,
            start_time: Instant::now(),
            stage_timings: HashMap::new(),
            skipped: HashMap::new(),
        }
    }

    /// Record timing for a stage
    pub fn record_stage_timing(&mut self, stage: impl Into<String>, duration: Duration) {
        self.stage_timings.insert(stage.into(), duration);
    }

    /// Time a stage execution
    pub fn time_stage<F, R>(&mut self, stage: impl Into<String>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let stage_name = stage.into();
        let start = Instant::now();
        let result = f();
        self.record_stage_timing(stage_name, start.elapsed());
        result
    }

    /// Count one skipped record
    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    /// Number of records skipped for `reason`
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Total number of skipped records
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn stage_timings(&self) -> &HashMap<String, Duration> {
        &self.stage_timings
    }
}

impl Default for PassContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_timing() {
        let mut ctx = PassContext::new();

        let result = ctx.time_stage("partition", || {
            std::thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(result, 42);
        assert!(ctx.stage_timings()["partition"] >= Duration::from_millis(5));
    }

    #[test]
    fn test_skip_counters() {
        let mut ctx = PassContext::new();
        ctx.skip(SkipReason::MissingValue);
        ctx.skip(SkipReason::MissingValue);
        ctx.skip(SkipReason::OutOfRange);

        assert_eq!(ctx.skipped(SkipReason::MissingValue), 2);
        assert_eq!(ctx.skipped(SkipReason::OutOfRange), 1);
        assert_eq!(ctx.skipped(SkipReason::MissingAttribute), 0);
        assert_eq!(ctx.total_skipped(), 3);
    }

    #[test]
    fn test_fixed_trace_id() {
        let id = Uuid::new_v4();
        assert_eq!(PassContext::with_trace_id(id).trace_id, id);
    }
}
