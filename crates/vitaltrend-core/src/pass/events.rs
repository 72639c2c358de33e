//! Event-based pass notification system
//!
//! Lets several consumers (logging, metrics, a host UI) observe aggregation
//! passes without coupling them to the engine.

use super::context::PassContext;
use crate::error::{Error, Result};
use crate::record::GroupAttribute;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Event emitted while a pass runs
#[derive(Debug, Clone)]
pub enum PassEvent {
    /// Aggregation pass started
    PassStarted {
        trace_id: Uuid,
        signals: Vec<String>,
        group_by: GroupAttribute,
    },

    /// Aggregation pass completed
    PassCompleted {
        trace_id: Uuid,
        series: usize,
        points: usize,
        skipped: usize,
        duration: Duration,
    },

    /// Requested selection failed validation; prior output is kept
    SelectionRejected { trace_id: Uuid, reason: String },

    /// No visible data for the current selection
    EmptyDomain { trace_id: Uuid },

    /// Active-group set changed without re-aggregation
    VisibilityChanged {
        trace_id: Uuid,
        visible_series: usize,
    },
}

impl PassEvent {
    pub fn trace_id(&self) -> Uuid {
        match self {
            Self::PassStarted { trace_id, .. }
            | Self::PassCompleted { trace_id, .. }
            | Self::SelectionRejected { trace_id, .. }
            | Self::EmptyDomain { trace_id }
            | Self::VisibilityChanged { trace_id, .. } => *trace_id,
        }
    }
}

/// Trait for handling pass events
pub trait EventHandler: Send + Sync {
    /// Handle a pass event
    fn handle_event(&self, event: &PassEvent, context: &PassContext);

    /// Check if this handler is interested in a particular event type
    fn is_interested(&self, event: &PassEvent) -> bool {
        let _ = event;
        true
    }

    /// Get the name of this handler for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Event bus for distributing events to multiple handlers
pub struct EventBus {
    handlers: Arc<Mutex<Vec<Box<dyn EventHandler>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register an event handler
    pub fn register<H>(&self, handler: H) -> Result<()>
    where
        H: EventHandler + 'static,
    {
        let mut handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;
        handlers.push(Box::new(handler));
        Ok(())
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: PassEvent, context: &PassContext) -> Result<()> {
        let handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;

        for handler in handlers.iter() {
            if handler.is_interested(&event) {
                handler.handle_event(&event, context);
            }
        }

        Ok(())
    }

    /// Emit, logging instead of failing when the handler list is poisoned
    pub fn publish(&self, event: PassEvent, context: &PassContext) {
        if let Err(e) = self.emit(event, context) {
            log::error!("Dropped pass event: {e}");
        }
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> Result<usize> {
        let handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;
        Ok(handlers.len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count().unwrap_or(0))
            .finish()
    }
}

/// Simple logging event handler
pub struct LoggingHandler {
    level: log::Level,
}

impl LoggingHandler {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl EventHandler for LoggingHandler {
    fn handle_event(&self, event: &PassEvent, _context: &PassContext) {
        match event {
            PassEvent::PassStarted {
                trace_id,
                signals,
                group_by,
            } => {
                log::log!(self.level, "Pass started: {trace_id} signals={signals:?} group_by={group_by}");
            }
            PassEvent::PassCompleted {
                trace_id,
                series,
                points,
                skipped,
                duration,
            } => {
                log::log!(
                    self.level,
                    "Pass completed: {trace_id} in {duration:?} ({series} series, {points} points, {skipped} records skipped)"
                );
            }
            PassEvent::SelectionRejected { trace_id, reason } => {
                log::warn!("Selection rejected: {reason} (trace: {trace_id})");
            }
            _ => {
                log::trace!("Pass event: {event:?}");
            }
        }
    }
}

/// Metrics collection handler
#[derive(Clone, Default)]
pub struct MetricsHandler {
    metrics: Arc<Mutex<PassMetrics>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassMetrics {
    pub total_passes: usize,
    pub total_points: usize,
    pub rejected_selections: usize,
    pub empty_domains: usize,
    pub visibility_changes: usize,
}

impl MetricsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> Result<PassMetrics> {
        let metrics = self
            .metrics
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock metrics: {e}")))?;
        Ok(metrics.clone())
    }
}

impl EventHandler for MetricsHandler {
    fn handle_event(&self, event: &PassEvent, _context: &PassContext) {
        let Ok(mut metrics) = self.metrics.lock() else {
            log::error!("Failed to lock metrics");
            return;
        };

        match event {
            PassEvent::PassCompleted { points, .. } => {
                metrics.total_passes += 1;
                metrics.total_points += points;
            }
            PassEvent::SelectionRejected { .. } => metrics.rejected_selections += 1,
            PassEvent::EmptyDomain { .. } => metrics.empty_domains += 1,
            PassEvent::VisibilityChanged { .. } => metrics.visibility_changes += 1,
            PassEvent::PassStarted { .. } => {}
        }
    }
}

/// Null event handler that does nothing
#[derive(Default, Clone)]
pub struct NullEventHandler;

impl EventHandler for NullEventHandler {
    fn handle_event(&self, _event: &PassEvent, _context: &PassContext) {}

    fn is_interested(&self, _event: &PassEvent) -> bool {
        false
    }
}

/// Tally of skip reasons keyed by their string form, for diagnostics
pub fn skip_summary(context: &PassContext) -> HashMap<&'static str, usize> {
    use super::context::SkipReason;
    [
        SkipReason::MissingAttribute,
        SkipReason::MissingValue,
        SkipReason::OutOfRange,
    ]
    .into_iter()
    .map(|reason| (reason.as_str(), context.skipped(reason)))
    .filter(|(_, count)| *count > 0)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::context::SkipReason;

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        bus.register(LoggingHandler::new(log::Level::Debug)).unwrap();
        bus.register(NullEventHandler).unwrap();
        assert_eq!(bus.handler_count().unwrap(), 2);

        let context = PassContext::new();
        let event = PassEvent::PassStarted {
            trace_id: context.trace_id,
            signals: vec!["map".to_string()],
            group_by: GroupAttribute::ProcedureType,
        };
        bus.emit(event, &context).unwrap();
    }

    #[test]
    fn test_metrics_handler() {
        let handler = MetricsHandler::new();
        let bus = EventBus::new();
        bus.register(handler.clone()).unwrap();
        let context = PassContext::new();

        bus.publish(
            PassEvent::PassCompleted {
                trace_id: context.trace_id,
                series: 2,
                points: 7,
                skipped: 1,
                duration: Duration::from_millis(1),
            },
            &context,
        );
        bus.publish(
            PassEvent::SelectionRejected {
                trace_id: context.trace_id,
                reason: "two groups visible".to_string(),
            },
            &context,
        );
        bus.publish(PassEvent::EmptyDomain { trace_id: context.trace_id }, &context);

        let metrics = handler.snapshot().unwrap();
        assert_eq!(metrics.total_passes, 1);
        assert_eq!(metrics.total_points, 7);
        assert_eq!(metrics.rejected_selections, 1);
        assert_eq!(metrics.empty_domains, 1);
    }

    #[test]
    fn test_trace_id_accessor() {
        let id = Uuid::new_v4();
        assert_eq!(PassEvent::EmptyDomain { trace_id: id }.trace_id(), id);
    }

    #[test]
    fn test_skip_summary() {
        let mut context = PassContext::new();
        context.skip(SkipReason::OutOfRange);
        let summary = skip_summary(&context);
        assert_eq!(summary.get("out_of_range"), Some(&1));
        assert!(!summary.contains_key("missing_value"));
    }
}
