//! One complete aggregation pass

use crate::assemble::{SeriesAssembler, SummarySeries};
use crate::config::AggregationConfig;
use crate::domain::{compute_domain, Domain};
use crate::partition::GroupPartitioner;
use crate::visibility::filter_visible;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use vitaltrend_core::pass::skip_summary;
use vitaltrend_core::{EventBus, PassContext, PassEvent, RecordStore, Result, SelectionState, SkipReason};
use vitaltrend_summary::StatisticsAggregator;

/// Full (unfiltered) output of one pass
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    trace_id: Uuid,
    selection: SelectionState,
    series: Vec<SummarySeries>,
}

impl Aggregation {
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Selection the pass was computed for
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Every series, visible or not, in partition order
    pub fn series(&self) -> &[SummarySeries] {
        &self.series
    }

    pub fn get(&self, key: &str) -> Option<&SummarySeries> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Series visible under the pass's own active-group set
    pub fn visible(&self) -> Vec<&SummarySeries> {
        self.visible_with(self.selection.active_groups())
    }

    /// Series visible under another active-group set, without re-aggregating
    pub fn visible_with(&self, active_groups: &BTreeSet<String>) -> Vec<&SummarySeries> {
        filter_visible(&self.series, active_groups)
    }

    /// Domain of the visible series
    pub fn domain(&self) -> Result<Domain> {
        compute_domain(self.visible())
    }

    pub fn domain_with(&self, active_groups: &BTreeSet<String>) -> Result<Domain> {
        compute_domain(self.visible_with(active_groups))
    }

    pub fn total_points(&self) -> usize {
        self.series.iter().map(SummarySeries::len).sum()
    }
}

/// Runs aggregation passes with a fixed configuration
///
/// A pass is a pure function of the record store, the selection and the
/// configuration; nothing is cached between passes.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
    events: EventBus,
}

impl Aggregator {
    /// Create an aggregator after validating `config`
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            events: EventBus::new(),
        })
    }

    /// Share an existing event bus
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Validate `selection` and run one full pass
    ///
    /// Rejected selections are reported on the event bus and returned as
    /// errors; no partial result is ever produced.
    #[instrument(skip_all, fields(signals = ?selection.signals(), group_by = %selection.group_by()))]
    pub fn aggregate(&self, store: &RecordStore, selection: &SelectionState) -> Result<Aggregation> {
        let mut context = PassContext::new();

        if let Err(e) = selection.validate(store) {
            if e.is_recoverable() {
                debug!(error = %e, "selection rejected");
            } else {
                warn!(error = %e, "selection rejected");
            }
            self.events.publish(
                PassEvent::SelectionRejected {
                    trace_id: context.trace_id,
                    reason: e.to_string(),
                },
                &context,
            );
            return Err(e);
        }

        self.events.publish(
            PassEvent::PassStarted {
                trace_id: context.trace_id,
                signals: selection.signals().to_vec(),
                group_by: selection.group_by(),
            },
            &context,
        );

        let partitioner = GroupPartitioner::new(selection.group_by());
        let partition = context.time_stage("partition", || {
            partitioner.partition(store.filter_signals(selection.signals()))
        });
        for _ in 0..partition.missing_attribute {
            context.skip(SkipReason::MissingAttribute);
        }

        let assembler = SeriesAssembler::new(self.config.binning, StatisticsAggregator::new(self.config.spread));
        let series = {
            let start = Instant::now();
            let series = assembler.assemble(&partition, selection.signals(), &mut context);
            context.record_stage_timing("assemble", start.elapsed());
            series
        };

        let aggregation = Aggregation {
            trace_id: context.trace_id,
            selection: selection.clone(),
            series,
        };

        debug!(
            series = aggregation.series.len(),
            points = aggregation.total_points(),
            skipped = ?skip_summary(&context),
            "pass complete"
        );
        self.events.publish(
            PassEvent::PassCompleted {
                trace_id: context.trace_id,
                series: aggregation.series.len(),
                points: aggregation.total_points(),
                skipped: context.total_skipped(),
                duration: context.elapsed(),
            },
            &context,
        );

        Ok(aggregation)
    }
}
