//! Interactive trend view: selection changes driving passes and frames

use crate::assemble::SummarySeries;
use crate::domain::{compute_domain, Domain};
use crate::engine::{Aggregation, Aggregator};
use crate::overlay::{align_markers, EventMarker, OverlayEvent};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;
use vitaltrend_core::{GroupAttribute, PassContext, PassEvent, RecordStore, Result, SelectionState};

/// What a renderer draws: visible series plus their shared value domain
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Pass the series came from
    pub trace_id: Uuid,
    /// Visible series in partition order
    pub series: Vec<SummarySeries>,
    /// `None` when there is nothing to display
    pub domain: Option<Domain>,
}

impl Frame {
    pub fn is_blank(&self) -> bool {
        self.domain.is_none()
    }

    pub fn get(&self, key: &str) -> Option<&SummarySeries> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.key.as_str())
    }
}

/// Owns a record store and the current selection, keeping a frame in sync
///
/// Signal and grouping changes re-run the pass; active-group changes only
/// re-filter the last pass. A rejected change leaves the selection and the
/// frame exactly as they were.
///
/// ```rust
/// use vitaltrend::{Aggregator, GroupAttribute, Record, RecordStore, SelectionState, TrendView};
///
/// let store = RecordStore::new(vec![
///     Record::new("map", Some(80.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
///     Record::new("hr", Some(60.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
///     Record::new("map", Some(70.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "B"),
/// ]);
/// let selection = SelectionState::new("map", GroupAttribute::ProcedureType);
/// let mut view = TrendView::new(store, Aggregator::default(), selection).unwrap();
/// assert_eq!(view.frame().series.len(), 2);
///
/// // Two signals with two visible groups is refused
/// assert!(view.select_signals(["map", "hr"]).is_err());
/// assert_eq!(view.selection().signals(), ["map"]);
/// ```
#[derive(Debug, Clone)]
pub struct TrendView {
    store: RecordStore,
    aggregator: Aggregator,
    selection: SelectionState,
    aggregation: Aggregation,
    frame: Frame,
}

impl TrendView {
    /// Build the view and run the initial pass
    pub fn new(store: RecordStore, aggregator: Aggregator, selection: SelectionState) -> Result<Self> {
        let aggregation = aggregator.aggregate(&store, &selection)?;
        let frame = build_frame(&aggregator, &aggregation, selection.active_groups());
        Ok(Self {
            store,
            aggregator,
            selection,
            aggregation,
            frame,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Full output of the last accepted pass, hidden groups included
    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Replace the selected signals and re-run the pass
    pub fn select_signals<I, S>(&mut self, signals: I) -> Result<&Frame>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidate = self.selection.clone().with_signals(signals);
        self.rerun(candidate)
    }

    /// Switch the grouping attribute; the active-group set is cleared
    pub fn set_group_by(&mut self, group_by: GroupAttribute) -> Result<&Frame> {
        let candidate = self
            .selection
            .clone()
            .with_group_by(group_by)
            .with_active_groups(Vec::<String>::new());
        self.rerun(candidate)
    }

    /// Show or hide one group without recomputing statistics
    pub fn toggle_group(&mut self, group: &str) -> Result<&Frame> {
        let mut candidate = self.selection.clone();
        candidate.toggle_group(group);
        self.refilter(candidate)
    }

    /// Replace the active-group set without recomputing statistics
    pub fn set_active_groups<I, S>(&mut self, groups: I) -> Result<&Frame>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidate = self.selection.clone().with_active_groups(groups);
        self.refilter(candidate)
    }

    /// Re-run the pass for the current selection
    pub fn refresh(&mut self) -> Result<&Frame> {
        self.rerun(self.selection.clone())
    }

    /// Swap in a new record store; kept only if the current selection still applies
    pub fn replace_store(&mut self, store: RecordStore) -> Result<&Frame> {
        let aggregation = self.aggregator.aggregate(&store, &self.selection)?;
        self.store = store;
        self.commit(self.selection.clone(), aggregation);
        Ok(&self.frame)
    }

    /// Markers for overlay events matching the current grouping and visible groups
    pub fn markers<'a, I>(&self, events: I) -> Vec<EventMarker>
    where
        I: IntoIterator<Item = &'a OverlayEvent>,
    {
        align_markers(events, &self.selection)
    }

    fn rerun(&mut self, candidate: SelectionState) -> Result<&Frame> {
        let aggregation = self.aggregator.aggregate(&self.store, &candidate)?;
        self.commit(candidate, aggregation);
        Ok(&self.frame)
    }

    fn commit(&mut self, selection: SelectionState, aggregation: Aggregation) {
        self.frame = build_frame(&self.aggregator, &aggregation, selection.active_groups());
        info!(
            signals = ?selection.signals(),
            group_by = %selection.group_by(),
            series = self.frame.series.len(),
            "view updated"
        );
        self.selection = selection;
        self.aggregation = aggregation;
    }

    fn refilter(&mut self, candidate: SelectionState) -> Result<&Frame> {
        let context = PassContext::with_trace_id(self.aggregation.trace_id());
        if let Err(e) = candidate.validate(&self.store) {
            debug!(error = %e, "active-group change rejected");
            self.aggregator.events().publish(
                PassEvent::SelectionRejected {
                    trace_id: context.trace_id,
                    reason: e.to_string(),
                },
                &context,
            );
            return Err(e);
        }

        self.frame = build_frame(&self.aggregator, &self.aggregation, candidate.active_groups());
        self.selection = candidate;
        self.aggregator.events().publish(
            PassEvent::VisibilityChanged {
                trace_id: context.trace_id,
                visible_series: self.frame.series.len(),
            },
            &context,
        );
        Ok(&self.frame)
    }
}

fn build_frame(aggregator: &Aggregator, aggregation: &Aggregation, active_groups: &BTreeSet<String>) -> Frame {
    let series: Vec<SummarySeries> = aggregation
        .visible_with(active_groups)
        .into_iter()
        .cloned()
        .collect();

    let domain = compute_domain(&series).ok();
    if domain.is_none() {
        let context = PassContext::with_trace_id(aggregation.trace_id());
        debug!(trace_id = %context.trace_id, "nothing to display");
        aggregator
            .events()
            .publish(PassEvent::EmptyDomain { trace_id: context.trace_id }, &context);
    }

    Frame {
        trace_id: aggregation.trace_id(),
        series,
        domain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaltrend_core::pass::MetricsHandler;
    use vitaltrend_core::{Error, Record};

    fn store() -> RecordStore {
        RecordStore::new(vec![
            Record::new("map", Some(80.0), 0.0)
                .with_attribute(GroupAttribute::ProcedureType, "A")
                .with_attribute(GroupAttribute::EmergencyFlag, "0"),
            Record::new("map", Some(90.0), 0.01)
                .with_attribute(GroupAttribute::ProcedureType, "A")
                .with_attribute(GroupAttribute::EmergencyFlag, "1"),
            Record::new("map", Some(70.0), 0.0)
                .with_attribute(GroupAttribute::ProcedureType, "B")
                .with_attribute(GroupAttribute::EmergencyFlag, "0"),
            Record::new("hr", Some(60.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
            Record::new("hr", Some(64.0), 0.5).with_attribute(GroupAttribute::ProcedureType, "B"),
        ])
    }

    fn view() -> TrendView {
        let selection = SelectionState::new("map", GroupAttribute::ProcedureType);
        TrendView::new(store(), Aggregator::default(), selection).unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let view = view();
        let keys: Vec<&str> = view.frame().keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(view.frame().domain, Some(Domain { min: 70.0, max: 90.0 }));
        assert_eq!(view.frame().trace_id, view.aggregation().trace_id());
    }

    #[test]
    fn test_rejected_change_keeps_previous_frame() {
        let mut view = view();
        let before = view.frame().clone();
        let selection_before = view.selection().clone();

        let err = view.select_signals(["map", "hr"]).unwrap_err();
        assert!(matches!(err, Error::InvalidSelectionCombination { .. }));
        assert_eq!(view.frame(), &before);
        assert_eq!(view.selection(), &selection_before);

        assert!(view.select_signals(["spo2"]).is_err());
        assert_eq!(view.frame(), &before);
    }

    #[test]
    fn test_toggle_filters_without_recompute() {
        let mut view = view();
        let metrics = MetricsHandler::new();
        view.aggregator().events().register(metrics.clone()).unwrap();
        let trace_id = view.aggregation().trace_id();
        let b_before = view.frame().get("B").unwrap().clone();

        let frame = view.toggle_group("B").unwrap();
        assert_eq!(frame.keys().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(frame.get("B").unwrap(), &b_before);
        assert_eq!(frame.domain, Some(Domain { min: 70.0, max: 70.0 }));
        assert_eq!(frame.trace_id, trace_id);

        let frame = view.toggle_group("B").unwrap();
        assert_eq!(frame.series.len(), 2);

        let snapshot = metrics.snapshot().unwrap();
        assert_eq!(snapshot.visibility_changes, 2);
        assert_eq!(snapshot.total_passes, 0);
    }

    #[test]
    fn test_multi_signal_after_narrowing_groups() {
        let mut view = view();
        view.set_active_groups(["A"]).unwrap();
        let frame = view.select_signals(["map", "hr"]).unwrap();
        assert_eq!(frame.keys().collect::<Vec<_>>(), vec!["A | map", "A | hr"]);

        // Widening back to two groups while comparing signals is refused
        let err = view.toggle_group("B").unwrap_err();
        assert!(matches!(err, Error::InvalidSelectionCombination { visible_groups: 2, .. }));
        assert_eq!(view.selection().active_groups().len(), 1);
    }

    #[test]
    fn test_group_by_change_resets_active_groups() {
        let mut view = view();
        view.set_active_groups(["A"]).unwrap();
        let frame = view.set_group_by(GroupAttribute::EmergencyFlag).unwrap();
        assert_eq!(frame.keys().collect::<Vec<_>>(), vec!["0", "1"]);
        assert!(view.selection().active_groups().is_empty());
    }

    #[test]
    fn test_hidden_everything_is_blank() {
        let mut view = view();
        let metrics = MetricsHandler::new();
        view.aggregator().events().register(metrics.clone()).unwrap();

        let frame = view.set_active_groups(["Nope"]).unwrap();
        assert!(frame.is_blank());
        assert!(frame.series.is_empty());
        assert_eq!(metrics.snapshot().unwrap().empty_domains, 1);
    }

    #[test]
    fn test_replace_store() {
        let mut view = view();
        let only_hr = RecordStore::new(vec![
            Record::new("hr", Some(60.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
        ]);
        assert!(view.replace_store(only_hr).is_err());
        assert_eq!(view.store().len(), 5);

        let more = RecordStore::new(vec![
            Record::new("map", Some(100.0), 1.0).with_attribute(GroupAttribute::ProcedureType, "C"),
        ]);
        let frame = view.replace_store(more).unwrap();
        assert_eq!(frame.keys().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(view.refresh().unwrap().domain, Some(Domain { min: 100.0, max: 100.0 }));
    }
}
