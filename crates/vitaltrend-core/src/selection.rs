//! Selection state and the rules a selection must satisfy before aggregation

use crate::error::{Error, Result};
use crate::record::{canonical_signal, GroupAttribute, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the caller wants aggregated and shown
///
/// Passed explicitly to every aggregation call. An empty `active_groups` set
/// means every group is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct SelectionState {
    signals: Vec<String>,
    group_by: GroupAttribute,
    active_groups: BTreeSet<String>,
}

/// Wire form of a selection; signal names are canonicalized on the way in
#[derive(Deserialize)]
struct RawSelection {
    signals: Vec<String>,
    group_by: GroupAttribute,
    #[serde(default)]
    active_groups: BTreeSet<String>,
}

impl From<RawSelection> for SelectionState {
    fn from(raw: RawSelection) -> Self {
        SelectionState {
            signals: Vec::new(),
            group_by: raw.group_by,
            active_groups: raw.active_groups,
        }
        .with_signals(raw.signals)
    }
}

impl SelectionState {
    /// Select a single signal, all groups visible
    pub fn new(signal: &str, group_by: GroupAttribute) -> Self {
        Self {
            signals: vec![canonical_signal(signal)],
            group_by,
            active_groups: BTreeSet::new(),
        }
    }

    /// Replace the selected signals; duplicates are collapsed keeping first position
    pub fn with_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.signals.clear();
        for signal in signals {
            let signal = canonical_signal(signal.as_ref());
            if !self.signals.contains(&signal) {
                self.signals.push(signal);
            }
        }
        self
    }

    pub fn with_group_by(mut self, group_by: GroupAttribute) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_active_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical signal names, in selection order
    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    pub fn group_by(&self) -> GroupAttribute {
        self.group_by
    }

    pub fn active_groups(&self) -> &BTreeSet<String> {
        &self.active_groups
    }

    /// Whether more than one signal is compared at once
    pub fn is_multi_signal(&self) -> bool {
        self.signals.len() > 1
    }

    /// Flip one group in or out of the active set
    pub fn toggle_group(&mut self, group: &str) {
        if !self.active_groups.remove(group) {
            self.active_groups.insert(group.to_string());
        }
    }

    /// Whether a group key passes the active-group filter
    pub fn is_visible(&self, group: &str) -> bool {
        self.active_groups.is_empty() || self.active_groups.contains(group)
    }

    /// Number of groups this selection shows for `store`
    pub fn visible_group_count(&self, store: &RecordStore) -> usize {
        if self.active_groups.is_empty() {
            store.group_keys(self.group_by).len()
        } else {
            self.active_groups.len()
        }
    }

    /// Check this selection against a store
    ///
    /// Multi-signal comparison is only allowed while at most one group is
    /// visible. Unknown signals are configuration errors.
    pub fn validate(&self, store: &RecordStore) -> Result<()> {
        if self.signals.is_empty() {
            return Err(Error::no_signals());
        }

        if let Some(unknown) = self.signals.iter().find(|s| !store.has_signal(s)) {
            return Err(Error::UnknownSignal(unknown.clone()));
        }

        if self.is_multi_signal() {
            let visible_groups = self.visible_group_count(store);
            if visible_groups > 1 {
                return Err(Error::InvalidSelectionCombination {
                    signals: self.signals.len(),
                    visible_groups,
                });
            }
        }

        Ok(())
    }
}
