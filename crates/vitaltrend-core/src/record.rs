//! Typed observations and the immutable record store

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Canonical form of a signal name: trimmed and lower-cased
pub fn canonical_signal(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Categorical attributes a record set can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAttribute {
    /// Procedure type ("optype")
    ProcedureType,
    /// Emergency flag ("emop")
    EmergencyFlag,
}

impl GroupAttribute {
    /// Every valid grouping attribute, in selector order
    pub const ALL: [GroupAttribute; 2] = [GroupAttribute::ProcedureType, GroupAttribute::EmergencyFlag];

    /// Column name used by tabular inputs
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::ProcedureType => "optype",
            Self::EmergencyFlag => "emop",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProcedureType => "Surgery Type",
            Self::EmergencyFlag => "Emergency Status",
        }
    }
}

impl fmt::Display for GroupAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for GroupAttribute {
    type Err = Error;

    /// Accepts the column name, the snake_case variant name or the label.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|attr| {
                needle == attr.column_name()
                    || needle == attr.label().to_lowercase()
                    || needle == format!("{attr:?}").to_lowercase()
                    || needle.replace('_', "") == format!("{attr:?}").to_lowercase()
            })
            .ok_or_else(|| Error::UnknownAttribute(s.to_string()))
    }
}

/// A single observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    signal: String,
    value: Option<f64>,
    norm_time: f64,
    attributes: BTreeMap<GroupAttribute, String>,
    derived: BTreeMap<String, f64>,
}

impl Record {
    /// Create a record; the signal name is canonicalized
    pub fn new(signal: &str, value: Option<f64>, norm_time: f64) -> Self {
        Self {
            signal: canonical_signal(signal),
            value,
            norm_time,
            attributes: BTreeMap::new(),
            derived: BTreeMap::new(),
        }
    }

    /// Attach a grouping attribute value
    pub fn with_attribute(mut self, attr: GroupAttribute, value: impl Into<String>) -> Self {
        self.attributes.insert(attr, value.into());
        self
    }

    /// Attach a derived quantity selectable as its own signal
    pub fn with_derived(mut self, name: &str, value: f64) -> Self {
        self.derived.insert(canonical_signal(name), value);
        self
    }

    pub fn signal(&self) -> &str {
        &self.signal
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn norm_time(&self) -> f64 {
        self.norm_time
    }

    /// Value of a grouping attribute, if the record carries one
    pub fn attribute(&self, attr: GroupAttribute) -> Option<&str> {
        self.attributes.get(&attr).map(String::as_str)
    }

    /// Names of the derived quantities on this record
    pub fn derived_names(&self) -> impl Iterator<Item = &str> {
        self.derived.keys().map(String::as_str)
    }

    /// Whether this record contributes to `signal` (canonical name)
    pub fn measures(&self, signal: &str) -> bool {
        self.signal == signal || self.derived.contains_key(signal)
    }

    /// Finite value for `signal` (canonical name)
    ///
    /// Missing, NaN and infinite values all read as `None`.
    pub fn value_for(&self, signal: &str) -> Option<f64> {
        let raw = if self.signal == signal {
            self.value
        } else {
            self.derived.get(signal).copied()
        };
        raw.filter(|v| v.is_finite())
    }
}

/// Immutable, loaded record set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct selectable signals in first-seen order, derived quantities included
    pub fn signals(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for record in &self.records {
            for name in std::iter::once(record.signal()).chain(record.derived_names()) {
                if seen.insert(name) {
                    out.push(name.to_string());
                }
            }
        }
        out
    }

    /// Whether any record measures `signal`
    pub fn has_signal(&self, signal: &str) -> bool {
        let signal = canonical_signal(signal);
        self.records.iter().any(|r| r.measures(&signal))
    }

    /// Distinct values of `attr` in first-seen order
    pub fn group_keys(&self, attr: GroupAttribute) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.attribute(attr))
            .filter(|key| seen.insert(*key))
            .map(str::to_string)
            .collect()
    }

    /// Records measuring any of the given canonical signal names, in input order
    pub fn filter_signals<'a>(&'a self, signals: &'a [String]) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |r| signals.iter().any(|s| r.measures(s)))
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        vec![
            Record::new(" MAP ", Some(80.0), 0.0)
                .with_attribute(GroupAttribute::ProcedureType, "Colorectal")
                .with_derived("Stability Index", 0.4),
            Record::new("hr", Some(70.0), 0.1).with_attribute(GroupAttribute::ProcedureType, "Vascular"),
            Record::new("map", None, 0.2).with_attribute(GroupAttribute::ProcedureType, "Colorectal"),
        ]
        .into()
    }

    #[test]
    fn test_signal_canonicalization() {
        let record = Record::new("  HeartRate ", Some(1.0), 0.5);
        assert_eq!(record.signal(), "heartrate");
        assert!(record.measures("heartrate"));
    }

    #[test]
    fn test_value_for_filters_non_finite() {
        let record = Record::new("map", Some(f64::NAN), 0.0).with_derived("si", f64::INFINITY);
        assert_eq!(record.value_for("map"), None);
        assert_eq!(record.value_for("si"), None);

        let record = Record::new("map", Some(72.0), 0.0).with_derived("si", 0.3);
        assert_eq!(record.value_for("map"), Some(72.0));
        assert_eq!(record.value_for("si"), Some(0.3));
        assert_eq!(record.value_for("hr"), None);
    }

    #[test]
    fn test_signals_first_seen_order() {
        assert_eq!(store().signals(), vec!["map", "stability index", "hr"]);
        assert!(store().has_signal("Stability Index"));
        assert!(!store().has_signal("spo2"));
    }

    #[test]
    fn test_group_keys_first_seen_order() {
        let store = store();
        assert_eq!(
            store.group_keys(GroupAttribute::ProcedureType),
            vec!["Colorectal", "Vascular"]
        );
        assert!(store.group_keys(GroupAttribute::EmergencyFlag).is_empty());
    }

    #[test]
    fn test_filter_keeps_missing_values() {
        let store = store();
        let signals = vec!["map".to_string()];
        // The record with a missing value stays in the filtered view
        assert_eq!(store.filter_signals(&signals).count(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_group_attribute_parsing() {
        assert_eq!("optype".parse::<GroupAttribute>().unwrap(), GroupAttribute::ProcedureType);
        assert_eq!("Emergency Status".parse::<GroupAttribute>().unwrap(), GroupAttribute::EmergencyFlag);
        assert_eq!("emergency_flag".parse::<GroupAttribute>().unwrap(), GroupAttribute::EmergencyFlag);
        assert!(matches!(
            "asa".parse::<GroupAttribute>(),
            Err(Error::UnknownAttribute(name)) if name == "asa"
        ));
    }
}
