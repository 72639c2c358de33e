//! Aligning timestamped events with the aggregated series

use serde::{Deserialize, Serialize};
use vitaltrend_core::{GroupAttribute, SelectionState};

/// Something that happened to a group over normalized time, e.g. a drug
/// administration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayEvent {
    /// Attribute whose key `group` refers to
    pub attribute: GroupAttribute,
    pub group: String,
    pub label: String,
    pub norm_start: f64,
    #[serde(default)]
    pub duration: f64,
}

impl OverlayEvent {
    pub fn new(attribute: GroupAttribute, group: impl Into<String>, label: impl Into<String>, norm_start: f64) -> Self {
        Self {
            attribute,
            group: group.into(),
            label: label.into(),
            norm_start,
            duration: 0.0,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

/// An event placed on the time axis of one visible series group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    pub group: String,
    pub label: String,
    pub start: f64,
    /// Never past the end of the window
    pub end: f64,
}

impl EventMarker {
    /// Instantaneous events have `start == end`
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }
}

/// Markers for the events matching the selection's grouping and visible groups
///
/// Events starting outside [0, 1] are ignored; negative or non-finite
/// durations are treated as instantaneous. Output is sorted by start time,
/// ties keeping input order.
pub fn align_markers<'a, I>(events: I, selection: &SelectionState) -> Vec<EventMarker>
where
    I: IntoIterator<Item = &'a OverlayEvent>,
{
    let mut markers: Vec<EventMarker> = events
        .into_iter()
        .filter(|e| e.attribute == selection.group_by() && selection.is_visible(&e.group))
        .filter(|e| (0.0..=1.0).contains(&e.norm_start))
        .map(|e| {
            let duration = if e.duration.is_finite() { e.duration.max(0.0) } else { 0.0 };
            EventMarker {
                group: e.group.clone(),
                label: e.label.clone(),
                start: e.norm_start,
                end: (e.norm_start + duration).min(1.0),
            }
        })
        .collect();

    markers.sort_by(|a, b| a.start.total_cmp(&b.start));
    markers
}
