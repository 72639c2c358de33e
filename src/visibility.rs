//! Restricting series to the active-group set

use crate::assemble::SummarySeries;
use std::collections::BTreeSet;

/// Whether a series' group passes the active-group filter
///
/// An empty active set shows everything.
pub fn is_visible(series: &SummarySeries, active_groups: &BTreeSet<String>) -> bool {
    active_groups.is_empty() || active_groups.contains(&series.group)
}

/// Visible subset of `series`, in their original order
///
/// Purely selective: the returned references point at the unfiltered
/// statistics, which are never recomputed or modified.
pub fn filter_visible<'a>(
    series: &'a [SummarySeries],
    active_groups: &BTreeSet<String>,
) -> Vec<&'a SummarySeries> {
    series
        .iter()
        .filter(|s| is_visible(s, active_groups))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(key: &str, group: &str) -> SummarySeries {
        SummarySeries {
            key: key.to_string(),
            group: group.to_string(),
            signal: "map".to_string(),
            points: Vec::new(),
        }
    }

    #[test]
    fn test_empty_active_set_shows_all() {
        let all = vec![series("A", "A"), series("B", "B")];
        assert_eq!(filter_visible(&all, &BTreeSet::new()).len(), 2);
    }

    #[test]
    fn test_filters_on_group_component() {
        let all = vec![
            series("A | map", "A"),
            series("A | hr", "A"),
            series("B | map", "B"),
        ];
        let active: BTreeSet<String> = ["A".to_string()].into();
        let keys: Vec<&str> = filter_visible(&all, &active)
            .into_iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(keys, vec!["A | map", "A | hr"]);
    }

    #[test]
    fn test_unknown_active_group_hides_everything() {
        let all = vec![series("A", "A")];
        let active: BTreeSet<String> = ["Z".to_string()].into();
        assert!(filter_visible(&all, &active).is_empty());
    }
}
