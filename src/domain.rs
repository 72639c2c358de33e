//! Value range spanning the visible series

use crate::assemble::SummarySeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use vitaltrend_core::{Error, Result};

/// Closed `[min, max]` range of `mean ± sd` over visible points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest domain covering both
    pub fn union(&self, other: &Domain) -> Domain {
        Domain {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Compute the display domain of the given (visible) series
///
/// Undefined deviations count as zero. Fails with [`Error::EmptyDomain`]
/// when no series has a point, or when a `mean ± sd` band leaves the `f64`
/// range, instead of producing an infinite range.
pub fn compute_domain<'a, I>(series: I) -> Result<Domain>
where
    I: IntoIterator<Item = &'a SummarySeries>,
{
    series
        .into_iter()
        .flat_map(|s| s.points.iter())
        .map(|p| Domain {
            min: p.lower(),
            max: p.upper(),
        })
        .reduce(|acc, d| acc.union(&d))
        .filter(|d| d.min.is_finite() && d.max.is_finite())
        .ok_or(Error::EmptyDomain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::SummaryPoint;

    fn series(group: &str, points: &[(f64, f64, Option<f64>)]) -> SummarySeries {
        SummarySeries {
            key: group.to_string(),
            group: group.to_string(),
            signal: "map".to_string(),
            points: points
                .iter()
                .map(|&(norm_time, mean, sd)| SummaryPoint {
                    norm_time,
                    mean,
                    sd,
                    sample_value: mean,
                    count: 2,
                })
                .collect(),
        }
    }

    #[test]
    fn test_domain_spans_mean_plus_minus_sd() {
        let a = series("A", &[(0.0, 10.0, Some(2.0))]);
        let b = series("B", &[(0.0, 14.0, Some(0.0))]);
        let domain = compute_domain([&a, &b]).unwrap();
        assert_eq!(domain, Domain { min: 8.0, max: 14.0 });
        assert_eq!(domain.span(), 6.0);
        assert!(domain.contains(12.0));
        assert_eq!(domain.to_string(), "[8, 14]");
    }

    #[test]
    fn test_undefined_sd_counts_as_zero() {
        let a = series("A", &[(0.0, 70.0, None), (0.5, 90.0, None)]);
        assert_eq!(compute_domain([&a]).unwrap(), Domain { min: 70.0, max: 90.0 });
    }

    #[test]
    fn test_empty_domain() {
        let empty = series("A", &[]);
        assert!(matches!(compute_domain([&empty]), Err(Error::EmptyDomain)));
        assert!(matches!(compute_domain(Vec::<&SummarySeries>::new()), Err(Error::EmptyDomain)));
    }

    #[test]
    fn test_overflowing_band_is_empty_domain() {
        let a = series("A", &[(0.0, 10.0, Some(1.0)), (0.5, f64::MAX, Some(f64::MAX))]);
        assert!(matches!(compute_domain([&a]), Err(Error::EmptyDomain)));

        let b = series("B", &[(0.0, 1e308, Some(0.0))]);
        assert_eq!(compute_domain([&b]).unwrap(), Domain { min: 1e308, max: 1e308 });
    }
}
