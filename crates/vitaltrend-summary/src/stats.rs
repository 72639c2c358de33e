//! Reduction of one bucket's values to summary statistics

use crate::moments::{finite_mean, spread, SpreadNormalization};
use serde::{Deserialize, Serialize};

/// Statistics for one non-empty bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Number of finite values that contributed
    pub count: usize,
    pub mean: f64,
    /// `None` when fewer than two values contributed or the deviation
    /// exceeds the `f64` range
    pub sd: Option<f64>,
    /// First contributing value in input order
    pub sample_value: f64,
}

impl BucketStats {
    /// Reduce values (in input order) to bucket statistics
    ///
    /// Non-finite values are skipped. Returns `None` when nothing is left,
    /// so an all-missing bucket is dropped rather than reported with a NaN
    /// mean.
    pub fn from_values<I>(values: I, normalization: SpreadNormalization) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let sample_value = *finite.first()?;
        let count = finite.len();
        let mean = finite_mean(&finite);

        Some(Self {
            count,
            mean,
            sd: spread(&finite, mean, normalization),
            sample_value,
        })
    }

    /// Spread with an undefined deviation read as zero
    pub fn sd_or_zero(&self) -> f64 {
        self.sd.unwrap_or(0.0)
    }

    /// `mean - sd` and `mean + sd`
    pub fn band(&self) -> (f64, f64) {
        let sd = self.sd_or_zero();
        (self.mean - sd, self.mean + sd)
    }
}

/// Reduces a bucket's values with a fixed normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsAggregator {
    normalization: SpreadNormalization,
}

impl StatisticsAggregator {
    pub fn new(normalization: SpreadNormalization) -> Self {
        Self { normalization }
    }

    pub fn normalization(&self) -> SpreadNormalization {
        self.normalization
    }

    pub fn reduce<I>(&self, values: I) -> Option<BucketStats>
    where
        I: IntoIterator<Item = f64>,
    {
        BucketStats::from_values(values, self.normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_value_has_no_sd() {
        let stats = StatisticsAggregator::default().reduce([80.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 80.0);
        assert_eq!(stats.sd, None);
        assert_eq!(stats.sample_value, 80.0);
        assert_eq!(stats.band(), (80.0, 80.0));
    }

    #[test]
    fn test_all_missing_bucket_is_dropped() {
        let aggregator = StatisticsAggregator::default();
        assert_eq!(aggregator.reduce([f64::NAN, f64::INFINITY]), None);
        assert_eq!(aggregator.reduce(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_sample_value_is_first_finite() {
        let stats = StatisticsAggregator::default()
            .reduce([f64::NAN, 12.0, 10.0, 14.0])
            .unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.sample_value, 12.0);
        assert_relative_eq!(stats.mean, 12.0);
        assert_relative_eq!(stats.sd.unwrap(), 2.0);
        assert_eq!(stats.band(), (10.0, 14.0));
    }

    #[test]
    fn test_population_normalization() {
        let stats = StatisticsAggregator::new(SpreadNormalization::Population)
            .reduce([10.0, 14.0])
            .unwrap();
        assert_relative_eq!(stats.sd.unwrap(), 2.0);
    }

    #[test]
    fn test_extreme_values_keep_finite_band() {
        let stats = StatisticsAggregator::default().reduce([1e308, 1e308]).unwrap();
        assert_eq!(stats.mean, 1e308);
        assert_eq!(stats.sd, Some(0.0));
        assert_eq!(stats.band(), (1e308, 1e308));
    }

    #[test]
    fn test_matches_free_functions() {
        let values = [71.5, f64::NAN, 80.25, 77.0, 92.125];
        for normalization in [SpreadNormalization::Sample, SpreadNormalization::Population] {
            let stats = BucketStats::from_values(values, normalization).unwrap();
            assert_eq!(Some(stats.mean), crate::moments::mean(&values));
            assert_eq!(stats.sd, crate::moments::std_dev(&values, normalization));
        }
    }
}
