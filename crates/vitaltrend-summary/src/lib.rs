//! Per-bucket summary statistics
//!
//! Reduces the values that fell into one time bucket to a count, an
//! arithmetic mean, a standard deviation and one representative raw value.
//!
//! | Statistic | Defined when | Notes |
//! |-----------|--------------|-------|
//! | count | always | finite values only |
//! | mean | count ≥ 1 | |
//! | sd | count ≥ 2 | sample (`n - 1`) by default |
//! | sample_value | count ≥ 1 | first value in input order |
//!
//! A bucket without a single finite value produces no statistics at all.
//!
//! # Example
//!
//! ```rust
//! use vitaltrend_summary::{StatisticsAggregator, SpreadNormalization};
//!
//! let aggregator = StatisticsAggregator::new(SpreadNormalization::Sample);
//! let stats = aggregator.reduce([10.0, 14.0, f64::NAN]).unwrap();
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.mean, 12.0);
//! assert_eq!(stats.sample_value, 10.0);
//!
//! // A lone value has no spread
//! assert_eq!(aggregator.reduce([7.0]).unwrap().sd, None);
//! ```

pub mod moments;
pub mod stats;

pub use moments::{mean, sample_std_dev, std_dev, SpreadNormalization};
pub use stats::{BucketStats, StatisticsAggregator};
