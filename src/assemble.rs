//! Building ordered summary series from partitioned records

use crate::partition::Partition;
use serde::{Deserialize, Serialize};
use tracing::trace;
use vitaltrend_binning::{Binner, BinningPolicy};
use vitaltrend_core::{PassContext, SkipReason};
use vitaltrend_summary::{BucketStats, StatisticsAggregator};

/// Separator between group and signal in multi-signal series keys
pub const KEY_SEPARATOR: &str = " | ";

/// Key identifying a series
///
/// The bare group key when one signal is selected, otherwise
/// `group + KEY_SEPARATOR + signal`.
pub fn series_key(group: &str, signal: &str, multi_signal: bool) -> String {
    if multi_signal {
        format!("{group}{KEY_SEPARATOR}{signal}")
    } else {
        group.to_string()
    }
}

/// One plotted point: statistics of a non-empty bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    /// Representative time of the bucket
    pub norm_time: f64,
    pub mean: f64,
    /// `None` when fewer than two values contributed
    pub sd: Option<f64>,
    /// First contributing raw value
    pub sample_value: f64,
    pub count: usize,
}

impl SummaryPoint {
    fn new(norm_time: f64, stats: BucketStats) -> Self {
        Self {
            norm_time,
            mean: stats.mean,
            sd: stats.sd,
            sample_value: stats.sample_value,
            count: stats.count,
        }
    }

    pub fn sd_or_zero(&self) -> f64 {
        self.sd.unwrap_or(0.0)
    }

    /// Lower edge of the mean ± sd band
    pub fn lower(&self) -> f64 {
        self.mean - self.sd_or_zero()
    }

    /// Upper edge of the mean ± sd band
    pub fn upper(&self) -> f64 {
        self.mean + self.sd_or_zero()
    }

    /// Standardized position of `sample_value` within its bucket
    ///
    /// Undefined without a positive spread.
    pub fn z_score(&self) -> Option<f64> {
        self.sd
            .filter(|sd| *sd > 0.0)
            .map(|sd| (self.sample_value - self.mean) / sd)
    }
}

/// Ordered summary of one (group, signal) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySeries {
    pub key: String,
    pub group: String,
    pub signal: String,
    /// Strictly ascending by `norm_time`; may be empty
    pub points: Vec<SummaryPoint>,
}

impl SummarySeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Point at a representative time, if that bucket was emitted
    pub fn point_at(&self, norm_time: f64) -> Option<&SummaryPoint> {
        self.points
            .binary_search_by(|p| p.norm_time.total_cmp(&norm_time))
            .ok()
            .map(|i| &self.points[i])
    }
}

/// Bins, reduces and orders every (group, signal) pair of a pass
///
/// A single instance serves a whole pass so every series shares the same
/// bucket boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesAssembler {
    binner: BinningPolicy,
    statistics: StatisticsAggregator,
}

impl SeriesAssembler {
    pub fn new(binner: BinningPolicy, statistics: StatisticsAggregator) -> Self {
        Self { binner, statistics }
    }

    pub fn binner(&self) -> &BinningPolicy {
        &self.binner
    }

    /// One series per group (partition order) and signal (selection order)
    ///
    /// Groups without a single usable value still get an empty series.
    pub fn assemble(
        &self,
        partition: &Partition<'_>,
        signals: &[String],
        context: &mut PassContext,
    ) -> Vec<SummarySeries> {
        let multi_signal = signals.len() > 1;
        let mut out = Vec::with_capacity(partition.len() * signals.len());

        for group in &partition.groups {
            for signal in signals {
                let members = group.records.iter().filter(|r| r.measures(signal));
                let bucketed = self.binner.bucketize(members, |r| r.norm_time());
                for _ in 0..bucketed.skipped {
                    context.skip(SkipReason::OutOfRange);
                }

                let mut points = Vec::with_capacity(bucketed.buckets.len());
                for bucket in bucketed.buckets {
                    let mut values = Vec::with_capacity(bucket.len());
                    for record in &bucket.members {
                        match record.value_for(signal) {
                            Some(v) => values.push(v),
                            None => context.skip(SkipReason::MissingValue),
                        }
                    }

                    match self.statistics.reduce(values) {
                        Some(stats) => points.push(SummaryPoint::new(bucket.time, stats)),
                        None => trace!(group = %group.key, %signal, bucket = %bucket.index, "dropping empty bucket"),
                    }
                }

                out.push(SummarySeries {
                    key: series_key(&group.key, signal, multi_signal),
                    group: group.key.clone(),
                    signal: signal.clone(),
                    points,
                });
            }
        }

        out
    }
}
