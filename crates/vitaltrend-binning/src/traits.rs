//! Core trait for assigning normalized times to buckets

use crate::types::{Bucket, BucketBounds, BucketIndex, Bucketed};
use std::collections::BTreeMap;

/// Maps a normalized time in [0, 1] to exactly one bucket
///
/// One binner instance is shared by every group and signal of a pass, so
/// bucket boundaries line up point-for-point across series.
pub trait Binner {
    /// Bucket for `norm_time`, or `None` when it is outside [0, 1] or not finite
    fn bucket_of(&self, norm_time: f64) -> Option<BucketIndex>;

    /// Interval covered by a bucket
    fn bounds(&self, index: BucketIndex) -> BucketBounds;

    /// Time used for the bucket's summary point
    fn representative_time(&self, index: BucketIndex) -> f64;

    /// Number of buckets spanning [0, 1]
    fn bucket_count(&self) -> usize;

    /// Assign items to buckets, keeping input order inside each bucket
    ///
    /// Empty buckets are never produced.
    fn bucketize<T, I, F>(&self, items: I, time_of: F) -> Bucketed<T>
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> f64,
    {
        let mut grouped: BTreeMap<BucketIndex, Vec<T>> = BTreeMap::new();
        let mut skipped = 0;

        for item in items {
            match self.bucket_of(time_of(&item)) {
                Some(index) => grouped.entry(index).or_default().push(item),
                None => skipped += 1,
            }
        }

        let buckets = grouped
            .into_iter()
            .map(|(index, members)| Bucket {
                index,
                bounds: self.bounds(index),
                time: self.representative_time(index),
                members,
            })
            .collect();

        Bucketed { buckets, skipped }
    }
}

/// Whether `t` is a usable normalized time
pub(crate) fn in_unit_interval(t: f64) -> bool {
    t.is_finite() && (0.0..=1.0).contains(&t)
}
