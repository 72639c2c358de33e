//! Core types for bucket representation

use std::fmt;

/// Position of a bucket along the normalized-time axis
///
/// Ordering by index is ordering by time for every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketIndex(pub usize);

impl fmt::Display for BucketIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interval of normalized time covered by one bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketBounds {
    /// Left edge (inclusive)
    pub left: f64,
    /// Right edge (exclusive, except for the final bucket)
    pub right: f64,
    /// Whether the right edge belongs to the bucket
    pub closed_right: bool,
}

impl BucketBounds {
    pub fn new(left: f64, right: f64, closed_right: bool) -> Self {
        Self {
            left,
            right,
            closed_right,
        }
    }

    /// Center point of the interval
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a time falls within this bucket
    pub fn contains(&self, t: f64) -> bool {
        t >= self.left && (t < self.right || (self.closed_right && t == self.right))
    }
}

impl fmt::Display for BucketBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.closed_right { ']' } else { ')' };
        write!(f, "[{:.3}, {:.3}{}", self.left, self.right, close)
    }
}

/// One non-empty bucket and its members, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<T> {
    pub index: BucketIndex,
    pub bounds: BucketBounds,
    /// Time representing the bucket on the output axis
    pub time: f64,
    pub members: Vec<T>,
}

impl<T> Bucket<T> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of assigning a batch of items to buckets
#[derive(Debug, Clone, PartialEq)]
pub struct Bucketed<T> {
    /// Non-empty buckets, ascending by index
    pub buckets: Vec<Bucket<T>>,
    /// Items whose time fell outside [0, 1] or was not finite
    pub skipped: usize,
}

impl<T> Bucketed<T> {
    /// Number of items that landed in a bucket
    pub fn total_members(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}
