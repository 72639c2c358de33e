//! Bucketing policies

use crate::traits::{in_unit_interval, Binner};
use crate::types::{BucketBounds, BucketIndex};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use vitaltrend_core::{Error, Result};

/// Resolution that quotients and bucket times are snapped to
///
/// Absorbs binary representation noise so decimal ties such as
/// `0.005 / 0.01` land exactly on `.5`.
const SNAP: f64 = 1e9;

/// Smallest accepted bucket width; keeps snapped centers distinct
pub const MIN_WIDTH: f64 = 1e-6;

/// Largest accepted bucket count, the fixed-count twin of [`MIN_WIDTH`]
pub const MAX_BUCKETS: usize = 1_000_000;

fn snap(x: f64) -> f64 {
    (x * SNAP).round() / SNAP
}

/// Round-to-width bucketing
///
/// Bucket index is `round(norm_time / width)` with halves rounding up, and
/// the bucket is represented by its center `index * width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedWidth {
    width: f64,
}

impl FixedWidth {
    /// Create a fixed-width policy; `width` must lie in [MIN_WIDTH, 1]
    pub fn new(width: f64) -> Result<Self> {
        if !width.is_finite() || !(MIN_WIDTH..=1.0).contains(&width) {
            return Err(Error::InvalidParameter(format!(
                "Bucket width {width} must be in [{MIN_WIDTH}, 1]"
            )));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn round_half_up(x: f64) -> usize {
        (snap(x) + 0.5).floor().to_usize().unwrap_or(0)
    }
}

impl Binner for FixedWidth {
    fn bucket_of(&self, norm_time: f64) -> Option<BucketIndex> {
        if !in_unit_interval(norm_time) {
            return None;
        }
        Some(BucketIndex(Self::round_half_up(norm_time / self.width)))
    }

    fn bounds(&self, index: BucketIndex) -> BucketBounds {
        let center = self.representative_time(index);
        let half = self.width / 2.0;
        BucketBounds::new(
            (center - half).max(0.0),
            (center + half).min(1.0),
            index.0 + 1 == self.bucket_count(),
        )
    }

    fn representative_time(&self, index: BucketIndex) -> f64 {
        snap(index.0 as f64 * self.width)
    }

    fn bucket_count(&self) -> usize {
        Self::round_half_up(1.0 / self.width) + 1
    }
}

/// Equal-count partition of [0, 1]
///
/// Bucket `i` covers `[i/N, (i+1)/N)`, the last one closed on the right so
/// `norm_time == 1` is kept. Buckets are represented by their midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCount {
    buckets: usize,
}

impl FixedCount {
    /// Create a fixed-count policy with `1..=MAX_BUCKETS` buckets
    pub fn new(buckets: usize) -> Result<Self> {
        if buckets == 0 {
            return Err(Error::InvalidParameter(
                "Bucket count must be at least 1".to_string(),
            ));
        }
        if buckets > MAX_BUCKETS {
            return Err(Error::InvalidParameter(format!(
                "Bucket count {buckets} must be at most {MAX_BUCKETS}"
            )));
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }
}

impl Binner for FixedCount {
    fn bucket_of(&self, norm_time: f64) -> Option<BucketIndex> {
        if !in_unit_interval(norm_time) {
            return None;
        }
        let n = self.buckets as f64;
        let mut raw = (norm_time * n).floor().to_usize().unwrap_or(0);
        // Keep the index consistent with the edges `i / n` reported by `bounds`
        if raw > 0 && norm_time < raw as f64 / n {
            raw -= 1;
        } else if norm_time >= (raw + 1) as f64 / n {
            raw += 1;
        }
        Some(BucketIndex(raw.min(self.buckets - 1)))
    }

    fn bounds(&self, index: BucketIndex) -> BucketBounds {
        let n = self.buckets as f64;
        BucketBounds::new(
            index.0 as f64 / n,
            (index.0 + 1) as f64 / n,
            index.0 + 1 == self.buckets,
        )
    }

    fn representative_time(&self, index: BucketIndex) -> f64 {
        (index.0 as f64 + 0.5) / self.buckets as f64
    }

    fn bucket_count(&self) -> usize {
        self.buckets
    }
}

/// Either bucketing policy, selectable from configuration
///
/// ```rust
/// use vitaltrend_binning::{Binner, BinningPolicy, BucketIndex};
///
/// let policy: BinningPolicy = serde_json::from_str(r#"{"policy": "fixed_count", "buckets": 4}"#).unwrap();
/// assert_eq!(policy.bucket_of(1.0), Some(BucketIndex(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BinningPolicy {
    FixedWidth(FixedWidth),
    FixedCount(FixedCount),
}

impl BinningPolicy {
    pub fn fixed_width(width: f64) -> Result<Self> {
        FixedWidth::new(width).map(Self::FixedWidth)
    }

    pub fn fixed_count(buckets: usize) -> Result<Self> {
        FixedCount::new(buckets).map(Self::FixedCount)
    }

    /// Re-check parameters, e.g. after deserialization
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::FixedWidth(p) => FixedWidth::new(p.width).map(|_| ()),
            Self::FixedCount(p) => FixedCount::new(p.buckets).map(|_| ()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedWidth(_) => "fixed_width",
            Self::FixedCount(_) => "fixed_count",
        }
    }
}

impl Default for BinningPolicy {
    fn default() -> Self {
        Self::FixedWidth(FixedWidth { width: 0.01 })
    }
}

impl Binner for BinningPolicy {
    fn bucket_of(&self, norm_time: f64) -> Option<BucketIndex> {
        match self {
            Self::FixedWidth(p) => p.bucket_of(norm_time),
            Self::FixedCount(p) => p.bucket_of(norm_time),
        }
    }

    fn bounds(&self, index: BucketIndex) -> BucketBounds {
        match self {
            Self::FixedWidth(p) => p.bounds(index),
            Self::FixedCount(p) => p.bounds(index),
        }
    }

    fn representative_time(&self, index: BucketIndex) -> f64 {
        match self {
            Self::FixedWidth(p) => p.representative_time(index),
            Self::FixedCount(p) => p.representative_time(index),
        }
    }

    fn bucket_count(&self) -> usize {
        match self {
            Self::FixedWidth(p) => p.bucket_count(),
            Self::FixedCount(p) => p.bucket_count(),
        }
    }
}
