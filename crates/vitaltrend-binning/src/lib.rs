//! Normalized-time bucketing for trend aggregation
//!
//! Every record in a pass carries a normalized time in `[0, 1]`. This crate
//! decides which bucket that time belongs to and which time represents the
//! bucket on the output axis.
//!
//! # Policies
//!
//! - [`FixedWidth`]: `round(t / width)` with halves rounding up; buckets are
//!   represented by their center `index * width`.
//! - [`FixedCount`]: `N` half-open intervals `[i/N, (i+1)/N)` with the last
//!   one closed; buckets are represented by their midpoint.
//!
//! Both implement [`Binner`], and [`BinningPolicy`] selects between them at
//! runtime (and from configuration).
//!
//! # Example
//!
//! ```rust
//! use vitaltrend_binning::{Binner, FixedWidth};
//!
//! let binner = FixedWidth::new(0.01).unwrap();
//! let times = vec![0.0, 0.004, 0.005, 0.011];
//! let bucketed = binner.bucketize(times, |t| *t);
//!
//! let centers: Vec<f64> = bucketed.buckets.iter().map(|b| b.time).collect();
//! assert_eq!(centers, vec![0.0, 0.01]);
//! assert_eq!(bucketed.buckets[0].members, vec![0.0, 0.004]);
//! ```

pub mod policies;
pub mod traits;
pub mod types;

pub use policies::{BinningPolicy, FixedCount, FixedWidth, MAX_BUCKETS, MIN_WIDTH};
pub use traits::Binner;
pub use types::{Bucket, BucketBounds, BucketIndex, Bucketed};

pub use vitaltrend_core::Result;
