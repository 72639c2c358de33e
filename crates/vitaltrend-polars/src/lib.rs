//! Polars integration for vitaltrend
//!
//! Loads a [`RecordStore`](vitaltrend_core::RecordStore) from an in-memory
//! DataFrame in the long layout (one row per measurement).
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use vitaltrend_polars::{ColumnMapping, RecordStoreExt};
//!
//! let df = df![
//!     "signal" => ["map", "map"],
//!     "value" => [80.0, 90.0],
//!     "norm_time" => [0.0, 0.01],
//!     "optype" => ["A", "A"],
//!     "emop" => ["0", "1"],
//! ]
//! .unwrap();
//!
//! let store = df.to_record_store(&ColumnMapping::default()).unwrap();
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.signals(), vec!["map".to_string()]);
//! ```

mod config;
mod error;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use traits::*;
