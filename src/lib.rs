//! Binned trend summaries of physiological signals over normalized time
//!
//! Turns a flat collection of per-event measurements into one ordered
//! summary series per (group, signal) pair: records are partitioned by a
//! categorical attribute, bucketed on a shared normalized time grid, and
//! reduced to mean ± standard deviation. A domain spanning the visible
//! bands is computed for plotting.
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `vitaltrend-core` | Records, selection state, errors, pass events |
//! | `vitaltrend-binning` | Fixed-width and fixed-count bucketing policies |
//! | `vitaltrend-summary` | Mean and standard deviation reduction |
//! | `vitaltrend-polars` | Loading a record store from a DataFrame |
//!
//! # Example
//!
//! ```rust
//! use vitaltrend::prelude::*;
//!
//! let store = RecordStore::new(vec![
//!     Record::new("map", Some(80.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
//!     Record::new("map", Some(90.0), 0.01).with_attribute(GroupAttribute::ProcedureType, "A"),
//!     Record::new("map", Some(70.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "B"),
//! ]);
//!
//! let selection = SelectionState::new("map", GroupAttribute::ProcedureType);
//! let aggregation = Aggregator::default().aggregate(&store, &selection).unwrap();
//!
//! let a = aggregation.get("A").unwrap();
//! assert_eq!(a.points.len(), 2);
//! assert_eq!(a.points[1].mean, 90.0);
//! assert_eq!(aggregation.domain().unwrap(), Domain { min: 70.0, max: 90.0 });
//! ```

pub mod assemble;
pub mod config;
pub mod domain;
pub mod engine;
pub mod overlay;
pub mod partition;
pub mod view;
pub mod visibility;

pub use assemble::{series_key, SeriesAssembler, SummaryPoint, SummarySeries, KEY_SEPARATOR};
pub use config::AggregationConfig;
pub use domain::{compute_domain, Domain};
pub use engine::{Aggregation, Aggregator};
pub use overlay::{align_markers, EventMarker, OverlayEvent};
pub use partition::{Group, GroupPartitioner, Partition};
pub use view::{Frame, TrendView};
pub use visibility::{filter_visible, is_visible};

pub use vitaltrend_binning::{Binner, BinningPolicy, FixedCount, FixedWidth};
pub use vitaltrend_core::{
    canonical_signal, Error, EventBus, EventHandler, GroupAttribute, PassEvent, Record, RecordStore, Result,
    SelectionState,
};
pub use vitaltrend_summary::{SpreadNormalization, StatisticsAggregator};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AggregationConfig, Aggregation, Aggregator, Domain, EventMarker, Frame, OverlayEvent, SummaryPoint,
        SummarySeries, TrendView,
    };

    pub use vitaltrend_binning::BinningPolicy;
    pub use vitaltrend_core::{Error, GroupAttribute, Record, RecordStore, Result, SelectionState};
    pub use vitaltrend_summary::SpreadNormalization;
}
