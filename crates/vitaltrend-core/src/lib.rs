//! Core types for normalized-time trend aggregation
//!
//! This crate holds everything the aggregation engine consumes but does not
//! compute: the typed [`Record`]s and their immutable [`RecordStore`], the
//! explicit [`SelectionState`] with its validation rules, the shared
//! [`Error`] type, and the pass context/event plumbing used to observe
//! aggregation passes.
//!
//! # Example
//!
//! ```rust
//! use vitaltrend_core::{GroupAttribute, Record, RecordStore, SelectionState};
//!
//! let store: RecordStore = vec![
//!     Record::new("MAP", Some(80.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "A"),
//!     Record::new("HR", Some(64.0), 0.0).with_attribute(GroupAttribute::ProcedureType, "B"),
//! ]
//! .into();
//!
//! // Comparing two signals needs a single visible group
//! let selection = SelectionState::new("map", GroupAttribute::ProcedureType).with_signals(["map", "hr"]);
//! assert!(selection.validate(&store).is_err());
//! assert!(selection.with_active_groups(["A"]).validate(&store).is_ok());
//! ```

pub mod error;
pub mod pass;
pub mod record;
pub mod selection;

pub use error::{Error, Result};
pub use pass::{EventBus, EventHandler, PassContext, PassEvent, SkipReason};
pub use record::{canonical_signal, GroupAttribute, Record, RecordStore};
pub use selection::SelectionState;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
