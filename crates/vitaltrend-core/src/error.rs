//! Error types for trend aggregation
//!
//! Provides a unified error type for all vitaltrend crates.

use thiserror::Error;

/// Core error type for trend aggregation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Several signals were requested while more than one group is visible
    #[error(
        "Invalid selection: comparing {signals} signals requires a single visible group, but {visible_groups} are visible"
    )]
    InvalidSelectionCombination { signals: usize, visible_groups: usize },

    /// No visible series carries a single point
    #[error("Empty domain: no data for this selection")]
    EmptyDomain,

    /// Grouping attribute name not in the enumerated set
    #[error("Unknown grouping attribute: {0}")]
    UnknownAttribute(String),

    /// Signal name absent from the record store
    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an empty signal selection
    pub fn no_signals() -> Self {
        Self::InvalidParameter("at least one signal must be selected".to_string())
    }

    /// True for conditions that are expected during normal interaction
    /// (as opposed to configuration mistakes).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelectionCombination { .. } | Self::EmptyDomain
        )
    }
}
