//! Common test utilities for vitaltrend-polars tests

use polars::prelude::*;

/// Long-layout export with two procedure types and one derived column
pub fn create_export_df() -> DataFrame {
    df![
        "signal" => ["map", "map", "map", "hr", "map"],
        "value" => ["80", "90", "n/a", "60", "70"],
        "norm_time" => [Some(0.0), Some(0.01), Some(0.2), Some(0.0), None],
        "optype" => [Some("Vascular"), Some("Vascular"), Some("Ortho"), Some("Vascular"), None],
        "emop" => [0i32, 0, 1, 0, 1],
        "stability" => [0.9, 0.8, 0.7, 0.6, 0.5],
    ]
    .unwrap()
}
