//! Loading record stores from Polars DataFrames

use crate::{ColumnMapping, Error, Result};
use polars::prelude::*;
use vitaltrend_core::{Record, RecordStore};

/// Extension trait turning a DataFrame into a [`RecordStore`]
pub trait RecordStoreExt {
    /// Build a record store, one record per row
    ///
    /// Values that are null or not numeric are read as missing, and a
    /// missing normalized time becomes NaN so the row is dropped at
    /// bucketing. Rows without a signal name are skipped.
    fn to_record_store(&self, mapping: &ColumnMapping) -> Result<RecordStore>;
}

impl RecordStoreExt for DataFrame {
    fn to_record_store(&self, mapping: &ColumnMapping) -> Result<RecordStore> {
        let signals = string_values(self, &mapping.signal)?;
        let values = float_values(self, &mapping.value)?;
        let times = float_values(self, &mapping.norm_time)?;

        let attributes = mapping
            .attributes
            .iter()
            .map(|(attr, column)| Ok((*attr, string_values(self, column)?)))
            .collect::<Result<Vec<_>>>()?;
        let derived = mapping
            .derived
            .iter()
            .map(|column| Ok((column.as_str(), float_values(self, column)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(self.height());
        for (row, signal) in signals.iter().enumerate() {
            let Some(signal) = signal else {
                continue;
            };

            let mut record = Record::new(signal, values[row], times[row].unwrap_or(f64::NAN));
            for (attr, column) in &attributes {
                if let Some(key) = &column[row] {
                    record = record.with_attribute(*attr, key.clone());
                }
            }
            for (name, column) in &derived {
                if let Some(v) = column[row] {
                    record = record.with_derived(name, v);
                }
            }
            records.push(record);
        }

        Ok(RecordStore::new(records))
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Numeric view of a column; unparseable strings become nulls
fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = column(df, name)?;
    let float_column = match column.dtype() {
        DataType::Float64 => column.clone(),
        DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8
        | DataType::String
        | DataType::Null => column.cast(&DataType::Float64)?,
        dt => {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: "numeric".to_string(),
                got: format!("{:?}", dt),
            });
        }
    };

    Ok(float_column.f64()?.into_iter().collect())
}

/// Attribute or signal names as strings; numeric codes are formatted
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = column(df, name)?;
    let string_column = match column.dtype() {
        DataType::String => column.clone(),
        dt if dt.is_nested() => {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: "string or scalar".to_string(),
                got: format!("{:?}", dt),
            });
        }
        _ => column.cast(&DataType::String)?,
    };

    Ok(string_column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
