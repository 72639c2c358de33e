//! Column mapping between a DataFrame and records

use vitaltrend_core::GroupAttribute;

/// Which DataFrame columns feed which record fields
///
/// Defaults match the long export layout: `signal`, `value`, `norm_time`,
/// plus each grouping attribute under its canonical column name
/// (`optype`, `emop`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub signal: String,
    pub value: String,
    pub norm_time: String,
    pub attributes: Vec<(GroupAttribute, String)>,
    /// Numeric columns loaded as derived quantities, named after the column
    pub derived: Vec<String>,
}

impl ColumnMapping {
    pub fn with_signal(mut self, column: impl Into<String>) -> Self {
        self.signal = column.into();
        self
    }

    pub fn with_value(mut self, column: impl Into<String>) -> Self {
        self.value = column.into();
        self
    }

    pub fn with_norm_time(mut self, column: impl Into<String>) -> Self {
        self.norm_time = column.into();
        self
    }

    /// Read `attr` from `column` instead of its default column
    pub fn with_attribute(mut self, attr: GroupAttribute, column: impl Into<String>) -> Self {
        let column = column.into();
        match self.attributes.iter_mut().find(|(a, _)| *a == attr) {
            Some(entry) => entry.1 = column,
            None => self.attributes.push((attr, column)),
        }
        self
    }

    /// Stop reading `attr`
    pub fn without_attribute(mut self, attr: GroupAttribute) -> Self {
        self.attributes.retain(|(a, _)| *a != attr);
        self
    }

    pub fn with_derived(mut self, column: impl Into<String>) -> Self {
        self.derived.push(column.into());
        self
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            signal: "signal".to_string(),
            value: "value".to_string(),
            norm_time: "norm_time".to_string(),
            attributes: GroupAttribute::ALL
                .iter()
                .map(|attr| (*attr, attr.column_name().to_string()))
                .collect(),
            derived: Vec::new(),
        }
    }
}
