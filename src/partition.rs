//! Splitting filtered records into groups

use std::collections::HashMap;
use vitaltrend_core::{GroupAttribute, Record};

/// Records sharing one value of the grouping attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub key: String,
    /// Members in input order
    pub records: Vec<&'a Record>,
}

/// Groups in first-encountered key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition<'a> {
    pub groups: Vec<Group<'a>>,
    /// Records dropped because they carry no value for the attribute
    pub missing_attribute: usize,
}

impl<'a> Partition<'a> {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Group<'a>> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partitions records by one grouping attribute
///
/// The attribute value is used as an opaque key; group order is the order
/// in which keys are first seen and becomes the series/legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPartitioner {
    attribute: GroupAttribute,
}

impl GroupPartitioner {
    pub fn new(attribute: GroupAttribute) -> Self {
        Self { attribute }
    }

    pub fn attribute(&self) -> GroupAttribute {
        self.attribute
    }

    pub fn partition<'a, I>(&self, records: I) -> Partition<'a>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut partition = Partition::default();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();

        for record in records {
            let Some(key) = record.attribute(self.attribute) else {
                partition.missing_attribute += 1;
                continue;
            };

            let idx = *positions.entry(key).or_insert_with(|| {
                partition.groups.push(Group {
                    key: key.to_string(),
                    records: Vec::new(),
                });
                partition.groups.len() - 1
            });
            partition.groups[idx].records.push(record);
        }

        partition
    }
}
