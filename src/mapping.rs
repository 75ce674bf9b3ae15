//! Bidirectional wire ↔ internal property-name maps.
use indexmap::IndexMap;

use crate::schema::Property;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// wire JSON → internal names
    ToInternal,
    /// internal names → wire JSON
    ToWire,
}

/// Where a source key lands and which declared property types it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapped {
    pub target: String,
    pub index: usize,
}

/// Keyed by wire name for [`Direction::ToInternal`], by internal name for [`Direction::ToWire`].
/// Iteration follows property declaration order.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: IndexMap<String, Mapped>,
}

impl Direction {
    pub fn source_name(self, property: &Property) -> &str {
        match self {
            Direction::ToInternal => &property.wire_name,
            Direction::ToWire => &property.internal_name,
        }
    }

    pub fn target_name(self, property: &Property) -> &str {
        match self {
            Direction::ToInternal => &property.internal_name,
            Direction::ToWire => &property.wire_name,
        }
    }
}

impl PropertyMap {
    pub fn build(properties: &[Property], direction: Direction) -> Self {
        let entries = properties
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let mapped = Mapped { target: direction.target_name(p).to_string(), index };
                (direction.source_name(p).to_string(), mapped)
            })
            .collect();
        PropertyMap { entries }
    }

    pub fn get(&self, source: &str) -> Option<&Mapped> {
        self.entries.get(source)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mapped)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
