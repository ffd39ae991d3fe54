//! Shapes shared by the reports.

use indexmap::IndexMap;
use serde::Serialize;

/// A result for a single-table source, or one per table keyed by name.
///
/// Serializes transparently: the single form is the inner value, the keyed
/// form is a map of table name to value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Keyed<T> {
    Single(T),
    Tables(IndexMap<String, T>),
}

impl<T> Keyed<T> {
    /// The single result, or the first table's.
    pub fn first(&self) -> Option<&T> {
        match self {
            Keyed::Single(value) => Some(value),
            Keyed::Tables(tables) => tables.values().next(),
        }
    }

    /// Look up one table's result. A single result answers to any name.
    pub fn get(&self, table: &str) -> Option<&T> {
        match self {
            Keyed::Single(value) => Some(value),
            Keyed::Tables(tables) => tables.get(table),
        }
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Keyed::Tables(_))
    }

    /// Iterate as (table name, value); the single form has no name.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Option<&str>, &T)> + '_> {
        match self {
            Keyed::Single(value) => Box::new(std::iter::once((None, value))),
            Keyed::Tables(tables) => {
                Box::new(tables.iter().map(|(name, value)| (Some(name.as_str()), value)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_transparently() {
        let single: Keyed<u32> = Keyed::Single(3);
        assert_eq!(serde_json::to_string(&single).unwrap(), "3");

        let mut tables = IndexMap::new();
        tables.insert("users".to_string(), 1u32);
        tables.insert("orders".to_string(), 2u32);
        let keyed = Keyed::Tables(tables);
        assert_eq!(
            serde_json::to_string(&keyed).unwrap(),
            r#"{"users":1,"orders":2}"#
        );
        assert_eq!(keyed.first(), Some(&1));
        assert_eq!(keyed.get("orders"), Some(&2));
        assert_eq!(keyed.iter().count(), 2);
    }
}
