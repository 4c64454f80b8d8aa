use indexmap::IndexMap;
use serde::Serialize;

use super::types::TableSchema;

/// Parsed tables keyed by entity name.
///
/// Inserting an entity name that is already present replaces the earlier table
/// in place, so iteration follows the order in which names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaCollection {
    tables: IndexMap<String, TableSchema>,
}

impl SchemaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, returning the table it replaced (if any)
    pub fn insert(&mut self, table: TableSchema) -> Option<TableSchema> {
        self.tables.insert(table.entity_name.clone(), table)
    }

    pub fn get(&self, entity_name: &str) -> Option<&TableSchema> {
        self.tables.get(entity_name)
    }

    pub fn contains(&self, entity_name: &str) -> bool {
        self.tables.contains_key(entity_name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, TableSchema> {
        self.tables.values()
    }
}

impl<'a> IntoIterator for &'a SchemaCollection {
    type Item = &'a TableSchema;
    type IntoIter = indexmap::map::Values<'a, String, TableSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDefinition, Qualifier};

    fn table(name: &str, column: &str) -> TableSchema {
        TableSchema::new(
            name,
            vec![ColumnDefinition::new(column, "TEXT", Qualifier::None)],
        )
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut tables = SchemaCollection::new();
        assert!(tables.insert(table("a", "first")).is_none());
        tables.insert(table("b", "x"));
        let replaced = tables.insert(table("a", "second"));

        assert_eq!(replaced.map(|t| t.columns[0].name.clone()), Some("first".into()));
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tables.get("a").unwrap().columns[0].name, "second");
    }

    #[test]
    fn test_contains() {
        let mut tables = SchemaCollection::new();
        tables.insert(table("logs", "message"));
        assert!(tables.contains("logs"));
        assert!(!tables.contains("Logs"));
    }

    #[test]
    fn test_serializes_as_map() {
        let mut tables = SchemaCollection::new();
        tables.insert(table("logs", "message"));
        tables.insert(table("audit", "event"));
        let json = serde_json::to_string(&tables).unwrap();
        assert!(json.find("\"logs\"").unwrap() < json.find("\"audit\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["logs"]["columns"][0]["name"], "message");
        assert_eq!(value["logs"]["columns"][0]["qualifier"], "none");
    }
}
