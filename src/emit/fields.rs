use log::debug;
use std::collections::HashSet;

use super::naming::{accessor_name, field_name};
use super::profile::{LanguageProfile, SemanticKind};
use crate::schema::{ColumnDefinition, TableSchema};

/// Names produced by splitting table-level constraint clauses
const CONSTRAINT_KEYWORDS: &[&str] = &["foreign", "primary"];

/// A column ready for rendering
#[derive(Debug, Clone)]
pub struct FieldSpec<'a> {
    pub column: &'a ColumnDefinition,
    /// camelCase member name
    pub name: String,
    /// PascalCase suffix for getters and setters
    pub accessor: String,
    pub kind: SemanticKind,
}

impl<'a> FieldSpec<'a> {
    pub fn new(column: &'a ColumnDefinition) -> Self {
        Self {
            column,
            name: field_name(&column.name),
            accessor: accessor_name(&column.name),
            kind: SemanticKind::from_declared(&column.declared_type),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.column.qualifier.is_primary_key()
    }

    pub fn is_not_null(&self) -> bool {
        self.column.qualifier.is_not_null()
    }

    pub fn type_name(&self, profile: &LanguageProfile) -> &'static str {
        profile.type_name(self.kind)
    }

    /// Not-null annotation for this field in the given language
    pub fn not_null_annotation(&self, profile: &LanguageProfile) -> Option<&'static str> {
        if self.is_not_null() {
            profile.not_null_for(self.kind)
        } else {
            None
        }
    }

    /// Annotation lines followed by the declaration line
    pub fn declaration_lines(&self, profile: &LanguageProfile) -> Vec<String> {
        let mut lines = Vec::new();

        if self.is_primary_key() {
            lines.extend(profile.primary_key_annotation.map(str::to_string));
        } else {
            lines.extend(self.not_null_annotation(profile).map(str::to_string));
            lines.extend(profile.column_annotation_for(&self.column.name));
        }

        lines.push(profile.declare_field(self.kind, &self.name));
        lines
    }
}

/// Fields of a table in declaration order, skipping repeated column names and
/// the pseudo-columns left over from `PRIMARY KEY (...)` / `FOREIGN KEY (...)`
pub fn fields_for(table: &TableSchema) -> Vec<FieldSpec<'_>> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for column in &table.columns {
        let lower = column.name.to_lowercase();
        if CONSTRAINT_KEYWORDS.contains(&lower.as_str()) {
            debug!("{}: skipping constraint clause {}", table.entity_name, column.name);
            continue;
        }
        if !seen.insert(column.name.as_str()) {
            debug!("{}: skipping repeated column {}", table.entity_name, column.name);
            continue;
        }
        fields.push(FieldSpec::new(column));
    }

    fields
}
