use serde::Serialize;

/// Name given to the primary key injected into tables that declare none
pub const SYNTHETIC_PK_NAME: &str = "auto_incremented_id_field";

/// Declaration used for the injected primary key fragment
pub const SYNTHETIC_PK_FRAGMENT: &str =
    "\t`auto_incremented_id_field`\tINTEGER PRIMARY KEY AUTOINCREMENT";

/// Column qualifier derived from the column declaration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    #[default]
    None,
    PrimaryKey,
    NotNull,
}

impl Qualifier {
    /// Classify a raw column fragment. `primary key` takes precedence over `not null`.
    pub fn from_declaration(fragment: &str) -> Self {
        let lower = fragment.to_lowercase();
        if lower.contains("primary key") {
            Qualifier::PrimaryKey
        } else if lower.contains("not null") {
            Qualifier::NotNull
        } else {
            Qualifier::None
        }
    }

    pub fn is_primary_key(self) -> bool {
        self == Qualifier::PrimaryKey
    }

    pub fn is_not_null(self) -> bool {
        self == Qualifier::NotNull
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub declared_type: String,
    pub qualifier: Qualifier,
}

impl ColumnDefinition {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        qualifier: Qualifier,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            qualifier,
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub entity_name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    pub fn new(entity_name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            entity_name: entity_name.into(),
            columns,
        }
    }

    /// First column carrying a primary key qualifier
    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.qualifier.is_primary_key())
    }

    pub fn has_synthetic_key(&self) -> bool {
        self.columns.iter().any(|c| c.name == SYNTHETIC_PK_NAME)
    }
}

/// Remove surrounding identifier quotes: backticks, then single quotes, then double quotes
pub fn strip_quotes(text: &str) -> &str {
    text.trim_matches('`').trim_matches('\'').trim_matches('"')
}
