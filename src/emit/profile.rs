//! Declarative per-language rendering rules

use serde::Serialize;

/// Semantic type of a column, derived from its declared SQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticKind {
    Integer,
    Real,
    Text,
}

impl SemanticKind {
    /// `integer`/`timestamp` -> Integer, `real` -> Real, anything else -> Text
    pub fn from_declared(declared_type: &str) -> Self {
        let lower = declared_type.to_lowercase();
        if lower.contains("integer") || lower.contains("timestamp") {
            SemanticKind::Integer
        } else if lower.contains("real") {
            SemanticKind::Real
        } else {
            SemanticKind::Text
        }
    }
}

/// Target-language type names for each semantic kind
#[derive(Debug, Clone, Copy)]
pub struct TypeNames {
    pub integer: &'static str,
    pub real: &'static str,
    pub text: &'static str,
}

impl TypeNames {
    pub fn name(&self, kind: SemanticKind) -> &'static str {
        match kind {
            SemanticKind::Integer => self.integer,
            SemanticKind::Real => self.real,
            SemanticKind::Text => self.text,
        }
    }
}

/// Rendering rules for one target language.
///
/// Templates use `{type}`, `{name}` and `{column}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub types: TypeNames,
    pub indent: &'static str,
    /// Field declaration, e.g. `private {type} {name};`
    pub field_template: &'static str,
    /// Annotation placed on the primary key field
    pub primary_key_annotation: Option<&'static str>,
    /// Annotation placed on NOT NULL fields of non-primitive kinds
    pub not_null_annotation: Option<&'static str>,
    /// Column mapping annotation placed on every field except the primary key
    pub column_annotation: Option<&'static str>,
    /// Kinds rendered as primitives, which never take a not-null annotation
    pub primitive_kinds: &'static [SemanticKind],
}

impl LanguageProfile {
    pub fn type_name(&self, kind: SemanticKind) -> &'static str {
        self.types.name(kind)
    }

    pub fn is_primitive(&self, kind: SemanticKind) -> bool {
        self.primitive_kinds.contains(&kind)
    }

    /// Not-null annotation for a field of this kind, if the language wants one
    pub fn not_null_for(&self, kind: SemanticKind) -> Option<&'static str> {
        if self.is_primitive(kind) {
            None
        } else {
            self.not_null_annotation
        }
    }

    pub fn declare_field(&self, kind: SemanticKind, name: &str) -> String {
        self.field_template
            .replace("{type}", self.type_name(kind))
            .replace("{name}", name)
    }

    pub fn column_annotation_for(&self, column: &str) -> Option<String> {
        self.column_annotation
            .map(|template| template.replace("{column}", column))
    }
}

pub static ROOM_JAVA: LanguageProfile = LanguageProfile {
    name: "room",
    types: TypeNames {
        integer: "int",
        real: "double",
        text: "String",
    },
    indent: "    ",
    field_template: "private {type} {name};",
    primary_key_annotation: Some("@PrimaryKey(autoGenerate = true)"),
    not_null_annotation: Some("@NonNull"),
    column_annotation: Some("@ColumnInfo(name = \"{column}\")"),
    primitive_kinds: &[SemanticKind::Integer, SemanticKind::Real],
};

pub static DART_BUILT_VALUE: LanguageProfile = LanguageProfile {
    name: "dart",
    types: TypeNames {
        integer: "int",
        real: "double",
        text: "String",
    },
    indent: "  ",
    field_template: "{type} get {name};",
    primary_key_annotation: None,
    not_null_annotation: None,
    column_annotation: Some("@BuiltValueField(wireName: \"{column}\")"),
    primitive_kinds: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_kind_mapping() {
        assert_eq!(SemanticKind::from_declared("INTEGER"), SemanticKind::Integer);
        assert_eq!(SemanticKind::from_declared("timestamp"), SemanticKind::Integer);
        assert_eq!(SemanticKind::from_declared("REAL"), SemanticKind::Real);
        assert_eq!(SemanticKind::from_declared("TEXT"), SemanticKind::Text);
        assert_eq!(SemanticKind::from_declared("VARCHAR(20)"), SemanticKind::Text);
        // substring match, not a type system
        assert_eq!(SemanticKind::from_declared("INT"), SemanticKind::Text);
    }

    #[test]
    fn test_room_profile() {
        assert_eq!(
            ROOM_JAVA.declare_field(SemanticKind::Real, "price"),
            "private double price;"
        );
        assert_eq!(ROOM_JAVA.not_null_for(SemanticKind::Integer), None);
        assert_eq!(ROOM_JAVA.not_null_for(SemanticKind::Text), Some("@NonNull"));
        assert_eq!(
            ROOM_JAVA.column_annotation_for("first_name").as_deref(),
            Some("@ColumnInfo(name = \"first_name\")")
        );
    }

    #[test]
    fn test_dart_profile() {
        assert_eq!(
            DART_BUILT_VALUE.declare_field(SemanticKind::Text, "title"),
            "String get title;"
        );
        assert_eq!(DART_BUILT_VALUE.not_null_for(SemanticKind::Text), None);
    }
}
