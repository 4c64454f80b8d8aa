//! Rendering of parsed tables into target-language source files.
//!
//! Emitters are pure: they turn a [`TableSchema`] into [`Artifact`]s and never touch
//! the filesystem. Writing is left to [`crate::writer::ArtifactWriter`].

pub mod dart;
pub mod fields;
pub mod naming;
pub mod profile;
pub mod room;

use std::path::PathBuf;

use crate::schema::{SchemaCollection, TableSchema};

pub use dart::DartEmitter;
pub use fields::{fields_for, FieldSpec};
pub use profile::{LanguageProfile, SemanticKind, DART_BUILT_VALUE, ROOM_JAVA};
pub use room::RoomEmitter;

/// A rendered file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Values shared by every artifact of one run
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Timestamp written into the header of generated files
    pub generated_at: String,
}

impl EmitContext {
    pub fn now() -> Self {
        Self::at(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
    }

    pub fn at(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
        }
    }
}

/// Renders tables for one target language
pub trait Emitter {
    fn profile(&self) -> &'static LanguageProfile;

    /// Files generated for a single table
    fn emit_table(&self, table: &TableSchema, ctx: &EmitContext) -> Vec<Artifact>;

    /// Files generated once per run, after every table
    fn emit_shared(&self, _tables: &SchemaCollection, _ctx: &EmitContext) -> Vec<Artifact> {
        Vec::new()
    }
}

/// Prefix every non-empty line with the given indentation
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b");
    }
}
