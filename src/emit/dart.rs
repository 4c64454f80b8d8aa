//! Dart `built_value` model generation

use log::debug;

use super::fields::fields_for;
use super::naming::{class_name, instance_name, snake_case};
use super::profile::{LanguageProfile, DART_BUILT_VALUE};
use super::{indent, Artifact, EmitContext, Emitter};
use crate::schema::TableSchema;

#[derive(Debug, Clone, Default)]
pub struct DartEmitter;

impl DartEmitter {
    pub fn new() -> Self {
        Self
    }

    fn model(&self, table: &TableSchema, class: &str, stem: &str, ctx: &EmitContext) -> String {
        let fields = fields_for(table)
            .iter()
            .map(|f| f.declaration_lines(&DART_BUILT_VALUE).join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"import 'package:built_value/built_value.dart';
import 'package:built_value/serializer.dart';

part '{stem}.g.dart';

//
// Created on {date}.
//
abstract class {class} implements Built<{class}, {class}Builder> {{
{fields}

  {class}._();
  static Serializer<{class}> get serializer => _${instance}Serializer;
  factory {class}([updates({class}Builder b)]) = _${class};
}}
"#,
            date = ctx.generated_at,
            fields = indent(&fields, DART_BUILT_VALUE.indent),
            instance = instance_name(class),
        )
    }
}

impl Emitter for DartEmitter {
    fn profile(&self) -> &'static LanguageProfile {
        &DART_BUILT_VALUE
    }

    fn emit_table(&self, table: &TableSchema, ctx: &EmitContext) -> Vec<Artifact> {
        let class = class_name(&table.entity_name);
        let stem = snake_case(&class);
        debug!("Rendering built_value model for {} as {}", table.entity_name, class);

        vec![Artifact::new(
            format!("data/{}.dart", stem),
            self.model(table, &class, &stem, ctx),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_dart_model() {
        let tables = parse(
            "CREATE TABLE blog_post (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                published_at TIMESTAMP,
                rating REAL
            );",
        )
        .unwrap();

        let artifacts = DartEmitter::new().emit_table(
            tables.get("blog_post").unwrap(),
            &EmitContext::at("2024-01-01 00:00:00"),
        );
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path.to_str(), Some("data/blog_post.dart"));

        let model = &artifacts[0].contents;
        assert!(model.contains("part 'blog_post.g.dart';"));
        assert!(model.contains("abstract class BlogPost implements Built<BlogPost, BlogPostBuilder> {"));
        assert!(model.contains("\n  int get id;\n"));
        assert!(!model.contains("wireName: \"id\""));
        assert!(model.contains("  @BuiltValueField(wireName: \"title\")\n  String get title;"));
        assert!(model.contains(
            "  @BuiltValueField(wireName: \"published_at\")\n  int get publishedAt;"
        ));
        assert!(model.contains("  double get rating;"));
        assert!(model.contains("static Serializer<BlogPost> get serializer => _$blogPostSerializer;"));
        assert!(model.contains("factory BlogPost([updates(BlogPostBuilder b)]) = _$BlogPost;"));
    }

    #[test]
    fn test_dart_has_no_shared_files() {
        let tables = parse("CREATE TABLE a (x TEXT)").unwrap();
        let ctx = EmitContext::at("now");
        assert!(DartEmitter::new().emit_shared(&tables, &ctx).is_empty());
    }
}
