use log::{debug, info, warn};
use std::path::Path;

use super::scan::{column_list, normalize, split_fragments, top_level_words, ParenMode};
use crate::error::{Error, Result};
use crate::schema::{
    strip_quotes, ColumnDefinition, Qualifier, SchemaCollection, TableSchema,
    SYNTHETIC_PK_FRAGMENT,
};

/// Knobs controlling how schema text is scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub parens: ParenMode,
    /// Remove SQL comments before lines are joined
    pub strip_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parens: ParenMode::Balanced,
            strip_comments: true,
        }
    }
}

impl ParseOptions {
    /// Greedy parentheses, naive comma split, comments left in place
    pub fn legacy() -> Self {
        Self {
            parens: ParenMode::Greedy,
            strip_comments: false,
        }
    }
}

/// Parse schema text with the default options
pub fn parse(schema_text: &str) -> Result<SchemaCollection> {
    parse_with(schema_text, &ParseOptions::default())
}

/// Parse every `CREATE TABLE` statement in the schema text
pub fn parse_with(schema_text: &str, options: &ParseOptions) -> Result<SchemaCollection> {
    let normalized = normalize(schema_text, options.strip_comments);
    let mut tables = SchemaCollection::new();

    for segment in normalized.split(';') {
        if !segment.to_lowercase().contains("create table") {
            continue;
        }

        let table = parse_statement(segment, options)?;
        debug!(
            "Parsed table {} with {} columns",
            table.entity_name,
            table.columns.len()
        );

        if tables.contains(&table.entity_name) {
            warn!(
                "Table {} is defined more than once, keeping the last definition",
                table.entity_name
            );
        }
        tables.insert(table);
    }

    Ok(tables)
}

/// Read and parse a schema file
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<SchemaCollection> {
    info!("Reading schema from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|source| Error::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with(&text, options)
}

/// Parse a single `CREATE TABLE` segment
pub fn parse_statement(segment: &str, options: &ParseOptions) -> Result<TableSchema> {
    let entity_name = entity_name(segment)?;
    let list = column_list(segment, options.parens)?;
    let columns = split_fragments(list, options.parens)
        .iter()
        .map(|fragment| parse_column(fragment, segment, options.parens))
        .collect::<Result<Vec<_>>>()?;

    let mut table = TableSchema::new(entity_name, columns);
    if table.primary_key().is_none() {
        debug!("Table {} declares no primary key, adding one", table.entity_name);
        let key = parse_column(SYNTHETIC_PK_FRAGMENT, segment, options.parens)?;
        table.columns.push(key);
    }

    Ok(table)
}

/// The table name is the last word before the opening parenthesis
fn entity_name(segment: &str) -> Result<String> {
    let head = match segment.split_once('(') {
        Some((head, _)) => head,
        None => return Err(Error::malformed(segment, "no parenthesized column list")),
    };

    head.split_whitespace()
        .last()
        .map(|token| strip_quotes(token).to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::malformed(segment, "missing table name"))
}

/// Parse one column declaration fragment into a column definition.
///
/// In balanced mode a parameterized type such as `DECIMAL(10, 2)` is read
/// through its closing parenthesis.
fn parse_column(fragment: &str, segment: &str, mode: ParenMode) -> Result<ColumnDefinition> {
    let cleaned = fragment.trim().replace('\t', " ");
    let tokens = match mode {
        ParenMode::Greedy => cleaned.split_whitespace().collect::<Vec<_>>(),
        ParenMode::Balanced => top_level_words(&cleaned),
    };

    match (tokens.first(), tokens.get(1)) {
        (Some(name), Some(declared_type)) => Ok(ColumnDefinition::new(
            strip_quotes(name),
            strip_quotes(declared_type),
            Qualifier::from_declaration(&cleaned),
        )),
        _ => Err(Error::malformed(
            segment,
            format!("column declaration `{}` needs a name and a type", cleaned),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SYNTHETIC_PK_NAME;

    fn columns(tables: &SchemaCollection, name: &str) -> Vec<(String, String, Qualifier)> {
        tables
            .get(name)
            .unwrap()
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.declared_type.clone(), c.qualifier))
            .collect()
    }

    fn col(name: &str, ty: &str, q: Qualifier) -> (String, String, Qualifier) {
        (name.to_string(), ty.to_string(), q)
    }

    #[test]
    fn test_parse_users() {
        let tables =
            parse("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);").unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            columns(&tables, "users"),
            vec![
                col("id", "INTEGER", Qualifier::PrimaryKey),
                col("name", "TEXT", Qualifier::NotNull),
            ]
        );
    }

    #[test]
    fn test_synthetic_primary_key() {
        let tables = parse("CREATE TABLE logs (message TEXT);").unwrap();
        assert_eq!(
            columns(&tables, "logs"),
            vec![
                col("message", "TEXT", Qualifier::None),
                col(SYNTHETIC_PK_NAME, "INTEGER", Qualifier::PrimaryKey),
            ]
        );
        assert!(tables.get("logs").unwrap().has_synthetic_key());
    }

    #[test]
    fn test_non_table_statements_are_ignored() {
        let text = "CREATE INDEX idx_name ON users(name);\n\
                    CREATE TABLE users (id INTEGER PRIMARY KEY);\n\
                    INSERT INTO users VALUES (1);";
        let tables = parse(text).unwrap();
        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["users"]);
    }

    #[test]
    fn test_multiple_tables_keep_column_order() {
        let text = "CREATE TABLE a (z TEXT, y INTEGER PRIMARY KEY, x REAL);\n\
                    CREATE TABLE b (q TEXT);";
        let tables = parse(text).unwrap();
        assert_eq!(tables.len(), 2);

        let names: Vec<_> = tables.get("a").unwrap().columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z", "y", "x"]);
        assert_eq!(tables.get("b").unwrap().columns.len(), 2);
    }

    #[test]
    fn test_column_count_matches_fragments() {
        let with_key = parse("CREATE TABLE t (a INTEGER PRIMARY KEY, b TEXT, c REAL)").unwrap();
        assert_eq!(with_key.get("t").unwrap().columns.len(), 3);

        let without_key = parse("CREATE TABLE t (a INTEGER, b TEXT, c REAL)").unwrap();
        let table = without_key.get("t").unwrap();
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.columns[3].qualifier, Qualifier::PrimaryKey);
    }

    #[test]
    fn test_parameterized_types_stay_whole() {
        let text = "CREATE TABLE product (\n\
                      id INTEGER PRIMARY KEY,\n\
                      price DECIMAL(10, 2) NOT NULL,\n\
                      code VARCHAR(20)\n\
                    );";
        assert_eq!(
            columns(&parse(text).unwrap(), "product"),
            vec![
                col("id", "INTEGER", Qualifier::PrimaryKey),
                col("price", "DECIMAL(10, 2)", Qualifier::NotNull),
                col("code", "VARCHAR(20)", Qualifier::None),
            ]
        );
    }

    #[test]
    fn test_quoted_types_are_unquoted() {
        let text = "CREATE TABLE people (\"id\" \"INTEGER\" PRIMARY KEY, 'name' 'TEXT');";
        let expected = vec![
            col("id", "INTEGER", Qualifier::PrimaryKey),
            col("name", "TEXT", Qualifier::None),
        ];

        assert_eq!(columns(&parse(text).unwrap(), "people"), expected);
        assert_eq!(
            columns(&parse_with(text, &ParseOptions::legacy()).unwrap(), "people"),
            expected
        );
    }

    #[test]
    fn test_primary_key_wins_over_not_null() {
        let tables = parse("CREATE TABLE t (id INTEGER NOT NULL PRIMARY KEY)").unwrap();
        assert_eq!(tables.get("t").unwrap().columns[0].qualifier, Qualifier::PrimaryKey);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "CREATE TABLE a (x TEXT); CREATE TABLE b (id INTEGER PRIMARY KEY)";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }

    #[test]
    fn test_entity_name_forms() {
        let text = "CREATE TABLE IF NOT EXISTS \"orders\" (\n\t`id`\tINTEGER PRIMARY KEY\n);\n\
                    create table items(id integer primary key);";
        let tables = parse(text).unwrap();
        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["orders", "items"]);
        assert_eq!(columns(&tables, "orders")[0], col("id", "INTEGER", Qualifier::PrimaryKey));
    }

    #[test]
    fn test_duplicate_table_last_write_wins() {
        let text = "CREATE TABLE t (a TEXT); CREATE TABLE t (id INTEGER PRIMARY KEY, b TEXT);";
        let tables = parse(text).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            columns(&tables, "t"),
            vec![
                col("id", "INTEGER", Qualifier::PrimaryKey),
                col("b", "TEXT", Qualifier::None),
            ]
        );
    }

    #[test]
    fn test_missing_parentheses_is_an_error() {
        let err = parse("CREATE TABLE broken;").unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_fragment_without_type_is_an_error() {
        let err = parse("CREATE TABLE t (id INTEGER PRIMARY KEY, lonely)").unwrap_err();
        match err {
            Error::MalformedSchema { reason, .. } => assert!(reason.contains("lonely")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_composite_foreign_key_by_mode() {
        let text = "CREATE TABLE link (\n\
                      a INTEGER NOT NULL,\n\
                      b INTEGER NOT NULL,\n\
                      PRIMARY KEY (a, b),\n\
                      FOREIGN KEY (a, b) REFERENCES other(x, y)\n\
                    );";

        let tables = parse(text).unwrap();
        let names: Vec<_> = tables.get("link").unwrap().columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "PRIMARY", "FOREIGN"]);

        let err = parse_with(text, &ParseOptions::legacy()).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_legacy_mode_matches_simple_schemas() {
        let text = "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);\n\
                    CREATE TABLE logs (message TEXT);";
        assert_eq!(
            parse(text).unwrap(),
            parse_with(text, &ParseOptions::legacy()).unwrap()
        );
    }

    #[test]
    fn test_comments_do_not_swallow_columns() {
        let text = "CREATE TABLE notes ( -- user notes\n\
                      id INTEGER PRIMARY KEY, -- rowid alias\n\
                      body TEXT\n\
                    );";
        let tables = parse(text).unwrap();
        let names: Vec<_> = tables.get("notes").unwrap().columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "body"]);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/definitely/not/here.sql"), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }
}
