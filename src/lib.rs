pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod parser;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use parser::{parse, parse_with, ParseOptions};
pub use schema::{ColumnDefinition, Qualifier, SchemaCollection, TableSchema};
