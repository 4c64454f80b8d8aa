use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "schema-to-models")]
#[command(version, about = "Generate model classes from a SQLite CREATE TABLE schema")]
pub struct Cli {
    /// Config file (default: user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads a schema
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Path to the SQL schema file
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Split column lists from the first '(' to the last ')' on every comma
    #[arg(long)]
    pub legacy_split: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Room entities, DAOs and repositories (Java)
    Room {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Java package of the generated classes
        #[arg(short, long)]
        package: Option<String>,

        /// Database file name
        #[arg(short = 'f', long)]
        dbfile: Option<String>,

        /// Database class name, without the .java extension
        #[arg(short = 'c', long)]
        dbclass: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate built_value models (Dart)
    Dart {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed schema as JSON
    Inspect {
        #[command(flatten)]
        schema: SchemaArgs,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

impl Commands {
    pub fn schema(&self) -> &SchemaArgs {
        match self {
            Commands::Room { schema, .. }
            | Commands::Dart { schema, .. }
            | Commands::Inspect { schema } => schema,
        }
    }

    /// Settings given on the command line, highest priority
    pub fn settings(&self) -> Settings {
        let legacy_split = self.schema().legacy_split.then_some(true);

        match self {
            Commands::Room {
                package,
                dbfile,
                dbclass,
                output,
                ..
            } => Settings {
                package: package.clone(),
                db_file: dbfile.clone(),
                db_class: dbclass.clone(),
                output_dir: output.clone(),
                legacy_split,
                ..Settings::default()
            },
            Commands::Dart { output, .. } => Settings {
                output_dir: output.clone(),
                legacy_split,
                ..Settings::default()
            },
            Commands::Inspect { .. } => Settings {
                legacy_split,
                ..Settings::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_room_flags() {
        let cli = Cli::try_parse_from([
            "schema-to-models",
            "room",
            "--dir",
            "schema.sql",
            "--package",
            "org.demo",
            "-c",
            "DemoDb",
        ])
        .unwrap();

        let settings = cli.command.settings();
        assert_eq!(settings.package.as_deref(), Some("org.demo"));
        assert_eq!(settings.db_class.as_deref(), Some("DemoDb"));
        assert_eq!(settings.db_file, None);
        assert_eq!(settings.legacy_split, None);
        assert_eq!(cli.command.schema().dir, PathBuf::from("schema.sql"));
    }

    #[test]
    fn test_dir_is_required() {
        assert!(Cli::try_parse_from(["schema-to-models", "dart"]).is_err());
    }

    #[test]
    fn test_legacy_split_flag() {
        let cli =
            Cli::try_parse_from(["schema-to-models", "inspect", "-d", "s.sql", "--legacy-split"])
                .unwrap();
        assert_eq!(cli.command.settings().legacy_split, Some(true));
    }
}
