use anyhow::{bail, Context, Result};
use schema_to_models::{
    cli::{Cli, Commands},
    config::Settings,
    emit::{DartEmitter, EmitContext, Emitter},
    parser::parse_file,
    schema::SchemaCollection,
    writer::generate,
};
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose, cli.quiet);

    let file_settings = Settings::load(cli.config.as_deref())?;
    let config = cli.command.settings().or(file_settings).resolve();
    let schema_path = &cli.command.schema().dir;

    let tables = parse_file(schema_path, &config.parse_options())
        .with_context(|| format!("Failed to parse schema {:?}", schema_path))?;

    match &cli.command {
        Commands::Room { .. } => {
            run_generator(&config.room_emitter(), &tables, schema_path, &config.output_dir)?;
        }

        Commands::Dart { .. } => {
            run_generator(&DartEmitter::new(), &tables, schema_path, &config.output_dir)?;
        }

        Commands::Inspect { .. } => {
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
    }

    Ok(())
}

fn run_generator(
    emitter: &dyn Emitter,
    tables: &SchemaCollection,
    schema_path: &Path,
    output_dir: &Path,
) -> Result<()> {
    if tables.is_empty() {
        bail!("No CREATE TABLE statements found in {:?}", schema_path);
    }

    let start = Instant::now();
    let written = generate(emitter, tables, output_dir, &EmitContext::now())?;

    println!(
        "\nGenerated {} files for {} tables in {:?} ({:.1}s)",
        written.len(),
        tables.len(),
        output_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
