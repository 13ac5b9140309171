use crate::{
    commands::{Commands, DialectKind},
    error::CliError,
    output::ConversionReport,
};
use clap::Parser;
use filter_compiler::{Config, Converter};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "celsql",
    version = "0.1.0",
    about = "Convert filter expressions into parameterized SQL predicates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            config,
            expr,
            roles,
            dialect,
            json,
            output,
        } => convert(&config, &expr, &roles, dialect, json, output)?,
        Commands::Fields { config } => {
            let config = Config::from_file(&config)?;
            print_fields(&config);
        }
    }

    Ok(())
}

fn convert(
    config_path: &str,
    expr: &str,
    roles: &[String],
    dialect: DialectKind,
    as_json: bool,
    output: Option<String>,
) -> Result<(), CliError> {
    let config = Config::from_file(config_path)?;
    let converter = Converter::new(config)?;
    info!(config = config_path, dialect = ?dialect, "converting filter expression");

    let conversion = if roles.is_empty() {
        converter.convert(expr)?
    } else {
        converter.convert_with_auth(expr, roles)?
    };
    let report = ConversionReport::new(&conversion, dialect.dialect());

    match output {
        Some(path) => output::write_report(&report, &path)?,
        None if as_json => output::print_json(&report)?,
        None => output::print_plain(&report),
    }
    Ok(())
}

fn print_fields(config: &Config) {
    println!("{:<24} {:<24} {}", "Field", "Type", "Column");
    println!("{}", "-".repeat(64));
    for field in &config.fields {
        let column = field.column.as_deref().unwrap_or(&field.name);
        println!("{:<24} {:<24} {}", field.name, field.ty.to_string(), column);
    }
}
