use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dsl_factory_core::{ArrayOptions, DslConfig, DslError, Generator};
use dsl_factory_inflector::Inflector;
use serde::Serialize;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "dsl-factory")]
#[command(about = "Inspect DSL field naming under an inflection configuration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the singular form of each word.
    Singularize(WordArgs),
    /// Print the plural form of each word.
    Pluralize(WordArgs),
    /// Check that plural field names yield a usable per-item accessor.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct WordArgs {
    /// Words to inflect.
    #[arg(required = true)]
    words: Vec<String>,
    /// YAML configuration with custom inflection rules.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Plural field names, as they would be passed to `array` or `hash`.
    #[arg(required = true)]
    names: Vec<String>,
    /// YAML configuration with generator options and inflection rules.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

/// Outcome of declaring one plural field.
#[derive(Debug, Serialize)]
struct FieldReport {
    field: String,
    singular: Option<String>,
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Singularize(args) => run_inflect(args, |inflector, word| inflector.singularize(word)),
        Command::Pluralize(args) => run_inflect(args, |inflector, word| inflector.pluralize(word)),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DslConfig, String> {
    match path {
        Some(path) => DslConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(DslConfig::default()),
    }
}

fn run_inflect<F>(args: WordArgs, inflect: F) -> Result<(), String>
where
    F: Fn(&dyn Inflector, &str) -> String,
{
    let config = load_config(args.config.as_ref())?;
    let inflector: Arc<dyn Inflector> = config.inflector().map_err(|e| e.to_string())?;
    for word in &args.words {
        println!("{}", inflect(inflector.as_ref(), word));
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let config = load_config(args.config.as_ref())?;

    let mut reports = Vec::with_capacity(args.names.len());
    for name in &args.names {
        reports.push(check_field(&config, name)?);
    }

    match args.format {
        CliOutputFormat::Json => {
            let raw = serde_json::to_string_pretty(&reports)
                .map_err(|err| format!("Failed to serialize report: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Table => print_table(&reports),
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} field name(s) rejected", reports.len()));
    }
    Ok(())
}

/// Declares `name` as an array field on a fresh generator and reports the
/// derived singular accessor or the definition error.
fn check_field(config: &DslConfig, name: &str) -> Result<FieldReport, String> {
    let generator = Generator::from_config(config).map_err(|e| e.to_string())?;
    let declared = generator.define(|g| {
        g.array(name, ArrayOptions::new())?;
        Ok(())
    });

    let report = match declared {
        Ok(definition) => FieldReport {
            field: name.to_string(),
            singular: definition
                .field(name.trim())
                .and_then(|spec| spec.singular_name())
                .map(str::to_string),
            error: None,
        },
        Err(DslError::Definition(err)) => FieldReport {
            field: name.to_string(),
            singular: None,
            error: Some(err.to_string()),
        },
        Err(err) => return Err(err.to_string()),
    };
    Ok(report)
}

fn print_table(reports: &[FieldReport]) {
    let width = reports
        .iter()
        .map(|r| r.field.len())
        .max()
        .unwrap_or(0)
        .max("FIELD".len());

    println!("{:<width$}  {:<8}  DETAIL", "FIELD", "STATUS");
    for report in reports {
        let (status, detail) = match (&report.singular, &report.error) {
            (Some(singular), _) => ("ok", singular.as_str()),
            (None, Some(error)) => ("rejected", error.as_str()),
            (None, None) => ("unknown", ""),
        };
        println!("{:<width$}  {:<8}  {detail}", report.field, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_field_reports_singular() {
        let report = check_field(&DslConfig::default(), "categories").unwrap();
        assert_eq!(report.singular.as_deref(), Some("category"));
        assert!(report.error.is_none());
    }

    #[test]
    fn test_check_field_reports_definition_error() {
        let report = check_field(&DslConfig::default(), "item").unwrap();
        assert!(report.singular.is_none());
        assert!(report.error.is_some());
    }

    #[test]
    fn test_cli_parses_check_format() {
        let cli = Cli::try_parse_from(["dsl-factory", "check", "items", "--format", "json"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.names, vec!["items".to_string()]);
                assert!(matches!(args.format, CliOutputFormat::Json));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
