//! Command execution for the crowdsift CLI.

use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::cli::args::{CompileArgs, ListUnitsArgs, ValidateConfigArgs};
use crate::cli::config_layer::{build_options, load_options};
use crate::cli::output::{
    display_bucket_summary, display_config_summary, display_units, display_written, print_header,
};
use crowdsift_rs::io::reports::{write_summary, write_table};
use crowdsift_rs::{
    CompilerConfig, CompilerOptions, LocalUnitDatabase, ResultsCompiler, TurnAnnotationsCompiler,
};

fn open_database(path: Option<&std::path::Path>) -> LocalUnitDatabase {
    match path {
        Some(path) => LocalUnitDatabase::new(path),
        None => LocalUnitDatabase::open_default(),
    }
}

/// Compile results and optionally persist them to the output folder
pub fn compile_command(args: CompileArgs) -> anyhow::Result<()> {
    print_header();

    let options = build_options(args.config.as_deref(), &args.compiler)?;
    let config = CompilerConfig::from_options(&options)?;
    let mut compiler = TurnAnnotationsCompiler::new(config);

    if args.filter_by_units {
        let task_name = compiler.config().require_task_name()?.to_string();
        let database = open_database(args.db.as_deref());
        let units = compiler.get_task_units(&database, &task_name)?;
        info!("Restricting compilation to {} unit(s) of '{}'", units.len(), task_name);
        compiler = compiler.with_units(&units);
    }

    let table = compiler.compile_results()?;
    let summary = table.bucket_summary(compiler.problem_buckets())?;
    display_bucket_summary(&summary, table.num_rows());

    match compiler.output_folder() {
        Some(folder) => {
            let table_path = write_table(&table, folder, args.format)?;
            let summary_path = write_summary(&summary, table.num_rows(), folder)?;
            display_written(&table_path);
            display_written(&summary_path);
        }
        None => warn!("No --output-folder given; compiled results were not saved"),
    }

    Ok(())
}

/// List the finished units of a task
pub fn list_units_command(args: ListUnitsArgs) -> anyhow::Result<()> {
    let database = open_database(args.db.as_deref());
    let units = crowdsift_rs::UnitStore::units_for_task(&database, &args.task_name)?;
    display_units(&args.task_name, &units);
    Ok(())
}

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default crowdsift configuration".dimmed());
    println!("{}", "# Save this to .crowdsift.yml and customize as needed".dimmed());
    println!("{}", "# Usage: crowdsift compile --config your-config.yml".dimmed());
    println!();

    let yaml_output = CompilerOptions::default().to_yaml()?;
    println!("{yaml_output}");

    Ok(())
}

/// Validate a configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_options(Some(&args.config))
        .and_then(|options| Ok(CompilerConfig::from_options(&options)?))
    {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • Make sure problem_buckets includes none_all_good");
            println!();
            println!("{}", "💡 Tip: Use 'crowdsift print-default-config' to see valid format".dimmed());
            std::process::exit(1);
        }
    };

    display_config_summary(&config);
    Ok(())
}
