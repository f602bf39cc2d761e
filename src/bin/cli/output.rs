//! Console output for CLI commands.

use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crowdsift_rs::{BucketSummary, CompilerConfig, WorkUnit};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print crowdsift header with version info
pub fn print_header() {
    println!("{} v{VERSION}", "crowdsift".bright_cyan().bold());
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Turns")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

/// Display per-bucket counts of a compiled table
pub fn display_bucket_summary(summary: &[BucketSummary], total_rows: usize) {
    println!();
    println!(
        "{} {} annotated turn(s)",
        "📊 Compiled".bright_blue().bold(),
        total_rows.to_string().cyan()
    );

    if total_rows == 0 {
        println!("{}", "   No annotated turns found in the result folders".yellow());
        return;
    }

    let rows: Vec<BucketRow> = summary
        .iter()
        .map(|entry| BucketRow {
            bucket: entry.bucket.clone(),
            count: entry.count,
            share: format!("{:.1}%", entry.fraction * 100.0),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{table}");
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Unit")]
    unit_id: String,
    #[tabled(rename = "Assignment")]
    assignment_id: String,
    #[tabled(rename = "Run")]
    task_run_id: String,
    #[tabled(rename = "Index")]
    unit_index: u32,
    #[tabled(rename = "Worker")]
    worker_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Pay")]
    pay_amount: String,
}

/// Display the units recorded for a task
pub fn display_units(task_name: &str, units: &[WorkUnit]) {
    println!(
        "{} {} finished unit(s) for task {}",
        "📋 Found".bright_blue().bold(),
        units.len(),
        task_name.cyan()
    );
    if units.is_empty() {
        return;
    }

    let rows: Vec<UnitRow> = units
        .iter()
        .map(|unit| UnitRow {
            unit_id: unit.unit_id.clone(),
            assignment_id: unit.assignment_id.clone(),
            task_run_id: unit.task_run_id.clone(),
            unit_index: unit.unit_index,
            worker_id: unit.worker_id.clone().unwrap_or_else(|| "-".to_string()),
            status: unit.status.to_string(),
            pay_amount: format!("{:.2}", unit.pay_amount),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{table}");
}

/// Display a validated configuration
pub fn display_config_summary(config: &CompilerConfig) {
    #[derive(Tabled)]
    struct SettingRow {
        #[tabled(rename = "Setting")]
        setting: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let folders = config.results_folders().map_or_else(
        || "(not set)".to_string(),
        |folders| {
            folders
                .iter()
                .map(|folder| folder.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        },
    );

    let rows = vec![
        SettingRow {
            setting: "Task name".to_string(),
            value: config.task_name().unwrap_or("(not set)").to_string(),
        },
        SettingRow {
            setting: "Results folders".to_string(),
            value: folders,
        },
        SettingRow {
            setting: "Output folder".to_string(),
            value: config
                .output_folder()
                .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string()),
        },
        SettingRow {
            setting: "Problem buckets".to_string(),
            value: config.problem_buckets().join(", "),
        },
    ];

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{table}");
}

/// Report where output was written
pub fn display_written(path: &Path) {
    println!("{} {}", "✅ Saved".bright_green().bold(), path.display().to_string().cyan());
}
