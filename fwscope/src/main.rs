//! # fwscope - Main Entry Point
//!
//! Supports two output modes:
//! - **Print** (`fwscope uart.log [firmware.map]`): console tables, or Markdown
//!   with `--markdown`
//! - **Update** (`--report REPORT.md`): regenerate the marked report sections
//!   in place
//!
//! Either mode can additionally write the JSON dataset with `--json`.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use fwscope::analysis::PerformanceAggregator;
use fwscope::cli::Args;
use fwscope::config::Config;
use fwscope::domain::ConfigError;
use fwscope::export::DatasetExporter;
use fwscope::pipeline::{load_benchmarks, load_resources, update_report};
use fwscope::report::{console, ReportTables};
use fwscope::uart_log::LogRecordParser;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    // Missing inputs are warnings; show them unless RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

/// A bad configuration is an invocation problem, like a bad flag.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.downcast_ref::<ConfigError>().is_some()) {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(clock_hz) = args.clock_hz {
        config.clock_hz = clock_hz;
    }
    if let Some(ref tag) = args.tag {
        config.log_tag.clone_from(tag);
    }

    config.validate()?;
    Ok(config)
}

fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let config = resolve_config(&args)?;

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let Some(log_path) = args.log.as_deref() else {
        // clap enforces LOG unless --dump-config
        anyhow::bail!("Missing required argument: LOG");
    };

    let parser = LogRecordParser::new(&config.log_tag, config.clock())?;
    let catalog = config.catalog()?;

    // =========================================================================
    // Inputs
    // =========================================================================

    let loaded = load_benchmarks(log_path, &parser)
        .with_context(|| format!("Failed to load benchmark log {}", log_path.display()))?;
    if loaded.as_ref().is_some_and(Vec::is_empty) {
        warn!("No benchmark records in {}, tables will be header-only", log_path.display());
    }

    let resources = match args.map.as_deref() {
        Some(map_path) => load_resources(map_path, &catalog)
            .with_context(|| format!("Failed to load linker map {}", map_path.display()))?,
        None => None,
    };

    let records = loaded.as_deref().unwrap_or_default();
    let performance = PerformanceAggregator::from_records(records);
    info!(
        "{} records in {} groups at {}",
        performance.total_records(),
        performance.group_count(),
        config.clock()
    );

    let tables = ReportTables::render(
        &config,
        loaded.is_some().then_some(&performance),
        resources.as_ref(),
    );

    // =========================================================================
    // Outputs
    // =========================================================================

    if let Some(ref report_path) = args.report {
        let result = update_report(report_path, &tables)?;
        if !quiet {
            println!(
                "{}: {} section(s) updated, {} not found",
                report_path.display(),
                result.replaced.len(),
                result.missing.len()
            );
            for name in &result.missing {
                println!("  missing markers: {name}");
            }
        }
    } else if args.markdown {
        for (_, table) in tables.named() {
            println!("{table}\n");
        }
    } else {
        let prefix = config.reference_prefix.as_str();
        if !performance.is_empty() {
            if !quiet {
                println!("Benchmark records ({}):", config.clock());
                println!("{}", console::records_table(records));
            }
            println!("{}", console::groups_table(&performance.groups(prefix)));
        }
        if let Some(ref report) = resources {
            println!("{}", console::resources_table(report));
        }
    }

    if let Some(ref json_path) = args.json {
        DatasetExporter::new(
            config.clock_hz,
            &config.reference_prefix,
            records,
            &performance,
            resources.as_ref(),
        )
        .export_to_file(json_path)?;
        if !quiet {
            println!("Dataset written to {}", json_path.display());
        }
    }

    Ok(())
}
