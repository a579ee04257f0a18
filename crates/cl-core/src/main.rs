//! Campaign Loader - campaign descriptor dispatch
//!
//! The entry point for cl-core, handling:
//! - Run-option resolution (test mode, stride override)
//! - Sequential dispatch of the built-in campaign's load plan
//! - Post-load terrain registration
//! - Dispatch reporting and stable exit codes

use clap::error::ErrorKind;
use clap::Parser;
use cl_common::error::format_error_human;
use cl_common::{Error, OutputFormat};
use cl_core::campaigns::july2020;
use cl_core::dispatch::{DispatchReport, Dispatcher, LoadOutcome};
use cl_core::exit_codes::ExitCode;
use cl_core::loader::PlanLoader;
use cl_core::logging::{generate_run_id, init_logging};
use cl_core::options::RunOptions;
use std::io::IsTerminal;
use std::num::NonZeroU32;
use tracing::info;

/// Campaign Loader - multi-platform campaign descriptor dispatch
#[derive(Parser, Debug)]
#[command(name = "cl-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Test mode: force stride to 100 to shrink run volume
    #[arg(long)]
    test: bool,

    /// Load every Nth record instead of every record
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    stride: Option<u32>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            std::process::exit(ExitCode::Clean.as_i32());
        }
        Err(e) => {
            eprint!("{e}");
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    init_logging(cli.verbose, cli.quiet, use_color);

    let exit_code = run(&cli, use_color);
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli, use_color: bool) -> ExitCode {
    let run_id = generate_run_id();
    info!(run_id, "campaign loader starting");

    // Descriptor construction is the only fatal pre-dispatch stage.
    let mut dispatcher = match build_dispatcher() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", format_error_human(&e, use_color));
            return ExitCode::ConfigError;
        }
    };

    let options = RunOptions {
        test_mode: cli.test,
        stride_override: cli.stride.and_then(NonZeroU32::new),
    };

    let mut loader = PlanLoader::new();
    let report = dispatcher.run(&mut loader, &options);

    if let Err(e) = print_report(cli, use_color, dispatcher.campaign().title.as_str(), &report) {
        eprintln!("{}", format_error_human(&e, use_color));
        return ExitCode::IoError;
    }

    if let Some(terrain_error) = &report.terrain_error {
        eprintln!("✗ terrain registration failed: {}", terrain_error.message);
        return ExitCode::TerrainError;
    }
    if !report.summary.all_succeeded {
        return ExitCode::PartialFail;
    }

    println!("All Done.");
    ExitCode::Clean
}

fn build_dispatcher() -> cl_common::Result<Dispatcher> {
    Dispatcher::new(july2020::campaign()?, july2020::plan()?)
}

fn print_report(
    cli: &Cli,
    use_color: bool,
    title: &str,
    report: &DispatchReport,
) -> Result<(), Error> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Summary => {
            println!(
                "{}: {} loaded, {} skipped, {} failed (stride {})",
                report.campaign_id,
                report.summary.loaded,
                report.summary.skipped,
                report.summary.failed,
                report.stride
            );
        }
        OutputFormat::Text => print_text_report(use_color, title, report),
    }
    Ok(())
}

fn print_text_report(use_color: bool, title: &str, report: &DispatchReport) {
    let (green, red, yellow, reset) = if use_color {
        ("\x1b[32m", "\x1b[31m", "\x1b[33m", "\x1b[0m")
    } else {
        ("", "", "", "")
    };

    println!(
        "Loading campaign {} ({title}), stride {}",
        report.campaign_id, report.stride
    );
    for step in &report.steps {
        match &step.outcome {
            LoadOutcome::Loaded { stats } => {
                println!(
                    "{green}✓{reset} {}: loaded ({} files, {} records)",
                    step.platform, stats.files, stats.records
                );
            }
            LoadOutcome::Skipped { reason } => {
                println!("{yellow}-{reset} {}: skipped ({reason})", step.platform);
            }
            LoadOutcome::Failed { error } => {
                println!("{red}✗{reset} {}: {}", step.platform, error.message);
            }
        }
    }
    if !report.unscheduled.is_empty() {
        let names: Vec<_> = report.unscheduled.iter().map(|p| p.as_str()).collect();
        println!("Configured but not scheduled: {}", names.join(", "));
    }
    match &report.terrain_error {
        None => println!("Terrain resources registered."),
        Some(e) => println!("{red}✗{reset} terrain registration: {}", e.message),
    }
    println!(
        "{} loaded, {} skipped, {} failed",
        report.summary.loaded, report.summary.skipped, report.summary.failed
    );
    if !report.summary.all_succeeded {
        let names: Vec<_> = report
            .failed_platforms()
            .iter()
            .map(|p| p.as_str())
            .collect();
        println!("{red}Failed platforms:{reset} {}", names.join(", "));
    }
}
