//! salesops-dash: sales-operations dashboard and margin-leak alerts
//!
//! Composes KPI, product, supplier and inventory metrics from fixture or live
//! data and runs the weekly margin-leak job.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use salesops_dash::{
    cli,
    config::{AppConfig, SourceMode, CONFIG_FILE_NAMES},
    metrics::{ProductSortKey, SortDirection},
    model::DateRange,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "salesops-dash")]
#[command(version)]
#[command(about = "Sales-operations metrics, supplier scoring and margin-leak alerts", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Margin leaks detected (with --fail-on-leak)
    2  Error occurred

ENVIRONMENT:
    SALESOPS_QUOTES_URL, SALESOPS_SUPPLIER_COSTS_URL, SALESOPS_INVENTORY_URL
    and the matching *_API_KEY variables override live endpoints.

EXAMPLES:
    # Terminal summary from the built-in sample data
    salesops-dash snapshot

    # Full HTML dashboard, products by revenue
    salesops-dash snapshot -O dashboard.html --sort revenue

    # CI check for underpriced quotes
    salesops-dash leaks --fail-on-leak

    # Weekly job with NDJSON alert stream
    salesops-dash schedule --output json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Data source selection shared by every data command
#[derive(Parser)]
struct SourceArgs {
    /// Read data from a JSON fixture file instead of the built-in sample
    #[arg(long, conflicts_with = "live")]
    fixture: Option<PathBuf>,

    /// Read data from the configured live endpoints
    #[arg(long)]
    live: bool,
}

/// Arguments for the `snapshot` subcommand
#[derive(Parser)]
struct SnapshotArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format (auto picks from the output file extension, summary on stdout)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Only include transactions on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Only include transactions on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Product table sort key
    #[arg(long)]
    sort: Option<ProductSortKey>,

    /// Sort the product table ascending
    #[arg(long)]
    asc: bool,

    /// Dashboard title
    #[arg(long)]
    title: Option<String>,
}

/// Arguments for the `leaks` subcommand
#[derive(Parser)]
struct LeaksArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Write the leak report JSON to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Webhook URL to post the alert to
    #[arg(long, env = "SALESOPS_WEBHOOK_URL")]
    webhook: Option<String>,

    /// Exit with code 1 if any quote is below the minimum margin
    #[arg(long)]
    fail_on_leak: bool,
}

/// Arguments for the `schedule` subcommand
#[derive(Parser)]
struct ScheduleArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Trigger check interval (e.g., 30s, 1m)
    #[arg(long)]
    tick: Option<String>,

    /// Run the job once immediately on start
    #[arg(long)]
    run_on_start: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Webhook URL to post alerts to
    #[arg(long, env = "SALESOPS_WEBHOOK_URL")]
    webhook: Option<String>,

    /// Alert output (summary for human lines, json for NDJSON streaming)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Append NDJSON alerts to this file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the dashboard snapshot and render it
    Snapshot(SnapshotArgs),

    /// Run the margin-leak scan once
    Leaks(LeaksArgs),

    /// Run the weekly margin-leak job until interrupted
    Schedule(ScheduleArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file + env)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .salesops-dash.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = cli::exit_code(run(cli));
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Dispatch the parsed command; the `Ok` value is the process exit code.
fn run(cli: Cli) -> Result<i32> {
    let exit_code = match cli.command {
        Commands::Snapshot(args) => {
            let overrides = source_overrides(&args.source)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .build();
            let mut config = load_config(cli.config.as_deref(), &overrides, &args.source);
            if let Some(format) = args.output {
                config.report.format = format;
            }
            if let Some(sort) = args.sort {
                config.report.sort = sort;
            }
            if args.asc {
                config.report.direction = SortDirection::Asc;
            }
            if args.title.is_some() {
                config.report.title = args.title;
            }

            let range = date_range(args.start, args.end)?;
            cli::run_snapshot(&config, range, cli.quiet)?
        }

        Commands::Leaks(args) => {
            let overrides = source_overrides(&args.source)
                .output_file(args.output_file)
                .webhook_url(args.webhook)
                .build();
            let config = load_config(cli.config.as_deref(), &overrides, &args.source);
            cli::run_leaks(&config, args.fail_on_leak, cli.quiet)?
        }

        Commands::Schedule(args) => {
            let mut builder = source_overrides(&args.source)
                .run_on_start(args.run_on_start)
                .webhook_url(args.webhook)
                .output_file(args.output_file);
            if let Some(tick) = args.tick {
                builder = builder.tick_interval(tick);
            }
            let config = load_config(cli.config.as_deref(), &builder.build(), &args.source);
            let ndjson = args.output == ReportFormat::Json;
            cli::run_schedule(&config, args.max_ticks, ndjson, cli.quiet)?
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "salesops-dash", &mut io::stdout());
            0
        }

        Commands::ConfigSchema { output } => {
            let schema = salesops_dash::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            0
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            0
        }
    };
    Ok(exit_code)
}

/// Start a config override builder from the source flags.
fn source_overrides(args: &SourceArgs) -> salesops_dash::config::AppConfigBuilder {
    let mut builder = AppConfig::builder();
    if let Some(ref path) = args.fixture {
        builder = builder.fixture_file(path.clone());
    }
    if args.live {
        builder = builder.live();
    }
    builder
}

/// Defaults, then the config file, then CLI overrides, then environment.
fn load_config(
    explicit: Option<&std::path::Path>,
    overrides: &AppConfig,
    source: &SourceArgs,
) -> AppConfig {
    let (mut config, loaded_from) = AppConfig::from_file_with_overrides(explicit, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("loaded config from {}", path.display());
    }
    // an explicit fixture beats a live mode from the file
    if source.fixture.is_some() {
        config.source.mode = SourceMode::Fixture;
    }
    config.apply_env_overrides();
    config
}

/// Build an inclusive range from optional bounds.
fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Option<DateRange>> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let start = start.unwrap_or(NaiveDate::MIN);
    let end = end.unwrap_or(NaiveDate::MAX);
    if start > end {
        anyhow::bail!("--start {start} is after --end {end}");
    }
    Ok(Some(DateRange::new(start, end)))
}

fn run_config_action(action: ConfigAction, explicit: Option<&std::path::Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (mut config, loaded_from) = salesops_dash::config::load_or_default(explicit);
            config.apply_env_overrides();
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir().ok().map(|p| p.display().to_string()),
                salesops_dash::config::user_config_dir().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match salesops_dash::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".salesops-dash.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = salesops_dash::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
