use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stratum::analytics::{self, Heatmap};
use stratum::cache::SnapshotCache;
use stratum::catalog::Catalog;
use stratum::config::{Config, LoggingConfig};
use stratum::loader::load_snapshot;
use stratum::models::ReportSnapshot;
use stratum::summary;

#[derive(Parser)]
#[command(
    name = "stratum",
    version,
    about = "Temporal analytics over level-structured intelligence reports",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (defaults to STRATUM_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Every derivation in one summary
    Dashboard,

    /// Date x level event intensity
    Heatmap,

    /// Rising and falling trends with momentum
    Trends,

    /// Forecasts from recent level activity
    Forecast,

    /// Compare the two most recent weeks
    Weekly,

    /// Program relevance scores
    Programs {
        /// Only score these program keys
        #[arg(short, long = "program")]
        programs: Vec<String>,
    },

    /// Print Prometheus metrics after a dashboard run
    Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    // Initialize tracing/logging
    setup_tracing(&config.logging, cli.log_format.as_deref(), cli.verbose)?;
    stratum::i18n::init_from_env();

    if let Err(e) = stratum::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed");
    }

    let catalog = config.catalog.load().context("Failed to load catalog")?;
    let snapshot = load_snapshot(&config)
        .await
        .context("Failed to load reports")?;

    match cli.command {
        Commands::Dashboard => {
            let mut cache = SnapshotCache::new();
            let dashboard = cache.get_or_build(&snapshot, &catalog, &config.engine);
            emit(cli.format, dashboard, || summary::dashboard_text(dashboard))?;
        }

        Commands::Heatmap => {
            let heatmap = Heatmap::build(&snapshot.reports);
            emit(cli.format, &heatmap, || {
                summary::heatmap_text(&heatmap, &catalog.levels)
            })?;
        }

        Commands::Trends => {
            let board = trend_board(&snapshot, &catalog);
            emit(cli.format, &board, || summary::trends_text(&board))?;
        }

        Commands::Forecast => {
            let _timer = stratum::metrics::start_derivation_timer("forecast");
            let forecasts =
                analytics::forecast(&snapshot.reports, &catalog.levels, &config.engine.forecast);
            emit(cli.format, &forecasts, || summary::forecasts_text(&forecasts))?;
        }

        Commands::Weekly => {
            let _timer = stratum::metrics::start_derivation_timer("weekly");
            let week = analytics::compare_weeks(&snapshot.reports);
            emit(cli.format, &week, || summary::weekly_text(&week))?;
        }

        Commands::Programs { programs } => {
            let _timer = stratum::metrics::start_derivation_timer("relevance");
            let corpus = analytics::corpus_text(&snapshot.reports);
            let activity = analytics::level_activity(&snapshot.reports);
            let scores = if programs.is_empty() {
                analytics::score_programs(
                    &catalog.programs,
                    &corpus,
                    &activity,
                    &config.engine.relevance,
                )
            } else {
                analytics::score_selected(
                    &catalog.programs,
                    &programs,
                    &corpus,
                    &activity,
                    &config.engine.relevance,
                )
            };
            emit(cli.format, &scores, || summary::programs_text(&scores))?;
        }

        Commands::Metrics => {
            let mut cache = SnapshotCache::new();
            cache.get_or_build(&snapshot, &catalog, &config.engine);
            let text = stratum::metrics::encode_metrics()
                .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {e}"))?;
            print!("{text}");
        }
    }

    Ok(())
}

fn trend_board(snapshot: &ReportSnapshot, catalog: &Catalog) -> analytics::TrendBoard {
    let _timer = stratum::metrics::start_derivation_timer("momentum");
    let heatmap = Heatmap::build(&snapshot.reports);
    analytics::TrendBoard::classify(analytics::build_trend_dynamics(
        &snapshot.reports,
        &heatmap,
        &catalog.fallback_trends,
        &snapshot.momentum_history,
    ))
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Text => {
            print!("{}", text());
        }
    }
    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, format_flag: Option<&str>, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(logging.filter_directive(verbose));

    // Logs go to stderr so JSON output on stdout stays parseable
    match logging.resolved_format(format_flag) {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
