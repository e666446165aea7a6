//! smachart CLI — fetch daily prices, add a simple moving average, chart it.
//!
//! Commands:
//! - `chart` — fetch, add `SMA_{window}`, and show the terminal chart
//! - `fetch` — fetch and print the price table; fetch errors are reported
//!   as a message and the process still exits cleanly
//!
//! Configuration comes from `--config`, else `<config dir>/smachart/config.toml`
//! if present, else built-in defaults; single flags override any of them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use smachart_core::data::{CsvSource, HistoricalPriceSource, YahooProvider};
use smachart_runner::{fetch_and_print, run_pipeline, PipelineConfig};
use smachart_tui::{install_panic_hook, TerminalRenderer};

#[derive(Parser)]
#[command(
    name = "smachart",
    about = "smachart — daily stock prices with a simple moving average"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (ticker, start_date, sma_window).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ticker symbol (e.g., AAPL). Overrides the config file.
    #[arg(long, global = true)]
    ticker: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive. Overrides the config file.
    #[arg(long, global = true)]
    start: Option<NaiveDate>,

    /// SMA window length in trading days. Overrides the config file.
    #[arg(long, global = true, allow_negative_numbers = true)]
    window: Option<i64>,

    /// Read bars from a CSV file instead of Yahoo Finance.
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prices, add the SMA, and show the chart.
    Chart,
    /// Fetch prices and print the table.
    Fetch,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let source = build_source(cli.csv.clone())?;

    match cli.command {
        Commands::Chart => run_chart(&config, source.as_ref()),
        Commands::Fetch => run_fetch(&config, source.as_ref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("smachart").join("config.toml"))
}

fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let fallback = default_config_path();
    let mut config = PipelineConfig::discover(cli.config.as_deref(), fallback.as_deref())
        .context("loading configuration")?;

    if let Some(ticker) = &cli.ticker {
        config.ticker = ticker.clone();
    }
    if let Some(start) = cli.start {
        config.start_date = start;
    }
    if let Some(window) = cli.window {
        config.sma_window = window;
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn build_source(csv: Option<PathBuf>) -> Result<Box<dyn HistoricalPriceSource>> {
    match csv {
        Some(path) => Ok(Box::new(CsvSource::new(path))),
        None => Ok(Box::new(
            YahooProvider::new().context("creating Yahoo Finance client")?,
        )),
    }
}

fn run_chart(config: &PipelineConfig, source: &dyn HistoricalPriceSource) -> Result<()> {
    install_panic_hook();
    let mut renderer = TerminalRenderer::default();
    let table = run_pipeline(config, source, &mut renderer)?;
    tracing::info!(rows = table.len(), "chart closed");
    Ok(())
}

fn run_fetch(config: &PipelineConfig, source: &dyn HistoricalPriceSource) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    fetch_and_print(config, source, &mut out).context("writing table to stdout")?;
    Ok(())
}
