//! Pi Cycle CLI — pull, report, and run commands.
//!
//! Commands:
//! - `pull` — fetch daily klines from Binance and merge them into the store
//! - `report` — run the indicator engine over the stored series and render
//!   the colored table plus the projection trailer
//! - `run` — pull, then report

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use picycle_core::data::{BinanceProvider, KlineStore, SeriesSource};
use picycle_core::{
    project, IndicatorEngine, PiCycleConfig, ReportWindow, Zone, MIN_DISPLAY_DAYS,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picycle", about = "Pi Cycle volatility-band indicator")]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the kline store path from the config.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print data-layer diagnostics.
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily klines from Binance and merge them into the store.
    Pull {
        /// Symbol to pull (e.g. BTCUSDT). Overrides the config.
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Render the indicator table and projection from the stored series.
    Report {
        /// Number of most-recent days to display (floor of 33).
        #[arg(long, default_value_t = MIN_DISPLAY_DAYS)]
        days: usize,

        /// Emit rows and projection as JSON instead of the table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Pull, then report.
    Run {
        /// Symbol to pull (e.g. BTCUSDT). Overrides the config.
        #[arg(long)]
        symbol: Option<String>,

        /// Number of most-recent days to display (floor of 33).
        #[arg(long, default_value_t = MIN_DISPLAY_DAYS)]
        days: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PiCycleConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PiCycleConfig::default(),
    };

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.store_path));
    let store = KlineStore::new(store_path);

    match cli.command {
        Commands::Pull { symbol } => run_pull(&config, &store, symbol.as_deref(), cli.debug),
        Commands::Report { days, json } => run_report(&config, &store, days, json, cli.debug),
        Commands::Run { symbol, days } => {
            run_pull(&config, &store, symbol.as_deref(), cli.debug)?;
            println!();
            run_report(&config, &store, days, false, cli.debug)
        }
    }
}

fn run_pull(
    config: &PiCycleConfig,
    store: &KlineStore,
    symbol: Option<&str>,
    debug: bool,
) -> Result<()> {
    let symbol = symbol.unwrap_or(&config.data.symbol);
    let provider = BinanceProvider::new();

    let klines = provider
        .fetch_daily(symbol)
        .with_context(|| format!("fetching klines for {symbol}"))?;
    println!("Fetched {} klines for {symbol}.", klines.len());

    let stored = store.upsert(&klines).context("updating kline store")?;
    if let Some(date) = store.mark_latest_close()? {
        if debug {
            println!("Re-pointed latest price ({date}) at its close.");
        }
    }
    println!(
        "Store now holds {stored} days ({}).",
        store.path().display()
    );
    Ok(())
}

fn run_report(
    config: &PiCycleConfig,
    store: &KlineStore,
    days: usize,
    json: bool,
    debug: bool,
) -> Result<()> {
    let series = store.load_series().context("loading stored series")?;
    if series.is_empty() {
        bail!(
            "no stored klines at {} — run `picycle pull` first",
            store.path().display()
        );
    }
    if debug {
        println!("Loaded {} price points from the store.", series.len());
    }

    let engine = IndicatorEngine::new(config.indicator.clone());
    let rows = engine.compute(&series);

    let days = days.max(MIN_DISPLAY_DAYS);
    let window = ReportWindow::from_rows(&rows, days);
    let today = chrono::Local::now().date_naive();
    let projection = project(&window, &config.projector, today);

    if json {
        let rows_json: Vec<serde_json::Value> = window
            .rows()
            .iter()
            .map(|row| {
                let mut value = serde_json::to_value(row).expect("row serialization");
                value["zone"] = serde_json::to_value(Zone::classify(row, &config.zone))
                    .expect("zone serialization");
                value
            })
            .collect();
        let doc = serde_json::json!({
            "rows": rows_json,
            "projection": projection,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print!("{}", report::render_table(&window, &config.zone));
    print!(
        "{}",
        report::render_projection(
            &projection,
            config.projector.smoothing_window,
            config.indicator.lookback_window,
            today,
        )
    );
    Ok(())
}
