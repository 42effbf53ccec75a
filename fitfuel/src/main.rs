//! fitfuel-history - CLI view of historical meal statistics
//!
//! Loads one period through the history coordinator and prints the
//! resulting view-state, the same data the mobile history screen renders.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/fitfuel/config.toml (~/.config/fitfuel/config.toml)
//! - Logs: $XDG_STATE_HOME/fitfuel/fitfuel.YYYY-MM-DD.log (~/.local/state/fitfuel/)

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use fitfuel_core::client::ApiClient;
use fitfuel_core::format::{format_relative_time, format_score};
use fitfuel_core::history::{HistoryCoordinator, ViewState};
use fitfuel_core::{Config, TimePeriod};

#[derive(Parser)]
#[command(name = "fitfuel-history")]
#[command(about = "Show historical meal compliance, trends and insights")]
#[command(version)]
struct Args {
    /// Period to load: week, month or year (default: from config)
    #[arg(short, long)]
    period: Option<TimePeriod>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (default: $XDG_CONFIG_HOME/fitfuel/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL from config
    #[arg(long)]
    base_url: Option<String>,

    /// Also print log events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    let _log_guard = fitfuel_core::logging::init(&config.logging, args.verbose)
        .context("failed to initialize logging")?;

    let client = ApiClient::new(&config.api).context("failed to create API client")?;
    let history = HistoryCoordinator::new(client, config.history.default_period);

    match args.period {
        Some(period) => history.load(period),
        None => history.refresh(),
    }
    let state = history.wait_idle().await;

    match args.format {
        OutputFormat::Text => print_text(&state),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
    }

    if let Some(error) = state.error {
        tracing::error!(%error, "History load failed");
        anyhow::bail!("failed to load history: {}", error);
    }

    Ok(())
}

fn print_text(state: &ViewState) {
    if !state.has_data() {
        if state.error.is_none() {
            println!("No history loaded.");
        }
        return;
    }

    let period = state.period.map(|p| p.as_str()).unwrap_or("-");
    println!("History ({})", period);
    println!("==============");
    println!();
    println!(
        "Compliance:  {:.1}%  {}",
        state.average_compliance, state.compliance_trend
    );
    println!(
        "Consistency: {}  {}",
        format_score(state.consistency_score),
        state.consistency_trend
    );

    if !state.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &state.insights {
            println!("  - {}", insight.text);
        }
    }

    if !state.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for recommendation in &state.recommendations {
            println!("  - {}", recommendation);
        }
    }

    if let Some(stats) = &state.monthly_stats {
        println!();
        println!("This month:");
        for line in stats.lines() {
            println!("  {}", line);
        }
    }

    if let Some(updated_at) = state.updated_at {
        println!();
        println!("Updated {}", format_relative_time(updated_at, Utc::now()));
    }
}
