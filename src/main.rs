use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use olympic_dash::config::DashboardConfig;
use olympic_dash::data::source::source_for_location;
use olympic_dash::state::{self, ViewState};
use olympic_dash::stats::Statistic;
use olympic_dash::DataStore;

#[derive(Parser, Debug)]
#[command(name = "olympic-dash")]
#[command(about = "Olympic participation dashboard in the terminal")]
struct Args {
    /// Dataset file or URL (overrides OLYMPIC_DATA_SOURCE)
    #[arg(short, long)]
    source: Option<String>,

    /// Seconds to wait for the dataset (overrides OLYMPIC_LOAD_TIMEOUT_SECS)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,

    /// Show this country's details page instead of the dashboard
    country: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let store = Arc::new(DataStore::from_boxed(source_for_location(&config.data_source)));
    let loader = Arc::clone(&store);
    tokio::spawn(async move {
        loader.load().await;
    });

    let mut status = store.observe_status();
    let settled = async {
        while !status.current().is_settled() {
            if status.changed().await.is_none() {
                break;
            }
        }
    };
    match config.load_timeout {
        Some(limit) => {
            if tokio::time::timeout(limit, settled).await.is_err() {
                warn!("Dataset still loading after {}s, giving up", limit.as_secs());
                eprintln!("Timed out loading {}", config.data_source);
                return Ok(ExitCode::FAILURE);
            }
        }
        None => settled.await,
    }

    let snapshot = store.snapshot();
    let view = match &args.country {
        Some(country) => state::details_view(&snapshot, country),
        None => state::dashboard_view(&snapshot),
    };

    if args.json {
        let out = serde_json::to_string_pretty(&view).context("serializing view")?;
        println!("{out}");
    } else {
        render(&view);
    }

    Ok(match view {
        ViewState::Error { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn build_config(args: &Args) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::from_env().context("reading environment")?;
    if let Some(source) = &args.source {
        config = config.with_data_source(source)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_load_timeout_secs(secs)?;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn render(view: &ViewState) {
    match view {
        ViewState::Loading => println!("Loading…"),
        ViewState::Error { message } => println!("{message}"),
        ViewState::Dashboard {
            title,
            statistics,
            medals,
        } => {
            println!("{title}");
            print_statistics(statistics);
            println!();
            for slice in medals {
                println!("  {:<24} {:>6}", slice.name, slice.value);
            }
        }
        ViewState::Details {
            country,
            statistics,
            series,
        } => {
            println!("{country}");
            if statistics.is_empty() {
                println!("  No data for this country.");
                return;
            }
            print_statistics(statistics);
            println!();
            for point in series {
                println!(
                    "  {}  {:<24} {:>4} medals",
                    point.extra.code, point.name, point.value
                );
            }
        }
    }
}

fn print_statistics(statistics: &[Statistic]) {
    for stat in statistics {
        println!("  {:<26} {:>8}", stat.title, stat.value);
    }
}
