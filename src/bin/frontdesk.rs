//! Front desk CLI — prints the day's briefing as JSON.
//!
//! Usage: `frontdesk [--date YYYY-MM-DD] [--dataset PATH] [--config PATH] <command>`
//! Log level comes from `RUST_LOG` (default: warn).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use frontdesk_lib::error::{DataLoadError, LoadErrorView};
use frontdesk_lib::json_loader::{load_dataset, validate_date};
use frontdesk_lib::services::{actions, calendar, dashboard, guests};
use frontdesk_lib::state::{load_config, load_config_from, Config};
use frontdesk_lib::{DailyStatsAggregator, EmailClassifier, Guest};

#[derive(Debug, Parser)]
#[command(name = "frontdesk", version, about = "Daily front-of-house briefing")]
struct Cli {
    /// Service date (YYYY-MM-DD). Defaults to the configured date.
    #[arg(long, global = true)]
    date: Option<String>,

    /// Guest dataset JSON. Overrides datasetPath from the config.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Config file. Defaults to ~/.frontdesk/config.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Full dashboard payload (stats + notices)
    Dashboard,
    /// Daily statistics
    Stats,
    /// Classified guest email notices
    Notices,
    /// Staff action items, one per line
    Actions,
    /// VIP profiles of guests whose name matches
    Guest { query: String },
    /// Reservation load per date
    Calendar,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DataLoadError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| DataLoadError::Io(format!("Failed to encode output: {}", e)))?;
    println!("{}", out);
    Ok(())
}

fn run(cli: Cli) -> Result<(), DataLoadError> {
    let config: Config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let date = cli.date.clone().unwrap_or_else(|| config.default_date.clone());
    let date = validate_date(&date)?;
    let dataset_path = cli.dataset.clone().unwrap_or_else(|| config.dataset_path());
    let aggregator =
        DailyStatsAggregator::new(EmailClassifier::standard(), config.stats_policy());

    let loaded = load_dataset(&dataset_path);
    match cli.command {
        Command::Dashboard => {
            print_json(&dashboard::load_dashboard(loaded.as_ref(), &aggregator, date))
        }
        command => {
            let dataset = loaded?;
            run_query(command, &dataset.diners, date, &aggregator)
        }
    }
}

fn run_query(
    command: Command,
    guest_list: &[Guest],
    date: &str,
    aggregator: &DailyStatsAggregator<'_>,
) -> Result<(), DataLoadError> {
    match command {
        Command::Dashboard => print_json(&aggregator.briefing(guest_list, date)),
        Command::Stats => print_json(&aggregator.compute_daily_stats(guest_list, date)),
        Command::Notices => print_json(&aggregator.compute_email_notices(guest_list, date)),
        Command::Actions => {
            let notices = aggregator.compute_email_notices(guest_list, date);
            for line in actions::action_items(&notices) {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Guest { query } => {
            let profiles: Vec<_> = guests::search_guests(guest_list, &query)
                .into_iter()
                .map(|g| guests::vip_profile(g, aggregator.policy()))
                .collect();
            print_json(&profiles)
        }
        Command::Calendar => print_json(&calendar::calendar_levels(guest_list)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            let view = LoadErrorView::from(&e);
            eprintln!("Error: {}", view.message);
            eprintln!("{}", view.recovery_suggestion);
            ExitCode::FAILURE
        }
    }
}
