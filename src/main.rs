use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use mealcal::config::Config;

/// mealcal - Monthly meal calendar and weekly grocery lists
#[derive(Parser)]
#[command(name = "mealcal")]
#[command(about = "Plan a month of meals and build the weekly grocery list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Recipe file (overrides config file)
    #[arg(long, global = true)]
    recipes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the meal calendar for a month
    Plan {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Defaults to the current month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Print the grocery list for a week
    Groceries {
        /// Any day of the week to shop for, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Use the week after the one containing the date
        #[arg(long)]
        next_week: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load and validate the recipe file
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.clone())?;
    if let Some(recipes) = cli.recipes {
        config.recipes.path = recipes;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealcal::observability::init_observability(
        "mealcal",
        &config.observability.log_level,
        config.observability.json,
    )?;

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Plan { year, month } => plan_command(
            config,
            year.unwrap_or(today.year()),
            month.unwrap_or(today.month()),
        ),
        Commands::Groceries {
            date,
            next_week,
            json,
        } => groceries_command(config, date.unwrap_or(today), next_week, json),
        Commands::Check => check_command(config),
    }
}

#[tracing::instrument(skip(config))]
fn plan_command(config: Config, year: i32, month: u32) -> Result<()> {
    mealcal::cli::plan::plan(config, year, month)
}

#[tracing::instrument(skip(config))]
fn groceries_command(config: Config, date: NaiveDate, next_week: bool, json: bool) -> Result<()> {
    mealcal::cli::groceries::groceries(config, date, next_week, json)
}

#[tracing::instrument(skip(config))]
fn check_command(config: Config) -> Result<()> {
    mealcal::cli::check::check(config)
}
