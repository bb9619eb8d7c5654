use anyhow::{Context, Result};
use chrono::NaiveDate;
use mealcal_mealplan::{MonthGrid, MonthScheduler, WeekSelection};
use mealcal_recipe::{RecipeBook, RecipeSource};
use mealcal_shopping::{AisleOrder, GroceryAggregator, GroceryReport};

use crate::config::Config;

/// Recipe book, scheduler and aggregator wired together from one [`Config`].
#[derive(Debug, Clone)]
pub struct Planner {
    scheduler: MonthScheduler,
    aggregator: GroceryAggregator,
}

impl Planner {
    /// Loads recipes from `source` and checks every ingredient against the
    /// configured aisles and units before anything is scheduled.
    pub fn load(config: &Config, source: &impl RecipeSource) -> Result<Self> {
        let aisles = config.aisle_order()?;
        let book = source.load().context("Failed to load recipes")?;
        book.validate(aisles.labels(), &config.shopping.units)
            .context("Recipe file failed validation")?;

        tracing::info!(
            groups = book.group_count(),
            items = book.item_count(),
            "loaded recipe book"
        );

        Ok(Self::from_book(config, book, aisles))
    }

    fn from_book(config: &Config, book: RecipeBook, aisles: AisleOrder) -> Self {
        let scheduler_config = config.scheduler_config();
        let aggregator = GroceryAggregator::new(aisles, scheduler_config.first_weekday);

        Self {
            scheduler: MonthScheduler::from_book(book, scheduler_config),
            aggregator,
        }
    }

    pub fn scheduler(&self) -> &MonthScheduler {
        &self.scheduler
    }

    pub fn month(&self, year: i32, month: u32) -> Result<MonthGrid> {
        self.scheduler
            .generate(month, year)
            .with_context(|| format!("Failed to plan {year}-{month:02}"))
    }

    /// Week containing `date`, or the week after it.
    pub fn select_week(&self, date: NaiveDate, next_week: bool) -> Result<WeekSelection> {
        let first_weekday = self.scheduler.config().first_weekday;
        let selection = if next_week {
            WeekSelection::next(date, first_weekday)?
        } else {
            WeekSelection::current(date, first_weekday)?
        };

        Ok(selection)
    }

    /// Plans the selected month and the one after it, then builds the
    /// grocery report for the selected week.
    pub fn groceries(&self, selection: &WeekSelection) -> Result<GroceryReport> {
        let grid = self.month(selection.year, selection.month)?;
        let (year, month) = selection.following_month();
        let following = self.month(year, month)?;

        let report = self
            .aggregator
            .aggregate_selection(selection, &grid, &following)?;

        tracing::info!(
            year = selection.year,
            month = selection.month,
            week = selection.week_index,
            lines = report.line_count(),
            "built grocery report"
        );

        Ok(report)
    }
}
