use std::fmt::Write as _;

use anyhow::Result;
use mealcal_mealplan::MonthGrid;
use mealcal_recipe::JsonFileSource;

use crate::config::Config;
use crate::planner::Planner;

pub fn plan(config: Config, year: i32, month: u32) -> Result<()> {
    let source = JsonFileSource::new(config.recipes.path.clone());
    let planner = Planner::load(&config, &source)?;

    let grid = planner.month(year, month)?;
    print!("{}", render_plan(&grid)?);

    Ok(())
}

/// Calendar of the month followed by one line per day.
pub fn render_plan(grid: &MonthGrid) -> Result<String> {
    let calendar = grid.calendar();
    let mut output = format!("{}-{:02}\n{calendar}\n", grid.year(), grid.month());

    for (day, cell) in grid.days() {
        let weekday = calendar.weekday_of(day)?;
        let name = cell.name().unwrap_or_default();

        match cell.meal().and_then(|meal| meal.url.as_deref()) {
            Some(url) => writeln!(output, "{weekday} {day:2}: {name} <{url}>")?,
            None => writeln!(output, "{weekday} {day:2}: {name}")?,
        }
    }

    Ok(output)
}
