use anyhow::Result;
use chrono::NaiveDate;
use mealcal_recipe::JsonFileSource;

use crate::config::Config;
use crate::planner::Planner;

pub fn groceries(config: Config, date: NaiveDate, next_week: bool, json: bool) -> Result<()> {
    let source = JsonFileSource::new(config.recipes.path.clone());
    let planner = Planner::load(&config, &source)?;

    let selection = planner.select_week(date, next_week)?;
    let report = planner.groceries(&selection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
