use anyhow::{Context, Result};
use mealcal_recipe::{JsonFileSource, RecipeSource};

use crate::config::Config;

pub fn check(config: Config) -> Result<()> {
    let aisles = config.aisle_order()?;
    let source = JsonFileSource::new(config.recipes.path.clone());

    let book = source
        .load()
        .with_context(|| format!("Failed to read {}", source.path().display()))?;
    book.validate(aisles.labels(), &config.shopping.units)
        .with_context(|| format!("{} failed validation", source.path().display()))?;

    println!(
        "{}: {} groups, {} recipes, ok",
        source.path().display(),
        book.group_count(),
        book.item_count()
    );

    Ok(())
}
