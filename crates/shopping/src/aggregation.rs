use std::collections::HashMap;

use chrono::Weekday;
use mealcal_mealplan::calendar::weekday_at;
use mealcal_mealplan::{DayCell, GridWeek, MonthGrid, WeekSelection};

use crate::report::{AisleSection, DayEntry, GroceryLine, GroceryReport, NONE_LABEL, line_key};
use crate::{AisleOrder, ShoppingError, ShoppingResult};

/// Grocery Aggregator
///
/// Sums the ingredients of one week of meals into per-aisle grocery lines.
/// Ingredients are merged when both `item` and `unit` match exactly; no
/// normalisation or unit conversion is attempted, so `onion/count` and
/// `onion/cup` stay separate lines.
#[derive(Debug, Clone)]
pub struct GroceryAggregator {
    aisles: AisleOrder,
    first_weekday: Weekday,
}

impl Default for GroceryAggregator {
    fn default() -> Self {
        Self::new(AisleOrder::default(), Weekday::Sun)
    }
}

impl GroceryAggregator {
    /// `first_weekday` must match the calendar the weeks were cut from.
    pub fn new(aisles: AisleOrder, first_weekday: Weekday) -> Self {
        Self {
            aisles,
            first_weekday,
        }
    }

    pub fn aisles(&self) -> &AisleOrder {
        &self.aisles
    }

    /// Builds the report for `week`.
    ///
    /// Blank cells (days outside the month) are filled from the same column
    /// of `fallback`, normally the first week of the following month.
    pub fn aggregate(&self, week: &GridWeek, fallback: &GridWeek) -> ShoppingResult<GroceryReport> {
        let cells: Vec<&DayCell> = week
            .iter()
            .zip(fallback.iter())
            .map(|(cell, next)| if cell.is_blank() { next } else { cell })
            .collect();

        let days = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| DayEntry {
                weekday: weekday_at(self.first_weekday, column),
                name: cell.name().unwrap_or(NONE_LABEL).to_owned(),
            })
            .collect();

        let mut collected: Vec<HashMap<String, GroceryLine>> =
            vec![HashMap::new(); self.aisles.len()];

        for meal in cells.iter().copied().filter_map(DayCell::meal) {
            for ingredient in meal.ingredients() {
                let position = self.aisles.position(&ingredient.aisle).ok_or_else(|| {
                    ShoppingError::UnknownAisle {
                        meal: meal.name.clone(),
                        item: ingredient.item.clone(),
                        aisle: ingredient.aisle.clone(),
                    }
                })?;

                let line = collected[position]
                    .entry(line_key(&ingredient.item, &ingredient.unit))
                    .or_insert_with(|| GroceryLine {
                        item: ingredient.item.clone(),
                        unit: ingredient.unit.clone(),
                        quantity: 0.0,
                        meals: Vec::new(),
                    });
                line.quantity += ingredient.quantity;
                line.meals.push(meal.name.clone());
            }
        }

        let aisles: Vec<AisleSection> = self
            .aisles
            .labels()
            .iter()
            .zip(collected)
            .map(|(aisle, lines)| {
                let mut lines: Vec<(String, GroceryLine)> = lines.into_iter().collect();
                lines.sort_by(|a, b| a.0.cmp(&b.0));

                AisleSection {
                    aisle: aisle.clone(),
                    lines: lines.into_iter().map(|(_, line)| line).collect(),
                }
            })
            .collect();

        let report = GroceryReport { days, aisles };

        tracing::debug!(
            planned_days = cells.iter().filter(|cell| !cell.is_blank()).count(),
            lines = report.line_count(),
            "aggregated grocery list"
        );

        Ok(report)
    }

    /// Report for a selected week, resolving the primary and fallback rows
    /// from the month grids.
    pub fn aggregate_selection(
        &self,
        selection: &WeekSelection,
        grid: &MonthGrid,
        following: &MonthGrid,
    ) -> ShoppingResult<GroceryReport> {
        let (week, fallback) = selection.resolve(grid, following)?;
        self.aggregate(week, fallback)
    }
}

#[cfg(test)]
mod tests {
    use mealcal_recipe::{Ingredient, RecipeItem};

    use super::*;

    fn meal(name: &str, ingredients: Vec<Ingredient>) -> DayCell {
        DayCell::Meal(RecipeItem::new(name).with_ingredients(ingredients))
    }

    fn week(cells: [DayCell; 7]) -> GridWeek {
        cells
    }

    fn blank_week() -> GridWeek {
        GridWeek::default()
    }

    #[test]
    fn test_sums_same_item_and_unit() {
        let aggregator = GroceryAggregator::default();
        let primary = week([
            meal("Soup", vec![Ingredient::new("Produce", "onion", "count", 2.0)]),
            meal("Tart", vec![Ingredient::new("Produce", "onion", "count", 3.0)]),
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
        ]);

        let report = aggregator.aggregate(&primary, &blank_week()).unwrap();
        let produce = report.aisle("Produce").unwrap();

        assert_eq!(produce.lines.len(), 1);
        assert_eq!(produce.lines[0].quantity, 5.0);
        assert_eq!(produce.lines[0].meals, vec!["Soup", "Tart"]);
    }

    #[test]
    fn test_different_units_stay_separate() {
        let aggregator = GroceryAggregator::default();
        let primary = week([
            meal(
                "Soup",
                vec![
                    Ingredient::new("Produce", "onion", "count", 1.0),
                    Ingredient::new("Produce", "onion", "cup", 0.5),
                ],
            ),
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
        ]);

        let report = aggregator.aggregate(&primary, &blank_week()).unwrap();

        assert_eq!(report.aisle("Produce").unwrap().lines.len(), 2);
    }

    #[test]
    fn test_same_meal_twice_lists_twice() {
        let aggregator = GroceryAggregator::default();
        let primary = week([
            meal(
                "Soup",
                vec![
                    Ingredient::new("Produce", "onion", "count", 1.0),
                    Ingredient::new("Produce", "onion", "count", 1.0),
                ],
            ),
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
            DayCell::Blank,
        ]);

        let report = aggregator.aggregate(&primary, &blank_week()).unwrap();
        let line = &report.aisle("Produce").unwrap().lines[0];

        assert_eq!(line.quantity, 2.0);
        assert_eq!(line.meals, vec!["Soup", "Soup"]);
    }

    #[test]
    fn test_fixed_and_missing_days_are_named() {
        let aggregator = GroceryAggregator::default();
        let mut primary = blank_week();
        primary[4] = DayCell::Fixed("Leftovers".to_owned());

        let report = aggregator.aggregate(&primary, &blank_week()).unwrap();

        assert_eq!(report.days[0].weekday, Weekday::Sun);
        assert_eq!(report.days[0].name, "NONE");
        assert_eq!(report.days[4].name, "Leftovers");
        assert_eq!(report.line_count(), 0);
    }

    #[test]
    fn test_unknown_aisle() {
        let aggregator = GroceryAggregator::default();
        let mut primary = blank_week();
        primary[2] = meal("Soup", vec![Ingredient::new("Garden", "leek", "count", 1.0)]);

        let err = aggregator.aggregate(&primary, &blank_week()).unwrap_err();

        assert!(matches!(
            err,
            ShoppingError::UnknownAisle { ref meal, ref item, ref aisle }
                if meal == "Soup" && item == "leek" && aisle == "Garden"
        ));
    }

    #[test]
    fn test_monday_first_labels() {
        let aggregator = GroceryAggregator::new(AisleOrder::default(), Weekday::Mon);

        let report = aggregator.aggregate(&blank_week(), &blank_week()).unwrap();

        assert_eq!(report.days[0].weekday, Weekday::Mon);
        assert_eq!(report.days[6].weekday, Weekday::Sun);
    }
}
