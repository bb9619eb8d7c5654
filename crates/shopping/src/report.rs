use std::fmt;

use chrono::Weekday;
use serde::Serialize;

/// Label printed for a day that has nothing planned.
pub const NONE_LABEL: &str = "NONE";

/// One day of the week being shopped for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub weekday: Weekday,
    pub name: String,
}

impl fmt::Display for DayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "* {}: {}", weekday_name(self.weekday), self.name)
    }
}

/// Total quantity of one `(item, unit)` pair and the meals that need it.
///
/// `meals` keeps one entry per contributing ingredient, so a meal that lists
/// the same item twice shows up twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryLine {
    pub item: String,
    pub unit: String,
    pub quantity: f64,
    pub meals: Vec<String>,
}

impl GroceryLine {
    /// Ordering key within an aisle.
    pub fn sort_key(&self) -> String {
        line_key(&self.item, &self.unit)
    }
}

pub(crate) fn line_key(item: &str, unit: &str) -> String {
    format!("{item}__{unit}")
}

impl fmt::Display for GroceryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "* {} {}: {} ({})",
            self.quantity,
            self.unit,
            self.item,
            self.meals.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AisleSection {
    pub aisle: String,
    pub lines: Vec<GroceryLine>,
}

impl AisleSection {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for AisleSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.aisle)?;

        if self.lines.is_empty() {
            return f.write_str(NONE_LABEL);
        }

        let lines = self
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&lines)
    }
}

/// The week's meals followed by the grocery list, one section per aisle.
///
/// Rendered with `Display`:
///
/// ```text
/// Meals:
/// * Sunday: Onion Soup
/// ...
///
/// Produce:
/// * 5 count: onion (Onion Soup, Onion Tart)
///
/// Meat & Yogurt:
/// NONE
/// ```
///
/// Every block, including the last, ends with a blank line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryReport {
    pub days: Vec<DayEntry>,
    pub aisles: Vec<AisleSection>,
}

impl GroceryReport {
    pub fn aisle(&self, label: &str) -> Option<&AisleSection> {
        self.aisles.iter().find(|section| section.aisle == label)
    }

    pub fn line_count(&self) -> usize {
        self.aisles.iter().map(|section| section.lines.len()).sum()
    }
}

impl fmt::Display for GroceryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meals:")?;
        let days = self
            .days
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{days}\n\n")?;

        for section in &self.aisles {
            write!(f, "{section}\n\n")?;
        }

        Ok(())
    }
}

/// Full English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str, unit: &str, quantity: f64, meals: &[&str]) -> GroceryLine {
        GroceryLine {
            item: item.to_owned(),
            unit: unit.to_owned(),
            quantity,
            meals: meals.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    #[test]
    fn test_line_format() {
        let line = line("onion", "count", 5.0, &["Soup", "Tart"]);

        assert_eq!(line.to_string(), "* 5 count: onion (Soup, Tart)");
    }

    #[test]
    fn test_fractional_quantity() {
        let line = line("milk", "cup", 2.5, &["Pancakes"]);

        assert_eq!(line.to_string(), "* 2.5 cup: milk (Pancakes)");
    }

    #[test]
    fn test_empty_section_prints_none() {
        let section = AisleSection {
            aisle: "Produce".to_owned(),
            lines: vec![],
        };

        assert_eq!(section.to_string(), "Produce:\nNONE");
    }

    #[test]
    fn test_report_layout() {
        let report = GroceryReport {
            days: vec![
                DayEntry {
                    weekday: Weekday::Sun,
                    name: "Soup".to_owned(),
                },
                DayEntry {
                    weekday: Weekday::Mon,
                    name: "Out".to_owned(),
                },
            ],
            aisles: vec![
                AisleSection {
                    aisle: "Produce".to_owned(),
                    lines: vec![
                        line("leek", "count", 1.0, &["Soup"]),
                        line("onion", "count", 2.0, &["Soup"]),
                    ],
                },
                AisleSection {
                    aisle: "Meat & Yogurt".to_owned(),
                    lines: vec![],
                },
            ],
        };

        assert_eq!(
            report.to_string(),
            "Meals:\n* Sunday: Soup\n* Monday: Out\n\n\
             Produce:\n* 1 count: leek (Soup)\n* 2 count: onion (Soup)\n\n\
             Meat & Yogurt:\nNONE\n\n"
        );
        assert_eq!(report.line_count(), 2);
        assert!(report.aisle("Meat & Yogurt").unwrap().is_empty());
    }

    #[test]
    fn test_sort_key_joins_item_and_unit() {
        assert_eq!(line("egg", "count", 1.0, &[]).sort_key(), "egg__count");
    }
}
