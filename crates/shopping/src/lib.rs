//! Weekly grocery lists built from a meal plan, grouped by store aisle.

mod aggregation;
mod aisle;
mod error;
mod report;

pub use aggregation::GroceryAggregator;
pub use aisle::{AisleOrder, DEFAULT_AISLES};
pub use error::{ShoppingError, ShoppingResult};
pub use report::{AisleSection, DayEntry, GroceryLine, GroceryReport, weekday_name};
