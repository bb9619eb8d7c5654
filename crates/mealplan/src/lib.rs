//! Month meal planning: a recipe pool that draws without repeating a group
//! until every group has had a turn, and a scheduler that walks a month's
//! calendar assigning one meal per day.

pub mod calendar;
mod error;
pub mod pool;
pub mod scheduler;
pub mod week;

pub use calendar::{MonthCalendar, next_month};
pub use error::{MealPlanError, MealPlanResult};
pub use pool::{GroupId, RecipePool};
pub use scheduler::{
    DayCell, Draw, FixedDay, GridWeek, MonthGrid, MonthScheduler, ReadmissionPolicy,
    SchedulerConfig, seed_for,
};
pub use week::WeekSelection;
