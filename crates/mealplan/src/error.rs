use thiserror::Error;

pub type MealPlanResult<T> = Result<T, MealPlanError>;

#[derive(Error, Debug)]
pub enum MealPlanError {
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid day: {year}-{month:02}-{day:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Week {week} is outside {year}-{month:02}")]
    WeekOutOfRange { year: i32, month: u32, week: usize },

    #[error("Month grids do not line up: {0}")]
    GridMismatch(String),

    #[error("Ran out of recipes on {year}-{month:02}-{day:02}: every group has been used up")]
    RecipesExhausted { year: i32, month: u32, day: u32 },

    #[error("Recipe pool invariant violated: {0}")]
    PoolInvariant(String),
}
