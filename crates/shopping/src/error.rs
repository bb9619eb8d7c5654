use mealcal_mealplan::MealPlanError;
use thiserror::Error;

pub type ShoppingResult<T> = Result<T, ShoppingError>;

#[derive(Debug, Error)]
pub enum ShoppingError {
    #[error("Ingredient '{item}' of '{meal}' is shelved in unknown aisle '{aisle}'")]
    UnknownAisle {
        meal: String,
        item: String,
        aisle: String,
    },

    #[error("Invalid aisle list: {0}")]
    InvalidAisles(String),

    #[error("Cannot select week: {0}")]
    Week(#[from] MealPlanError),
}
