mod book;
mod error;
mod source;
mod types;

pub use book::RecipeBook;
pub use error::{RecipeError, RecipeResult};
pub use source::{JsonFileSource, RecipeSource};
pub use types::{DEFAULT_UNITS, Ingredient, REPEATABLE_CATEGORY, RecipeGroup, RecipeItem};
