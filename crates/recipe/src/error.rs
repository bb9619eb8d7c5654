use thiserror::Error;

pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Failed to read recipes: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid recipe in group '{group}', item '{item}': {reason}")]
    InvalidItem {
        group: String,
        item: String,
        reason: String,
    },

    #[error("Recipe group '{0}' has no items")]
    EmptyGroup(String),

    #[error("Recipe book is empty")]
    EmptyBook,
}

impl RecipeError {
    pub(crate) fn invalid_item(group: &str, item: &str, reason: impl Into<String>) -> Self {
        Self::InvalidItem {
            group: group.to_owned(),
            item: item.to_owned(),
            reason: reason.into(),
        }
    }
}
