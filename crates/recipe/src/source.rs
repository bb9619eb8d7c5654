use std::path::PathBuf;

use crate::{RecipeBook, RecipeResult};

/// Somewhere a recipe book can be loaded from.
///
/// Every month generation starts from a freshly loaded book, so implementations
/// must return an unshared copy on each call.
pub trait RecipeSource {
    fn load(&self) -> RecipeResult<RecipeBook>;
}

/// Reads the recipe book from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl RecipeSource for JsonFileSource {
    fn load(&self) -> RecipeResult<RecipeBook> {
        tracing::debug!(path = %self.path.display(), "loading recipe book");
        RecipeBook::from_path(&self.path)
    }
}

impl RecipeSource for RecipeBook {
    fn load(&self) -> RecipeResult<RecipeBook> {
        Ok(self.clone())
    }
}
