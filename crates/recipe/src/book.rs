use std::io::Read;
use std::path::Path;

use crate::{RecipeError, RecipeGroup, RecipeItem, RecipeResult};

/// The full set of recipe groups as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeBook {
    groups: Vec<RecipeGroup>,
}

impl RecipeBook {
    pub fn new(groups: Vec<RecipeGroup>) -> Self {
        Self { groups }
    }

    /// Parses a JSON array of recipe groups.
    pub fn from_json_str(json: &str) -> RecipeResult<Self> {
        let groups: Vec<RecipeGroup> = serde_json::from_str(json)?;
        Ok(Self::new(groups))
    }

    pub fn from_reader(reader: impl Read) -> RecipeResult<Self> {
        let groups: Vec<RecipeGroup> = serde_json::from_reader(reader)?;
        Ok(Self::new(groups))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RecipeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn groups(&self) -> &[RecipeGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<RecipeGroup> {
        self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Checks every group, item and ingredient, failing on the first problem.
    ///
    /// `aisles` is the list of valid aisle labels and `units` the list of
    /// valid units; an ingredient using anything else is rejected.
    pub fn validate<A: AsRef<str>, U: AsRef<str>>(
        &self,
        aisles: &[A],
        units: &[U],
    ) -> RecipeResult<()> {
        if self.groups.is_empty() {
            return Err(RecipeError::EmptyBook);
        }

        for group in &self.groups {
            if group.items.is_empty() {
                return Err(RecipeError::EmptyGroup(group.category.clone()));
            }

            for item in &group.items {
                validate_item(group, item, aisles, units)?;
            }
        }

        tracing::debug!(
            groups = self.group_count(),
            items = self.item_count(),
            "recipe book validated"
        );

        Ok(())
    }
}

fn validate_item<A: AsRef<str>, U: AsRef<str>>(
    group: &RecipeGroup,
    item: &RecipeItem,
    aisles: &[A],
    units: &[U],
) -> RecipeResult<()> {
    if item.name.trim().is_empty() {
        return Err(RecipeError::invalid_item(
            &group.category,
            &item.name,
            "recipe name cannot be empty",
        ));
    }

    for ingredient in item.ingredients() {
        let reason = if ingredient.item.trim().is_empty() {
            Some("ingredient item cannot be empty".to_owned())
        } else if ingredient.unit.trim().is_empty() {
            Some(format!("unit of '{}' cannot be empty", ingredient.item))
        } else if !units.iter().any(|u| u.as_ref() == ingredient.unit) {
            Some(format!(
                "unknown unit '{}' for '{}'",
                ingredient.unit, ingredient.item
            ))
        } else if !ingredient.quantity.is_finite() || ingredient.quantity <= 0.0 {
            Some(format!(
                "quantity of '{}' must be greater than zero, got {}",
                ingredient.item, ingredient.quantity
            ))
        } else if !aisles.iter().any(|a| a.as_ref() == ingredient.aisle) {
            Some(format!(
                "unknown aisle '{}' for '{}'",
                ingredient.aisle, ingredient.item
            ))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(RecipeError::invalid_item(&group.category, &item.name, reason));
        }
    }

    Ok(())
}
