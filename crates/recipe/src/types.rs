use serde::{Deserialize, Serialize};

/// Category label that lets a group re-enter the draw right after being used.
pub const REPEATABLE_CATEGORY: &str = "Multiple okay";

/// Units an ingredient may be measured in unless configured otherwise.
///
/// Grocery lines merge only on an exact `(item, unit)` match, so units are
/// compared case-sensitively.
pub const DEFAULT_UNITS: [&str; 7] = ["gram", "lb", "oz", "cup", "tbsp", "tsp", "count"];

/// A themed bundle of interchangeable recipes competing as one unit for a
/// calendar slot.
///
/// `items` is treated as a randomized stack: it is shuffled in place and then
/// consumed from the end, so the last item is always the next one served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeGroup {
    pub category: String,
    pub items: Vec<RecipeItem>,
}

impl RecipeGroup {
    pub fn new(category: impl Into<String>, items: Vec<RecipeItem>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }

    /// Removes and returns the next item (the last one).
    pub fn pop_item(&mut self) -> Option<RecipeItem> {
        self.items.pop()
    }

    pub fn is_exhausted(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_category(&self, category: &str) -> bool {
        self.category == category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl RecipeItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            ingredients: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    /// Ingredients of this recipe, empty when none were recorded.
    pub fn ingredients(&self) -> &[Ingredient] {
        self.ingredients.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    pub aisle: String,
    pub item: String,
    pub unit: String,
    pub quantity: f64,
}

impl Ingredient {
    pub fn new(
        aisle: impl Into<String>,
        item: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            aisle: aisle.into(),
            item: item.into(),
            unit: unit.into(),
            quantity,
        }
    }
}
