use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ShoppingError, ShoppingResult};

/// Aisles in the order a shopper walks the store, not alphabetical.
pub const DEFAULT_AISLES: [&str; 9] = [
    "Cheese & Bakery",
    "18 & 19 (Alcohol, Butter, Cheese)",
    "16 & 17 (Freezer)",
    "10-15 (No Food Items)",
    "6-9 (Bevs & Snacks)",
    "3-5 (Breakfast & Baking)",
    "1 & 2 (Pasta, Global, Canned)",
    "Produce",
    "Meat & Yogurt",
];

/// Canonical aisle list; grocery reports print one section per label in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AisleOrder {
    labels: Vec<String>,
}

impl AisleOrder {
    /// Fails on an empty list, a blank label or a repeated label.
    pub fn new<I, S>(labels: I) -> ShoppingResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(ShoppingError::InvalidAisles(
                "at least one aisle is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.trim().is_empty() {
                return Err(ShoppingError::InvalidAisles(
                    "aisle labels cannot be blank".to_owned(),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(ShoppingError::InvalidAisles(format!(
                    "aisle '{label}' is listed twice"
                )));
            }
        }

        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, aisle: &str) -> bool {
        self.position(aisle).is_some()
    }

    pub fn position(&self, aisle: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == aisle)
    }
}

impl Default for AisleOrder {
    fn default() -> Self {
        Self {
            labels: DEFAULT_AISLES.iter().map(|label| (*label).to_owned()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for AisleOrder {
    type Error = ShoppingError;

    fn try_from(labels: Vec<String>) -> ShoppingResult<Self> {
        Self::new(labels)
    }
}

impl From<AisleOrder> for Vec<String> {
    fn from(order: AisleOrder) -> Self {
        order.labels
    }
}
