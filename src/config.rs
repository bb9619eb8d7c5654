use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use chrono::Weekday;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealcal_mealplan::{FixedDay, ReadmissionPolicy, SchedulerConfig};
use mealcal_recipe::{DEFAULT_UNITS, REPEATABLE_CATEGORY};
use mealcal_shopping::{AisleOrder, DEFAULT_AISLES, ShoppingResult};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub readmission: ReadmissionConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    /// JSON file holding the recipe groups
    #[serde(default = "default_recipes_path")]
    pub path: PathBuf,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            path: default_recipes_path(),
        }
    }
}

fn default_recipes_path() -> PathBuf {
    PathBuf::from("recipes.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    #[serde(default = "default_first_weekday")]
    pub first_weekday: Weekday,
    /// Weekdays that never get a drawn meal
    #[serde(default = "default_fixed_days")]
    pub fixed_days: Vec<FixedDay>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: default_first_weekday(),
            fixed_days: default_fixed_days(),
        }
    }
}

fn default_first_weekday() -> Weekday {
    Weekday::Sun
}

fn default_fixed_days() -> Vec<FixedDay> {
    SchedulerConfig::default().fixed_days
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReadmissionConfig {
    #[serde(default = "default_readmission_category")]
    pub category: String,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_roll_max")]
    pub roll_max: u32,
    #[serde(default = "default_min_pool")]
    pub min_pool: usize,
}

impl Default for ReadmissionConfig {
    fn default() -> Self {
        Self {
            category: default_readmission_category(),
            threshold: default_threshold(),
            roll_max: default_roll_max(),
            min_pool: default_min_pool(),
        }
    }
}

fn default_readmission_category() -> String {
    REPEATABLE_CATEGORY.to_string()
}

fn default_threshold() -> u32 {
    40
}

fn default_roll_max() -> u32 {
    100
}

fn default_min_pool() -> usize {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    /// Aisle labels in store walking order
    #[serde(default = "default_aisles")]
    pub aisles: Vec<String>,
    /// Units an ingredient may be measured in, matched exactly
    #[serde(default = "default_units")]
    pub units: Vec<String>,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            aisles: default_aisles(),
            units: default_units(),
        }
    }
}

fn default_aisles() -> Vec<String> {
    DEFAULT_AISLES.iter().map(|aisle| aisle.to_string()).collect()
}

fn default_units() -> Vec<String> {
    DEFAULT_UNITS.iter().map(|unit| unit.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of the console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALCAL__RECIPES__PATH, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH`, or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("recipes.path", "recipes.json")?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json", false)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file falls back to defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALCAL")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy variable without prefix
        if let Ok(recipes_path) = env::var("RECIPES_PATH") {
            builder = builder.set_override("recipes.path", recipes_path)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.recipes.path.as_os_str().is_empty() {
            return Err("Recipes path cannot be empty".to_string());
        }

        self.aisle_order().map_err(|e| e.to_string())?;

        if self.shopping.units.is_empty() {
            return Err("Unit list cannot be empty".to_string());
        }
        let mut units = HashSet::new();
        for unit in &self.shopping.units {
            if unit.trim().is_empty() {
                return Err("Unit names cannot be blank".to_string());
            }
            if !units.insert(unit.as_str()) {
                return Err(format!("Unit '{unit}' is listed twice"));
            }
        }

        if self.readmission.threshold > self.readmission.roll_max {
            return Err(format!(
                "Readmission threshold {} is above roll_max {}",
                self.readmission.threshold, self.readmission.roll_max
            ));
        }

        let mut weekdays = HashSet::new();
        for fixed in &self.calendar.fixed_days {
            if fixed.label.trim().is_empty() {
                return Err(format!("Fixed day {} needs a label", fixed.weekday));
            }
            if !weekdays.insert(fixed.weekday) {
                return Err(format!("Fixed day {} is listed twice", fixed.weekday));
            }
        }

        if weekdays.len() == 7 {
            return Err("Every weekday is fixed, no meals would be planned".to_string());
        }

        Ok(())
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            first_weekday: self.calendar.first_weekday,
            fixed_days: self.calendar.fixed_days.clone(),
            readmission: ReadmissionPolicy {
                category: self.readmission.category.clone(),
                threshold: self.readmission.threshold,
                roll_max: self.readmission.roll_max,
                min_pool: self.readmission.min_pool,
            },
        }
    }

    pub fn aisle_order(&self) -> ShoppingResult<AisleOrder> {
        AisleOrder::new(self.shopping.aisles.iter().cloned())
    }
}
