//! Server configuration from the environment

use tracing::warn;
use unitwise::Category;
use unitwise_core::{DEFAULT_FRACTION_DIGITS, MAX_FRACTION_DIGITS};

pub const FRACTION_DIGITS_VAR: &str = "UNITWISE_FRACTION_DIGITS";
pub const DEFAULT_CATEGORY_VAR: &str = "UNITWISE_DEFAULT_CATEGORY";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Fractional digits in formatted results
    pub fraction_digits: u32,
    /// Category used by list_units when the caller names none
    pub default_category: Category,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            default_category: Category::Length,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Bad values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(FRACTION_DIGITS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(d) if d <= MAX_FRACTION_DIGITS => config.fraction_digits = d,
                _ => warn!(
                    var = FRACTION_DIGITS_VAR,
                    value = %raw,
                    max = MAX_FRACTION_DIGITS,
                    "ignoring invalid fraction digits"
                ),
            }
        }

        if let Some(raw) = lookup(DEFAULT_CATEGORY_VAR) {
            match Category::from_key(raw.trim()) {
                Some(category) => config.default_category = category,
                None => warn!(var = DEFAULT_CATEGORY_VAR, value = %raw, "ignoring unknown category"),
            }
        }

        config
    }
}
