//! Display names for unit option lists

use serde::{Deserialize, Serialize};

use crate::units::UNITS;
use crate::Category;

/// One entry of a unit picker: the key to submit and the label to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOption {
    pub value: String,
    pub label: String,
}

/// Label for a unit key. Area keys spelled "square…" read as "Square …".
pub fn display_name(category: Category, key: &str) -> String {
    if category == Category::Area {
        if let Some(rest) = key.strip_prefix("square") {
            return format!("Square {}", capitalize(rest));
        }
    }
    capitalize(key)
}

/// Split camelCase with a space and uppercase the first character
pub fn capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut prev_lower = false;

    for (i, c) in word.chars().enumerate() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

/// Options for every unit of `category`, in table order
pub fn unit_options(category: Category) -> Vec<UnitOption> {
    UNITS
        .by_category(category)
        .iter()
        .map(|unit| UnitOption {
            value: unit.key().to_string(),
            label: display_name(category, unit.key()),
        })
        .collect()
}
