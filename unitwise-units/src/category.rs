//! Unit categories
//!
//! The set is closed: every unit belongs to exactly one category, and a
//! conversion never crosses categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::unit::{AreaUnit, LengthUnit, TemperatureUnit, Unit, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Area,
    Temperature,
    Weight,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Area,
        Category::Temperature,
        Category::Weight,
    ];

    /// Key used on the wire and in the unit table
    pub const fn key(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Area => "area",
            Category::Temperature => "temperature",
            Category::Weight => "weight",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Area => "Area",
            Category::Temperature => "Temperature",
            Category::Weight => "Weight",
        }
    }

    /// Look up a category by its exact key
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Base unit for linear categories; the Kelvin reference scale for temperature
    pub const fn base_unit(self) -> Unit {
        match self {
            Category::Length => Unit::Length(LengthUnit::Meter),
            Category::Area => Unit::Area(AreaUnit::SquareMeter),
            Category::Temperature => Unit::Temperature(TemperatureUnit::Kelvin),
            Category::Weight => Unit::Weight(WeightUnit::Kilogram),
        }
    }

    /// Linear categories convert by a ratio of factors; temperature does not
    pub const fn is_linear(self) -> bool {
        !matches!(self, Category::Temperature)
    }

    /// Units of this category in table order
    pub fn units(self) -> Vec<Unit> {
        match self {
            Category::Length => LengthUnit::ALL.into_iter().map(Unit::Length).collect(),
            Category::Area => AreaUnit::ALL.into_iter().map(Unit::Area).collect(),
            Category::Temperature => TemperatureUnit::ALL.into_iter().map(Unit::Temperature).collect(),
            Category::Weight => WeightUnit::ALL.into_iter().map(Unit::Weight).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(Category::from_key("length"), Some(Category::Length));
        assert_eq!(Category::from_key("temperature"), Some(Category::Temperature));
        assert_eq!(Category::from_key("Length"), None);
        assert_eq!(Category::from_key("volume"), None);
    }

    #[test]
    fn test_unit_counts() {
        assert_eq!(Category::Length.units().len(), 10);
        assert_eq!(Category::Area.units().len(), 10);
        assert_eq!(Category::Temperature.units().len(), 3);
        assert_eq!(Category::Weight.units().len(), 8);
    }

    #[test]
    fn test_base_unit_belongs_to_category() {
        for category in Category::ALL {
            assert_eq!(category.base_unit().category(), category);
        }
    }

    #[test]
    fn test_is_linear() {
        assert!(Category::Length.is_linear());
        assert!(!Category::Temperature.is_linear());
    }

    #[test]
    fn test_serde_key() {
        let json = serde_json::to_string(&Category::Weight).unwrap();
        assert_eq!(json, "\"weight\"");
    }
}
