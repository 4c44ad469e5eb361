//! Unit definitions - the conversion table
//!
//! Linear categories (length, area, weight) store, for each unit, how many
//! base units one of it equals. Temperature stores a pair of affine functions
//! per unit that move a value onto and off the Kelvin reference scale.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::unit::{AreaUnit, LengthUnit, TemperatureUnit, WeightUnit};
use crate::{Category, Unit};

/// Global key index over the table
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

impl LengthUnit {
    /// Meters in one of this unit
    pub const fn factor(self) -> f64 {
        match self {
            LengthUnit::Kilometer => 1000.0,
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Micrometer => 1e-6,
            LengthUnit::Nanometer => 1e-9,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
            LengthUnit::Yard => 0.9144,
            LengthUnit::Mile => 1609.344,
            LengthUnit::NauticalMile => 1852.0,
        }
    }
}

impl AreaUnit {
    /// Square meters in one of this unit
    pub const fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareKilometer => 1e6,
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareCentimeter => 0.0001,
            AreaUnit::SquareMillimeter => 0.000001,
            AreaUnit::Hectare => 10000.0,
            AreaUnit::Acre => 4046.8564224,
            AreaUnit::SquareMile => 2.59e6,
            AreaUnit::SquareYard => 0.836127,
            AreaUnit::SquareFoot => 0.092903,
            AreaUnit::SquareInch => 0.00064516,
        }
    }
}

impl WeightUnit {
    /// Kilograms in one of this unit
    pub const fn factor(self) -> f64 {
        match self {
            WeightUnit::Kilogram => 1.0,
            WeightUnit::Gram => 0.001,
            WeightUnit::Milligram => 1e-6,
            WeightUnit::Microgram => 1e-9,
            WeightUnit::Ton => 1000.0,
            WeightUnit::Pound => 0.453592,
            WeightUnit::Ounce => 0.0283495,
            WeightUnit::Stone => 6.35029,
        }
    }
}

/// Maps a temperature onto and off the Kelvin reference scale
#[derive(Clone, Copy)]
pub struct AffinePair {
    pub to_reference: fn(f64) -> f64,
    pub from_reference: fn(f64) -> f64,
}

impl TemperatureUnit {
    pub fn affine(self) -> AffinePair {
        match self {
            TemperatureUnit::Celsius => AffinePair {
                to_reference: |v| v + 273.15,
                from_reference: |k| k - 273.15,
            },
            TemperatureUnit::Fahrenheit => AffinePair {
                to_reference: |v| (v - 32.0) * (5.0 / 9.0) + 273.15,
                from_reference: |k| (k - 273.15) * (9.0 / 5.0) + 32.0,
            },
            TemperatureUnit::Kelvin => AffinePair {
                to_reference: |v| v,
                from_reference: |k| k,
            },
        }
    }
}

impl Unit {
    /// Base units in one of this unit; `None` for temperature
    pub const fn factor(self) -> Option<f64> {
        match self {
            Unit::Length(u) => Some(u.factor()),
            Unit::Area(u) => Some(u.factor()),
            Unit::Weight(u) => Some(u.factor()),
            Unit::Temperature(_) => None,
        }
    }
}

/// Registry of all known unit keys
pub struct UnitRegistry {
    units: HashMap<&'static str, Unit>,
    by_category: HashMap<Category, Vec<Unit>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            by_category: HashMap::new(),
        };
        for category in Category::ALL {
            registry.register_category(category);
        }
        registry
    }

    fn register_category(&mut self, category: Category) {
        let units = category.units();
        for unit in &units {
            self.units.insert(unit.key(), *unit);
        }
        self.by_category.insert(category, units);
    }

    /// Get a unit by its exact key
    pub fn get(&self, key: &str) -> Option<Unit> {
        self.units.get(key).copied()
    }

    /// Units of a category in table order
    pub fn by_category(&self, category: Category) -> &[Unit] {
        self.by_category
            .get(&category)
            .map(|units| units.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_base_factor_is_exactly_one() {
        for category in Category::ALL.into_iter().filter(|c| c.is_linear()) {
            assert_eq!(category.base_unit().factor(), Some(1.0), "{}", category);
        }
    }

    #[test]
    fn test_linear_factors_positive() {
        for category in Category::ALL.into_iter().filter(|c| c.is_linear()) {
            for unit in category.units() {
                let factor = unit.factor().unwrap();
                assert!(factor > 0.0 && factor.is_finite(), "{} has factor {}", unit, factor);
            }
        }
    }

    #[test]
    fn test_temperature_has_no_factor() {
        for unit in Category::Temperature.units() {
            assert_eq!(unit.factor(), None);
        }
    }

    #[test]
    fn test_affine_pairs_invert() {
        for unit in TemperatureUnit::ALL {
            let pair = unit.affine();
            for v in [-459.67, -40.0, 0.0, 36.6, 100.0, 1e6] {
                let back = (pair.from_reference)((pair.to_reference)(v));
                assert!(close(back, v), "{}: {} -> {}", unit.key(), v, back);
            }
        }
    }

    #[test]
    fn test_reference_points() {
        assert_eq!((TemperatureUnit::Celsius.affine().to_reference)(0.0), 273.15);
        assert!(close((TemperatureUnit::Fahrenheit.affine().to_reference)(32.0), 273.15));
        assert_eq!((TemperatureUnit::Kelvin.affine().to_reference)(5.0), 5.0);
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(UNITS.get("hectare"), Some(Unit::Area(AreaUnit::Hectare)));
        assert_eq!(UNITS.get("Hectare"), None);
        assert_eq!(UNITS.get("lb"), None);
        assert_eq!(UNITS.len(), 31);
        assert!(!UNITS.is_empty());
    }

    #[test]
    fn test_registry_table_order() {
        let weights = UNITS.by_category(Category::Weight);
        assert_eq!(weights.first().map(|u| u.key()), Some("kilogram"));
        assert_eq!(weights.last().map(|u| u.key()), Some("stone"));
    }
}
