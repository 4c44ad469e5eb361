//! Unit representation: a tagged union of category × unit

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unitwise_core::{ErrorKind, UnitwiseError};

use crate::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Kilometer,
    Meter,
    Centimeter,
    Micrometer,
    Nanometer,
    Inch,
    Foot,
    Yard,
    Mile,
    NauticalMile,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 10] = [
        LengthUnit::Kilometer,
        LengthUnit::Meter,
        LengthUnit::Centimeter,
        LengthUnit::Micrometer,
        LengthUnit::Nanometer,
        LengthUnit::Inch,
        LengthUnit::Foot,
        LengthUnit::Yard,
        LengthUnit::Mile,
        LengthUnit::NauticalMile,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            LengthUnit::Kilometer => "kilometer",
            LengthUnit::Meter => "meter",
            LengthUnit::Centimeter => "centimeter",
            LengthUnit::Micrometer => "micrometer",
            LengthUnit::Nanometer => "nanometer",
            LengthUnit::Inch => "inch",
            LengthUnit::Foot => "foot",
            LengthUnit::Yard => "yard",
            LengthUnit::Mile => "mile",
            LengthUnit::NauticalMile => "nauticalmile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    SquareKilometer,
    SquareMeter,
    SquareCentimeter,
    SquareMillimeter,
    Hectare,
    Acre,
    SquareMile,
    SquareYard,
    SquareFoot,
    SquareInch,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 10] = [
        AreaUnit::SquareKilometer,
        AreaUnit::SquareMeter,
        AreaUnit::SquareCentimeter,
        AreaUnit::SquareMillimeter,
        AreaUnit::Hectare,
        AreaUnit::Acre,
        AreaUnit::SquareMile,
        AreaUnit::SquareYard,
        AreaUnit::SquareFoot,
        AreaUnit::SquareInch,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            AreaUnit::SquareKilometer => "squarekilometer",
            AreaUnit::SquareMeter => "squaremeter",
            AreaUnit::SquareCentimeter => "squarecentimeter",
            AreaUnit::SquareMillimeter => "squaremillimeter",
            AreaUnit::Hectare => "hectare",
            AreaUnit::Acre => "acre",
            AreaUnit::SquareMile => "squaremile",
            AreaUnit::SquareYard => "squareyard",
            AreaUnit::SquareFoot => "squarefoot",
            AreaUnit::SquareInch => "squareinch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kilogram,
    Gram,
    Milligram,
    Microgram,
    Ton,
    Pound,
    Ounce,
    Stone,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 8] = [
        WeightUnit::Kilogram,
        WeightUnit::Gram,
        WeightUnit::Milligram,
        WeightUnit::Microgram,
        WeightUnit::Ton,
        WeightUnit::Pound,
        WeightUnit::Ounce,
        WeightUnit::Stone,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kilogram",
            WeightUnit::Gram => "gram",
            WeightUnit::Milligram => "milligram",
            WeightUnit::Microgram => "microgram",
            WeightUnit::Ton => "ton",
            WeightUnit::Pound => "pound",
            WeightUnit::Ounce => "ounce",
            WeightUnit::Stone => "stone",
        }
    }
}

/// A unit together with the category it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit", rename_all = "lowercase")]
pub enum Unit {
    Length(LengthUnit),
    Area(AreaUnit),
    Temperature(TemperatureUnit),
    Weight(WeightUnit),
}

impl Unit {
    pub const fn category(self) -> Category {
        match self {
            Unit::Length(_) => Category::Length,
            Unit::Area(_) => Category::Area,
            Unit::Temperature(_) => Category::Temperature,
            Unit::Weight(_) => Category::Weight,
        }
    }

    /// The unit's key in the table (e.g. "nauticalmile")
    pub const fn key(self) -> &'static str {
        match self {
            Unit::Length(u) => u.key(),
            Unit::Area(u) => u.key(),
            Unit::Temperature(u) => u.key(),
            Unit::Weight(u) => u.key(),
        }
    }

    /// Human-readable name for option lists (e.g. "Square Meter")
    pub fn label(self) -> String {
        crate::display::display_name(self.category(), self.key())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown {category} unit: {unit}")]
    UnknownUnit { unit: String, category: String },

    #[error("unit {unit} is a {actual} unit, not {expected}")]
    CategoryMismatch {
        unit: String,
        expected: Category,
        actual: Category,
    },

    #[error("value must be a finite number, got {0}")]
    NonFiniteValue(f64),

    #[error("converting {value} {from} to {to} leaves the representable range")]
    OutOfRange { value: f64, from: Unit, to: Unit },

    #[error("invalid conversion: {0}")]
    InvalidConversion(String),
}

impl ConversionError {
    /// Every conversion failure is the caller's to fix
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

impl From<ConversionError> for UnitwiseError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::UnknownCategory(key) => UnitwiseError::unknown_category(key),
            ConversionError::UnknownUnit { unit, category } => UnitwiseError::unknown_unit(unit, category),
            ConversionError::CategoryMismatch { expected, .. } => {
                UnitwiseError::invalid_argument(err.to_string())
                    .with_suggestion(format!("Use list_units(\"{}\") to see valid units", expected))
            }
            _ => UnitwiseError::invalid_argument(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitwise_core::codes;

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = Category::ALL
            .into_iter()
            .flat_map(|c| c.units())
            .map(|u| u.key())
            .collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 31);
    }

    #[test]
    fn test_category_of_unit() {
        assert_eq!(Unit::Length(LengthUnit::Mile).category(), Category::Length);
        assert_eq!(Unit::Temperature(TemperatureUnit::Kelvin).category(), Category::Temperature);
    }

    #[test]
    fn test_serde_matches_key() {
        for category in Category::ALL {
            for unit in category.units() {
                let json = serde_json::to_value(unit).unwrap();
                assert_eq!(json["category"], category.key());
                assert_eq!(json["unit"], unit.key());
            }
        }
    }

    #[test]
    fn test_display_is_key() {
        assert_eq!(Unit::Area(AreaUnit::SquareFoot).to_string(), "squarefoot");
    }

    #[test]
    fn test_error_kind_and_mapping() {
        let err = ConversionError::UnknownUnit {
            unit: "parsec".to_string(),
            category: "length".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let mapped: UnitwiseError = err.into();
        assert_eq!(mapped.code, codes::UNKNOWN_UNIT);
        assert!(mapped.message.contains("parsec"));

        let mapped: UnitwiseError = ConversionError::NonFiniteValue(f64::NAN).into();
        assert_eq!(mapped.code, codes::INVALID_ARGUMENT);
    }
}
