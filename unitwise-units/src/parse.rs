//! Key parsing - categories, units and "from->to" conversion specs
//!
//! Keys are exact and case-sensitive: "meter" is a unit, "Meter" is not.

use crate::unit::ConversionError;
use crate::units::UNITS;
use crate::{Category, Unit};

/// Separators accepted between the two sides of a conversion spec
const CONVERSION_SEPARATORS: [&str; 3] = ["->", "→", " to "];

pub fn parse_category(key: &str) -> Result<Category, ConversionError> {
    Category::from_key(key).ok_or_else(|| ConversionError::UnknownCategory(key.to_string()))
}

/// Parse a unit key that must belong to `category`
pub fn parse_unit(key: &str, category: Category) -> Result<Unit, ConversionError> {
    match UNITS.get(key) {
        Some(unit) if unit.category() == category => Ok(unit),
        Some(unit) => Err(ConversionError::CategoryMismatch {
            unit: key.to_string(),
            expected: category,
            actual: unit.category(),
        }),
        None => Err(ConversionError::UnknownUnit {
            unit: key.to_string(),
            category: category.key().to_string(),
        }),
    }
}

/// Parse a unit key from any category (keys are unique across the table)
pub fn lookup_unit(key: &str) -> Result<Unit, ConversionError> {
    UNITS.get(key).ok_or_else(|| ConversionError::UnknownUnit {
        unit: key.to_string(),
        category: "any".to_string(),
    })
}

/// Parse a conversion spec like "kilometer->mile", "celsius → kelvin" or
/// "pound to gram". Both sides must share a category.
pub fn parse_conversion(spec: &str) -> Result<(Unit, Unit), ConversionError> {
    let (from, to) = CONVERSION_SEPARATORS
        .iter()
        .find_map(|sep| spec.split_once(sep))
        .ok_or_else(|| {
            ConversionError::InvalidConversion(format!(
                "expected \"from->to\", got \"{}\"",
                spec
            ))
        })?;

    let from = from.trim();
    let to = to.trim();
    if from.is_empty() || to.is_empty() {
        return Err(ConversionError::InvalidConversion(format!(
            "both units are required, got \"{}\"",
            spec
        )));
    }

    let from_unit = lookup_unit(from)?;
    let to_unit = parse_unit(to, from_unit.category())?;
    Ok((from_unit, to_unit))
}
