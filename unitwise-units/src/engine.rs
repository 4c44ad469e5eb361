//! Conversion engine
//!
//! Linear categories go through the base unit: `value × factor(from) /
//! factor(to)`. Temperature goes through Kelvin, since its scales differ by
//! offset as well as ratio.

use tracing::trace;

use crate::parse::{parse_category, parse_unit};
use crate::unit::ConversionError;
use crate::units::AffinePair;
use crate::Unit;

/// Convert `value` between two unit keys of the named category.
///
/// ```ignore
/// assert_eq!(convert(1.0, "kilometer", "meter", "length")?, 1000.0);
/// ```
pub fn convert(value: f64, from: &str, to: &str, category: &str) -> Result<f64, ConversionError> {
    let category = parse_category(category)?;
    let from = parse_unit(from, category)?;
    let to = parse_unit(to, category)?;
    convert_units(value, from, to)
}

/// Convert `value` between two typed units of the same category.
pub fn convert_units(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFiniteValue(value));
    }

    // Identity must be exact, not a round trip through the base unit
    if from == to {
        return Ok(value);
    }

    let result = match (from, to) {
        (Unit::Length(a), Unit::Length(b)) => linear(value, a.factor(), b.factor()),
        (Unit::Area(a), Unit::Area(b)) => linear(value, a.factor(), b.factor()),
        (Unit::Weight(a), Unit::Weight(b)) => linear(value, a.factor(), b.factor()),
        (Unit::Temperature(a), Unit::Temperature(b)) => affine(value, a.affine(), b.affine()),
        _ => {
            return Err(ConversionError::CategoryMismatch {
                unit: to.key().to_string(),
                expected: from.category(),
                actual: to.category(),
            })
        }
    };

    if !result.is_finite() {
        return Err(ConversionError::OutOfRange { value, from, to });
    }

    trace!(value, %from, %to, result, "converted");
    Ok(result)
}

/// Express `value` in the category's base unit (Kelvin for temperature)
pub fn to_base(value: f64, unit: Unit) -> Result<f64, ConversionError> {
    convert_units(value, unit, unit.category().base_unit())
}

/// Ratio first, so a finite result never overflows in the product
fn linear(value: f64, from_factor: f64, to_factor: f64) -> f64 {
    value * (from_factor / to_factor)
}

fn affine(value: f64, from: AffinePair, to: AffinePair) -> f64 {
    let kelvin = (from.to_reference)(value);
    (to.from_reference)(kelvin)
}
