//! Unitwise Units - Conversion table and engine
//!
//! Four closed categories, each with a fixed unit set:
//! - Length (meter base): kilometer … nauticalmile
//! - Area (squaremeter base): squarekilometer … squareinch
//! - Temperature (kelvin reference): celsius, fahrenheit, kelvin
//! - Weight (kilogram base): kilogram … stone
//!
//! Linear categories convert through a factor relative to the base unit.
//! Temperature converts through the Kelvin scale with a pair of affine
//! functions per unit.

mod category;
mod display;
mod engine;
mod functions;
mod helpers;
mod parse;
mod unit;
mod units;

pub use category::Category;
pub use display::{capitalize, display_name, unit_options, UnitOption};
pub use engine::{convert, convert_units, to_base};
pub use parse::{lookup_unit, parse_category, parse_conversion, parse_unit};
pub use unit::{AreaUnit, ConversionError, LengthUnit, TemperatureUnit, Unit, WeightUnit};
pub use units::{AffinePair, UnitRegistry, UNITS};

use unitwise_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (3 functions)
        .with_function(functions::Convert)
        .with_function(functions::InUnits)
        .with_function(functions::ToBase)

        // Inspection (2 functions)
        .with_function(functions::ListCategories)
        .with_function(functions::ListUnits)

        // Display (1 function)
        .with_function(functions::FormatValue)
}
