//! Unitwise - unit conversion for length, area, temperature and weight
//!
//! `Unitwise` wraps the function registry for callers that dispatch by name
//! (the MCP server), and offers typed shortcuts for everyone else.
//! `ConverterPanel` models an interactive converter widget.

mod panel;

pub use panel::{ConverterPanel, INVALID_INPUT_MESSAGE};
pub use unitwise_core::{format_number, parse_number, ErrorKind, Severity, UnitwiseError, Value};
pub use unitwise_units::{
    convert, convert_units, display_name, parse_conversion, to_base, unit_options, Category, ConversionError, Unit,
    UnitOption,
};

use unitwise_core::DEFAULT_FRACTION_DIGITS;
use unitwise_plugin::{EvalContext, PluginRegistry};

/// Registry with every unit function loaded
pub fn standard_registry() -> PluginRegistry {
    unitwise_units::load_units_library(PluginRegistry::new())
}

/// Main Unitwise engine
pub struct Unitwise {
    registry: PluginRegistry,
    fraction_digits: u32,
}

impl Unitwise {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry,
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = digits;
        self
    }

    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    /// Call a registered function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        let ctx = EvalContext::new().with_fraction_digits(self.fraction_digits);
        self.registry.call_function(name, args, &ctx)
    }

    /// Convert between unit keys of a category
    pub fn convert(&self, value: f64, from: &str, to: &str, category: &str) -> Result<f64, UnitwiseError> {
        Ok(unitwise_units::convert(value, from, to, category)?)
    }

    /// Convert user-entered text and format the result for display
    pub fn convert_text(&self, input: &str, from: &str, to: &str, category: &str) -> Result<String, UnitwiseError> {
        let value = parse_number(input)?;
        let result = self.convert(value, from, to, category)?;
        Ok(format_number(result, self.fraction_digits))
    }

    /// A converter panel that formats with this engine's digit setting
    pub fn panel(&self, category: Category) -> ConverterPanel {
        ConverterPanel::new(category).with_fraction_digits(self.fraction_digits)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Unitwise {
    fn default() -> Self {
        Self::with_standard_library()
    }
}
