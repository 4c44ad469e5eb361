//! Headless converter panel
//!
//! Holds the state a converter widget shows: the category, the unit options,
//! the selected input and output units, and the two text fields. Every user
//! action is a method; rendering is left to whoever owns the panel.

use serde::Serialize;
use tracing::debug;
use unitwise_core::{format_number, parse_number, UnitwiseError, DEFAULT_FRACTION_DIGITS};
use unitwise_units::{convert_units, parse_unit, unit_options, Category, Unit, UnitOption, UNITS};

/// Shown in the output field when the input is not a number
pub const INVALID_INPUT_MESSAGE: &str = "Enter a valid number";

#[derive(Debug, Clone, Serialize)]
pub struct ConverterPanel {
    category: Category,
    options: Vec<UnitOption>,
    input_unit: Unit,
    output_unit: Unit,
    input_text: String,
    output_text: String,
    fraction_digits: u32,
}

impl ConverterPanel {
    pub fn new(category: Category) -> Self {
        let (input_unit, output_unit) = default_units(category);
        Self {
            category,
            options: unit_options(category),
            input_unit,
            output_unit,
            input_text: String::new(),
            output_text: String::new(),
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }

    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Switch category: repopulate options, reset the unit selection and
    /// clear both fields.
    pub fn select_category(&mut self, category: Category) {
        let (input_unit, output_unit) = default_units(category);
        self.category = category;
        self.options = unit_options(category);
        self.input_unit = input_unit;
        self.output_unit = output_unit;
        self.input_text.clear();
        self.output_text.clear();
        debug!(%category, "category selected");
    }

    /// Select the source unit by key. Clears the output field.
    pub fn select_input_unit(&mut self, key: &str) -> Result<(), UnitwiseError> {
        self.input_unit = parse_unit(key, self.category)?;
        self.output_text.clear();
        Ok(())
    }

    /// Select the target unit by key. Clears the output field.
    pub fn select_output_unit(&mut self, key: &str) -> Result<(), UnitwiseError> {
        self.output_unit = parse_unit(key, self.category)?;
        self.output_text.clear();
        Ok(())
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Convert the input field into the output field.
    ///
    /// Unparseable input puts [`INVALID_INPUT_MESSAGE`] in the output field
    /// and returns the error. A failed conversion clears the output field.
    pub fn convert(&mut self) -> Result<f64, UnitwiseError> {
        let value = match parse_number(&self.input_text) {
            Ok(v) => v,
            Err(e) => {
                debug!(input = %self.input_text, "rejected input");
                self.output_text = INVALID_INPUT_MESSAGE.to_string();
                return Err(e.into());
            }
        };

        let result = match convert_units(value, self.input_unit, self.output_unit) {
            Ok(r) => r,
            Err(e) => {
                debug!(value, error = %e, "panel conversion failed");
                self.output_text.clear();
                return Err(e.into());
            }
        };
        self.output_text = format_number(result, self.fraction_digits);
        debug!(value, from = %self.input_unit, to = %self.output_unit, output = %self.output_text, "panel converted");
        Ok(result)
    }

    /// Exchange the input and output units, then convert again.
    pub fn swap(&mut self) -> Result<f64, UnitwiseError> {
        std::mem::swap(&mut self.input_unit, &mut self.output_unit);
        self.convert()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn options(&self) -> &[UnitOption] {
        &self.options
    }

    pub fn input_unit(&self) -> Unit {
        self.input_unit
    }

    pub fn output_unit(&self) -> Unit {
        self.output_unit
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }
}

impl Default for ConverterPanel {
    fn default() -> Self {
        Self::new(Category::Length)
    }
}

/// First option as input, second as output
fn default_units(category: Category) -> (Unit, Unit) {
    let units = UNITS.by_category(category);
    let base = category.base_unit();
    let input = units.first().copied().unwrap_or(base);
    let output = units.get(1).copied().unwrap_or(input);
    (input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitwise_core::codes;
    use unitwise_units::{AreaUnit, LengthUnit, TemperatureUnit};

    #[test]
    fn test_new_panel_defaults() {
        let panel = ConverterPanel::new(Category::Length);
        assert_eq!(panel.input_unit(), Unit::Length(LengthUnit::Kilometer));
        assert_eq!(panel.output_unit(), Unit::Length(LengthUnit::Meter));
        assert_eq!(panel.options().len(), 10);
        assert_eq!(panel.input_text(), "");
        assert_eq!(panel.output_text(), "");
    }

    #[test]
    fn test_convert_sets_output() {
        let mut panel = ConverterPanel::new(Category::Length);
        panel.set_input("1");
        assert_eq!(panel.convert(), Ok(1000.0));
        assert_eq!(panel.output_text(), "1000");
    }

    #[test]
    fn test_invalid_input_message() {
        let mut panel = ConverterPanel::new(Category::Weight);
        panel.set_input("heavy");
        let err = panel.convert().unwrap_err();
        assert_eq!(err.code, codes::INVALID_INPUT);
        assert_eq!(panel.output_text(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_select_category_resets() {
        let mut panel = ConverterPanel::new(Category::Length);
        panel.set_input("5");
        panel.convert().unwrap();

        panel.select_category(Category::Area);
        assert_eq!(panel.category(), Category::Area);
        assert_eq!(panel.input_unit(), Unit::Area(AreaUnit::SquareKilometer));
        assert_eq!(panel.output_unit(), Unit::Area(AreaUnit::SquareMeter));
        assert_eq!(panel.options()[1].label, "Square Meter");
        assert_eq!(panel.input_text(), "");
        assert_eq!(panel.output_text(), "");
    }

    #[test]
    fn test_unit_change_clears_output() {
        let mut panel = ConverterPanel::new(Category::Temperature);
        panel.set_input("100");
        panel.convert().unwrap();
        assert_eq!(panel.output_text(), "212");

        panel.select_output_unit("kelvin").unwrap();
        assert_eq!(panel.output_text(), "");
        assert_eq!(panel.input_text(), "100");
        assert_eq!(panel.convert(), Ok(373.15));
        assert_eq!(panel.output_text(), "373.15");
    }

    #[test]
    fn test_select_unit_outside_category() {
        let mut panel = ConverterPanel::new(Category::Temperature);
        let err = panel.select_input_unit("meter").unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
        assert_eq!(panel.input_unit(), Unit::Temperature(TemperatureUnit::Celsius));

        let err = panel.select_input_unit("rankine").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_swap_converts_back() {
        let mut panel = ConverterPanel::new(Category::Temperature);
        panel.set_input("32");
        panel.swap().unwrap();
        assert_eq!(panel.input_unit(), Unit::Temperature(TemperatureUnit::Fahrenheit));
        assert_eq!(panel.output_unit(), Unit::Temperature(TemperatureUnit::Celsius));
        assert_eq!(panel.output_text(), "0");
    }

    #[test]
    fn test_swap_with_empty_input() {
        let mut panel = ConverterPanel::new(Category::Length);
        assert!(panel.swap().is_err());
        assert_eq!(panel.input_unit(), Unit::Length(LengthUnit::Meter));
        assert_eq!(panel.output_text(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_failed_conversion_clears_previous_output() {
        let mut panel = ConverterPanel::new(Category::Length);
        panel.set_input("2");
        panel.convert().unwrap();
        assert_eq!(panel.output_text(), "2000");

        panel.set_input("1e308");
        let err = panel.convert().unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
        assert_eq!(panel.input_text(), "1e308");
        assert_eq!(panel.output_text(), "");
    }

    #[test]
    fn test_fraction_digits() {
        let mut panel = ConverterPanel::new(Category::Length).with_fraction_digits(3);
        panel.select_input_unit("mile").unwrap();
        panel.select_output_unit("kilometer").unwrap();
        panel.set_input("1");
        panel.convert().unwrap();
        assert_eq!(panel.output_text(), "1.609");
    }
}
