//! Unit functions exposed through the plugin registry

use unitwise_core::{format_number, MAX_FRACTION_DIGITS};
use unitwise_plugin::prelude::*;

use crate::display::unit_options;
use crate::engine::{convert, convert_units, to_base};
use crate::helpers::{extract_number, extract_optional_number, extract_text};
use crate::parse::{lookup_unit, parse_category, parse_conversion};
use crate::{Category, Unit};

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert (text is parsed as a number)"),
    ArgMeta::required("from_unit", "Text", "Source unit key (e.g. \"kilometer\")"),
    ArgMeta::required("to_unit", "Text", "Target unit key (e.g. \"meter\")"),
    ArgMeta::required("category", "Text", "One of length, area, temperature, weight"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"kilometer\", \"meter\", \"length\") → 1000",
    "convert(0, \"celsius\", \"fahrenheit\", \"temperature\") → 32",
    "convert(1, \"hectare\", \"squaremeter\", \"area\") → 10000",
];

static CONVERT_RELATED: [&str; 3] = ["in_units", "to_base", "list_units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another within a category",
            usage: "convert(value, from_unit, to_unit, category)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 4 {
            return Value::Error(UnitwiseError::arg_count("convert", 4, args.len()));
        }

        let value = match extract_number(&args[0], "convert", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let from = match extract_text(&args[1], "convert", "from_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let to = match extract_text(&args[2], "convert", "to_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let category = match extract_text(&args[3], "convert", "category") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match convert(value, from, to, category) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ in_units ============

pub struct InUnits;

static IN_UNITS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("conversion", "Text", "Conversion spec like \"kilometer->mile\""),
];

static IN_UNITS_EXAMPLES: [&str; 2] = [
    "in_units(100, \"kilometer->mile\") → 62.1371192237",
    "in_units(0, \"celsius->fahrenheit\") → 32",
];

static IN_UNITS_RELATED: [&str; 2] = ["convert", "to_base"];

impl FunctionPlugin for InUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "in_units",
            description: "Convert a value using a \"from->to\" spec; the category is inferred",
            usage: "in_units(value, \"from->to\")",
            args: &IN_UNITS_ARGS,
            returns: "Number",
            examples: &IN_UNITS_EXAMPLES,
            category: "units",
            related: &IN_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 2 {
            return Value::Error(UnitwiseError::arg_count("in_units", 2, args.len()));
        }

        let value = match extract_number(&args[0], "in_units", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let spec = match extract_text(&args[1], "in_units", "conversion") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let (from, to) = match parse_conversion(spec) {
            Ok(pair) => pair,
            Err(e) => return Value::Error(e.into()),
        };

        match convert_units(value, from, to) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ to_base ============

pub struct ToBase;

static TO_BASE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("unit", "Text", "Source unit key"),
];

static TO_BASE_EXAMPLES: [&str; 2] = [
    "to_base(5, \"kilometer\") → 5000",
    "to_base(100, \"celsius\") → 373.15",
];

static TO_BASE_RELATED: [&str; 2] = ["convert", "list_categories"];

impl FunctionPlugin for ToBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_base",
            description: "Express a value in its category's base unit (kelvin for temperature)",
            usage: "to_base(value, unit)",
            args: &TO_BASE_ARGS,
            returns: "Number",
            examples: &TO_BASE_EXAMPLES,
            category: "units",
            related: &TO_BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 2 {
            return Value::Error(UnitwiseError::arg_count("to_base", 2, args.len()));
        }

        let value = match extract_number(&args[0], "to_base", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let unit = match extract_text(&args[1], "to_base", "unit").and_then(|key| {
            lookup_unit(key).map_err(UnitwiseError::from)
        }) {
            Ok(u) => u,
            Err(e) => return Value::Error(e),
        };

        match to_base(value, unit) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ list_categories ============

pub struct ListCategories;

static LIST_CATEGORIES_EXAMPLES: [&str; 1] = [
    "list_categories() → [{key: \"length\", label: \"Length\", base: \"meter\", scale: \"linear\"}, ...]",
];

static LIST_CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListCategories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_categories",
            description: "List unit categories with their base unit",
            usage: "list_categories()",
            args: &[],
            returns: "List",
            examples: &LIST_CATEGORIES_EXAMPLES,
            category: "units",
            related: &LIST_CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(Category::ALL.into_iter().map(category_entry).collect())
    }
}

fn category_entry(category: Category) -> Value {
    let scale = if category.is_linear() { "linear" } else { "affine" };
    Value::object([
        ("key", Value::Text(category.key().to_string())),
        ("label", Value::Text(category.label().to_string())),
        ("base", Value::Text(category.base_unit().key().to_string())),
        ("scale", Value::Text(scale.to_string())),
    ])
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "One of length, area, temperature, weight"),
];

static LIST_UNITS_EXAMPLES: [&str; 1] = [
    "list_units(\"temperature\") → [{value: \"celsius\", label: \"Celsius\"}, ...]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_categories", "convert"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of a category with display labels, in picker order",
            usage: "list_units(category)",
            args: &LIST_UNITS_ARGS,
            returns: "List",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(UnitwiseError::arg_count("list_units", 1, 0));
        }

        let category = match extract_text(&args[0], "list_units", "category")
            .and_then(|key| parse_category(key).map_err(UnitwiseError::from))
        {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };

        let entries = unit_options(category)
            .into_iter()
            .map(|option| {
                let factor = lookup_unit(&option.value).ok().and_then(Unit::factor);
                let mut fields = vec![
                    ("value", Value::Text(option.value)),
                    ("label", Value::Text(option.label)),
                ];
                if let Some(f) = factor {
                    fields.push(("factor", Value::Number(f)));
                }
                Value::object(fields)
            })
            .collect();
        Value::List(entries)
    }
}

// ============ format_value ============

pub struct FormatValue;

static FORMAT_VALUE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to format"),
    ArgMeta::optional("digits", "Number", "Maximum fractional digits", "10"),
];

static FORMAT_VALUE_EXAMPLES: [&str; 2] = [
    "format_value(0.45359237) → \"0.45359237\"",
    "format_value(1/3, 4) → \"0.3333\"",
];

static FORMAT_VALUE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for FormatValue {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_value",
            description: "Round a value for display, dropping trailing zeros",
            usage: "format_value(value, [digits])",
            args: &FORMAT_VALUE_ARGS,
            returns: "Text",
            examples: &FORMAT_VALUE_EXAMPLES,
            category: "units",
            related: &FORMAT_VALUE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(UnitwiseError::arg_count("format_value", 1, 0));
        }

        let value = match extract_number(&args[0], "format_value", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let digits = match extract_optional_number(args, 1, "format_value", "digits") {
            Ok(Some(d)) if d >= 0.0 && d.fract() == 0.0 && d <= f64::from(MAX_FRACTION_DIGITS) => d as u32,
            Ok(Some(d)) => {
                return Value::Error(UnitwiseError::invalid_argument(format!(
                    "format_value(): digits must be an integer from 0 to {}, got {}",
                    MAX_FRACTION_DIGITS, d
                )))
            }
            Ok(None) => ctx.fraction_digits,
            Err(e) => return Value::Error(e),
        };

        Value::Text(format_number(value, digits))
    }
}
