//! Unitwise Core - Fundamental types
//!
//! This crate provides the core types used throughout Unitwise:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `UnitwiseError`: Structured errors with machine-readable codes
//! - `parse_number`: Reading numbers out of user-entered text
//! - `format_number`: Rounding converted values for display

mod error;
mod format;
mod input;
mod value;

pub use error::{codes, ErrorKind, Severity, UnitwiseError};
pub use format::{format_number, DEFAULT_FRACTION_DIGITS, MAX_FRACTION_DIGITS};
pub use input::{parse_number, InputError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ErrorKind, Severity, UnitwiseError, Value};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod value_tests {
        use super::*;

        #[test]
        fn test_from_f64() {
            let v: Value = 42.0.into();
            assert_eq!(v.as_number(), Some(42.0));
        }

        #[test]
        fn test_from_str() {
            let v: Value = "hello".into();
            assert_eq!(v.as_text(), Some("hello"));
        }

        #[test]
        fn test_type_name() {
            assert_eq!(Value::Number(0.0).type_name(), "Number");
            assert_eq!(Value::Text(String::new()).type_name(), "Text");
            assert_eq!(Value::Bool(true).type_name(), "Bool");
            assert_eq!(Value::Null.type_name(), "Null");
        }

        #[test]
        fn test_is_error() {
            let err = Value::Error(UnitwiseError::unknown_category("volume"));
            assert!(err.is_error());
            assert!(!Value::Null.is_error());
        }

        #[test]
        fn test_display_number_rounds() {
            assert_eq!(Value::Number(1.0 / 3.0).to_string(), "0.3333333333");
            assert_eq!(Value::Number(1000.0).to_string(), "1000");
        }

        #[test]
        fn test_json_round_trip_shapes() {
            let json = json!({"value": 1.5, "unit": "meter", "tags": [true, null]});
            let value = Value::from_json(&json);
            let obj = value.as_object().unwrap();
            assert_eq!(obj.get("value").and_then(|v| v.as_number()), Some(1.5));
            assert_eq!(obj.get("unit").and_then(|v| v.as_text()), Some("meter"));
            assert_eq!(value.to_json(), json);
        }

        #[test]
        fn test_error_to_json() {
            let value = Value::Error(UnitwiseError::unknown_unit("parsec", "length"));
            let json = value.to_json();
            assert_eq!(json["error"]["code"], codes::UNKNOWN_UNIT);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = UnitwiseError::unknown_category("volume");
            assert_eq!(err.code, codes::UNKNOWN_CATEGORY);
            assert!(err.message.contains("volume"));
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }

        #[test]
        fn test_not_found_is_warning() {
            let err = UnitwiseError::not_found("function", "volume");
            assert_eq!(err.code, codes::NOT_FOUND);
            assert_eq!(err.severity, Severity::Warning);
            assert_eq!(UnitwiseError::unknown_unit("parsec", "length").severity, Severity::Error);
        }

        #[test]
        fn test_error_display() {
            let err = UnitwiseError::arg_count("convert", 4, 2);
            let display = format!("{}", err);
            assert!(display.contains("ARG_COUNT"));
            assert!(display.contains("suggestion"));
        }

        #[test]
        fn test_from_input_error() {
            let err: UnitwiseError = parse_number("abc").unwrap_err().into();
            assert_eq!(err.code, codes::INVALID_INPUT);
            assert_eq!(err.suggestion.as_deref(), Some("Enter a valid number"));
        }
    }
}
