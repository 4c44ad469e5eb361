//! Argument extraction for unit functions

use unitwise_core::{parse_number, UnitwiseError, Value};

/// Extract a number. Text is read as user input, so "12.5" is accepted and
/// "abc" fails with an invalid-input error instead of becoming NaN.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, UnitwiseError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => parse_number(s).map_err(UnitwiseError::from),
        Value::Error(e) => Err(e.clone()),
        other => Err(UnitwiseError::arg_type(func, arg, "Number", other.type_name())),
    }
}

pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, UnitwiseError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(UnitwiseError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Optional number argument (missing or null means absent)
pub fn extract_optional_number(
    args: &[Value],
    index: usize,
    func: &str,
    arg: &str,
) -> Result<Option<f64>, UnitwiseError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => extract_number(v, func, arg).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitwise_core::codes;

    #[test]
    fn test_extract_number_from_text() {
        assert_eq!(extract_number(&Value::Text(" 2.5".into()), "f", "x"), Ok(2.5));
    }

    #[test]
    fn test_extract_number_invalid_text() {
        let err = extract_number(&Value::Text("abc".into()), "f", "x").unwrap_err();
        assert_eq!(err.code, codes::INVALID_INPUT);
    }

    #[test]
    fn test_extract_number_wrong_type() {
        let err = extract_number(&Value::Bool(true), "f", "x").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_extract_optional_number() {
        let args = [Value::Number(1.0), Value::Null];
        assert_eq!(extract_optional_number(&args, 0, "f", "x"), Ok(Some(1.0)));
        assert_eq!(extract_optional_number(&args, 1, "f", "x"), Ok(None));
        assert_eq!(extract_optional_number(&args, 5, "f", "x"), Ok(None));
    }
}
