//! Numeric input parsing
//!
//! Text typed into a value field is read the way a browser's `parseFloat`
//! reads it: leading whitespace is skipped and the longest numeric prefix
//! wins, so `"12.5 m"` reads as 12.5. Anything without a numeric prefix, or
//! that only parses to a non-finite number, is rejected.

use thiserror::Error;

use crate::ErrorKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("no number in input: {0:?}")]
    NotANumber(String),

    #[error("number is not finite: {0:?}")]
    NotFinite(String),
}

impl InputError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// Parse user-entered text into a finite number.
pub fn parse_number(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim_start();
    let prefix = numeric_prefix(trimmed);

    if prefix.is_empty() {
        let unsigned = trimmed.trim_start_matches(['+', '-']);
        if unsigned.starts_with("Infinity") {
            return Err(InputError::NotFinite(text.to_string()));
        }
        return Err(InputError::NotANumber(text.to_string()));
    }

    let value: f64 = prefix
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))?;

    if !value.is_finite() {
        return Err(InputError::NotFinite(text.to_string()));
    }
    Ok(value)
}

/// Longest prefix of `s` that forms a decimal literal:
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
