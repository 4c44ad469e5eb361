//! Structured errors for tool and panel consumers
//!
//! Errors are values. They travel through `Value::Error` and out of the MCP
//! server with a machine-readable code and an actionable message.

use crate::InputError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Broad classification shared by every error in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied a value, key or argument that cannot be used
    InvalidArgument,
}

/// Severity level of an error
///
/// `Warning` marks a lookup miss (nothing was computed or changed);
/// `Error` marks a rejected conversion or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitwiseError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    pub severity: Severity,
}

impl UnitwiseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Every code in [`codes`] describes input the caller can correct
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARGUMENT, format!("Invalid argument: {}", details.into()))
    }

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_INPUT, format!("Invalid input: {}", details.into()))
            .with_suggestion("Enter a valid number")
    }

    pub fn unknown_category(key: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", key))
            .with_suggestion("Use list_categories() to see valid categories")
    }

    pub fn unknown_unit(key: &str, category: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown {} unit: {}", category, key))
            .with_suggestion(format!("Use list_units(\"{}\") to see valid units", category))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn not_found(what: &str, name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No {} named '{}'", what, name))
            .with_suggestion("Use help() to list available functions")
            .with_severity(Severity::Warning)
    }
}

impl std::fmt::Display for UnitwiseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnitwiseError {}

impl From<InputError> for UnitwiseError {
    fn from(err: InputError) -> Self {
        Self::invalid_input(err.to_string())
    }
}
