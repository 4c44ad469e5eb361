//! Evaluation Context

use unitwise_core::DEFAULT_FRACTION_DIGITS;

/// Evaluation context passed to plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// Fractional digits used when a function renders a number as text
    pub fraction_digits: u32,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }

    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = digits;
        self
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
