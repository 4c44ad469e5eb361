//! Unitwise Plugin System
//!
//! Functions are registered by name and called with `Value` arguments, so the
//! MCP server and the facade can dispatch without knowing the unit crate.

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use unitwise_core::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitwise_core::{codes, Severity, Value};

    struct Double;

    static DOUBLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Value to double")];

    impl FunctionPlugin for Double {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "double",
                description: "Multiply by two",
                usage: "double(x)",
                args: &DOUBLE_ARGS,
                returns: "Number",
                examples: &[],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            match args.first().and_then(|v| v.as_number()) {
                Some(n) => Value::Number(n * 2.0),
                None => Value::Null,
            }
        }
    }

    fn registry() -> PluginRegistry {
        PluginRegistry::new().with_function(Double)
    }

    #[test]
    fn test_call_registered_function() {
        let reg = registry();
        let ctx = EvalContext::new();
        let result = reg.call_function("DOUBLE", &[Value::Number(4.0)], &ctx);
        assert_eq!(result.as_number(), Some(8.0));
    }

    #[test]
    fn test_unknown_function_suggests_similar() {
        let reg = registry();
        let ctx = EvalContext::new();
        let result = reg.call_function("doubl", &[], &ctx);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
        assert!(err.suggestion.as_deref().unwrap_or("").contains("double"));
    }

    #[test]
    fn test_help_for_function() {
        let reg = registry();
        let help = reg.help(Some("double"));
        let obj = help.as_object().unwrap();
        assert_eq!(obj.get("usage").and_then(|v| v.as_text()), Some("double(x)"));
        assert_eq!(obj.get("args").and_then(|v| v.as_list()).map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_help_not_found() {
        let reg = registry();
        let help = reg.help(Some("triple"));
        let err = help.as_error().unwrap();
        assert_eq!(err.code, codes::NOT_FOUND);
        assert_eq!(err.severity, Severity::Warning);
        assert!(err.message.contains("triple"));
    }

    #[test]
    fn test_list_functions_by_category() {
        let reg = registry();
        assert_eq!(reg.list_functions(Some("test")).as_list().map(|l| l.len()), Some(1));
        assert_eq!(reg.list_functions(Some("units")).as_list().map(|l| l.len()), Some(0));
        assert_eq!(reg.function_names(), vec!["double"]);
    }
}
