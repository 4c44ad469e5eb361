//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use unitwise_core::{UnitwiseError, Value};

/// Central registry of callable functions
pub struct PluginRegistry {
    functions: BTreeMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => {
                debug!(function = name, args = args.len(), "calling function");
                f.call(args, ctx)
            }
            None => {
                let similar = self.find_similar_functions(name);
                let mut err = UnitwiseError::undefined_func(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use help() for full list.",
                        suggestions.join(", ")
                    ));
                }
                Value::Error(err)
            }
        }
    }

    /// Function names similar to the given name, best match first
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.functions.keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Self::function_to_help(f.meta()),
            None => Value::Error(UnitwiseError::not_found("function", name)),
        }
    }

    fn general_help(&self) -> Value {
        let mut funcs_by_cat: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for (name, f) in &self.functions {
            let cat = f.meta().category.to_string();
            funcs_by_cat.entry(cat).or_default().push(Value::Text(name.clone()));
        }

        Value::object([
            ("functions", Value::Object(
                funcs_by_cat.into_iter().map(|(k, v)| (k, Value::List(v))).collect(),
            )),
            ("usage", Value::Text("Call help('function_name') for detailed help.".to_string())),
        ])
    }

    fn function_to_help(meta: FunctionMeta) -> Value {
        let args = meta.args.iter()
            .map(|a| Value::object([
                ("name", Value::Text(a.name.to_string())),
                ("type", Value::Text(a.typ.to_string())),
                ("description", Value::Text(a.description.to_string())),
                ("optional", Value::Bool(a.optional)),
            ]))
            .collect();

        Value::object([
            ("name", Value::Text(meta.name.to_string())),
            ("description", Value::Text(meta.description.to_string())),
            ("usage", Value::Text(meta.usage.to_string())),
            ("returns", Value::Text(meta.returns.to_string())),
            ("category", Value::Text(meta.category.to_string())),
            ("args", Value::List(args)),
            ("examples", Value::List(
                meta.examples.iter().map(|e| Value::Text(e.to_string())).collect(),
            )),
            ("related", Value::List(
                meta.related.iter().map(|r| Value::Text(r.to_string())).collect(),
            )),
        ])
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let funcs: Vec<Value> = self.functions.values()
            .filter(|f| category.map_or(true, |c| f.meta().category == c))
            .map(|f| {
                let meta = f.meta();
                Value::object([
                    ("name", Value::Text(meta.name.to_string())),
                    ("description", Value::Text(meta.description.to_string())),
                    ("usage", Value::Text(meta.usage.to_string())),
                    ("category", Value::Text(meta.category.to_string())),
                ])
            })
            .collect();
        Value::List(funcs)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
