//! Path-template interpolation
//!
//! Handles `{{ placeholder }}` interpolation in endpoint path templates.
//! Replacement is textual and global per placeholder: every occurrence of a
//! given name in the template is replaced. A placeholder missing from the
//! context fails fast rather than emitting a malformed URL.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching template placeholders: {{ name }}
static TEMPLATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").unwrap());

/// Mapping from placeholder name to value, used to resolve a path template
/// into a concrete URL.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, Value>,
}

impl RequestContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeholder value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set a placeholder value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get a placeholder value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the context has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render a path template with the given context
pub fn render(template: &str, ctx: &RequestContext) -> Result<String> {
    let mut result = template.to_string();
    let mut missing = Vec::new();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match ctx.get(name) {
            Some(value) => {
                let replacement = value_to_string(value);
                result = result.replace(full_match, &replacement);
            }
            None => {
                missing.push(name.to_string());
            }
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_placeholder(missing.join(", ")))
    }
}

/// Check if a string contains template placeholders
pub fn has_placeholders(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Extract all placeholder names from a template
pub fn placeholder_names(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap.get(1).unwrap().as_str().to_string())
        .collect()
}

/// Convert a JSON value to a string for template substitution
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let ctx = RequestContext::new().with("customer_id", "C1");

        let result = render("/customers/{{ customer_id }}", &ctx).unwrap();
        assert_eq!(result, "/customers/C1");
    }

    #[test]
    fn test_numeric_substitution() {
        let ctx = RequestContext::new().with("subscription_id", 1212);

        let result = render("/subscriptions/{{ subscription_id }}/cancel", &ctx).unwrap();
        assert_eq!(result, "/subscriptions/1212/cancel");
    }

    #[test]
    fn test_repeated_placeholder_replaced_globally() {
        let ctx = RequestContext::new().with("id", "X");

        let result = render("/a/{{ id }}/b/{{ id }}", &ctx).unwrap();
        assert_eq!(result, "/a/X/b/X");
    }

    #[test]
    fn test_multiple_placeholders() {
        let ctx = RequestContext::new()
            .with("customer_id", "C1")
            .with("order_id", 42);

        let result = render("/customers/{{ customer_id }}/orders/{{ order_id }}", &ctx).unwrap();
        assert_eq!(result, "/customers/C1/orders/42");
    }

    #[test]
    fn test_missing_placeholder_fails_fast() {
        let ctx = RequestContext::new();
        let result = render("/subscriptions/{{ subscription_id }}", &ctx);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("subscription_id"));
    }

    #[test]
    fn test_no_placeholders() {
        let ctx = RequestContext::new();
        let result = render("/subscriptions/bulk_update", &ctx).unwrap();
        assert_eq!(result, "/subscriptions/bulk_update");
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("{{ customer_id }}"));
        assert!(has_placeholders("prefix {{ var }} suffix"));
        assert!(!has_placeholders("no placeholders here"));
        assert!(!has_placeholders("{ not a placeholder }"));
    }

    #[test]
    fn test_placeholder_names() {
        let names = placeholder_names("/customers/{{ customer_id }}/orders/{{ order_id }}");
        assert_eq!(names, vec!["customer_id", "order_id"]);
    }

    #[test]
    fn test_whitespace_in_template() {
        let ctx = RequestContext::new().with("key", "value");

        assert_eq!(render("{{key}}", &ctx).unwrap(), "value");
        assert_eq!(render("{{ key }}", &ctx).unwrap(), "value");
        assert_eq!(render("{{  key  }}", &ctx).unwrap(), "value");
    }
}
