//! Tool argument descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single argument advertised in a tool's input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgument {
    /// Argument name as it appears in `arguments`.
    pub name: String,
    /// JSON Schema type (`string`, `boolean`, `integer`, ...).
    #[serde(rename = "type")]
    pub arg_type: String,
    /// Human-readable description shown to the agent.
    pub description: String,
    /// Whether the argument must be present.
    #[serde(default)]
    pub required: bool,
    /// Value used when the argument is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Closed set of accepted values, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl ToolArgument {
    /// Creates an optional argument with no default.
    pub fn new(
        name: impl Into<String>,
        arg_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arg_type: arg_type.into(),
            description: description.into(),
            required: false,
            default: None,
            allowed: Vec::new(),
        }
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Restricts the argument to a fixed set of values.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_fields() {
        let arg = ToolArgument::new("news_type", "string", "Kind of article")
            .with_default(json!("all"))
            .one_of(["all", "news", "blogs"]);
        assert!(!arg.required);
        assert_eq!(arg.default, Some(json!("all")));
        assert_eq!(arg.allowed, vec!["all", "news", "blogs"]);
    }

    #[test]
    fn serde_renames_type_and_skips_empty() {
        let arg = ToolArgument::new("topic", "string", "Topic").required();
        let v = serde_json::to_value(&arg).expect("ser");
        assert_eq!(v["type"], "string");
        assert!(v.get("default").is_none());
        assert!(v.get("allowed").is_none());
    }
}
