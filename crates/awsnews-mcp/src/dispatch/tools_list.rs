//! Handles the `tools/list` MCP method.

use serde_json::{Map, Value};

use awsnews_protocol::mcp::tools::ToolsListResult;
use awsnews_protocol::RequestId;
use awsnews_types::ToolArgument;

use crate::dispatch::respond;
use crate::handler::JsonRpcOutput;
use crate::tool::tool_definition;

/// Handles the `tools/list` request. The tool set is fixed.
pub(crate) fn handle_tools_list(id: RequestId) -> JsonRpcOutput {
    let result = ToolsListResult {
        tools: vec![tool_definition()],
        next_cursor: None,
    };
    respond(id, result)
}

/// Builds a JSON Schema `inputSchema` from tool arguments.
pub(crate) fn build_input_schema(arguments: &[ToolArgument]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for arg in arguments {
        let mut prop = Map::new();
        prop.insert("type".to_string(), Value::String(arg.arg_type.clone()));
        if !arg.allowed.is_empty() {
            let values = arg.allowed.iter().cloned().map(Value::String).collect();
            prop.insert("enum".to_string(), Value::Array(values));
        }
        if let Some(default) = &arg.default {
            prop.insert("default".to_string(), default.clone());
        }
        prop.insert(
            "description".to_string(),
            Value::String(arg.description.clone()),
        );
        properties.insert(arg.name.clone(), Value::Object(prop));
        if arg.required {
            required.push(Value::String(arg.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema.insert("properties".to_string(), Value::Object(properties));

    Value::Object(schema)
}
