//! The `get_aws_news` tool: definition and argument mapping.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use awsnews_protocol::mcp::tools::McpToolDefinition;
use awsnews_types::{NewsQueryParams, NewsType, ToolArgument, DEFAULT_LIMIT};

use crate::dispatch::tools_list::build_input_schema;

/// Name under which the tool is advertised.
pub const TOOL_NAME: &str = "get_aws_news";

/// Prefix of the text returned when a fetch fails.
pub const ERROR_PREFIX: &str = "Error fetching AWS news: ";

const DESCRIPTION: &str = "\
Returns a list of AWS news articles with announcements of new products, services, and capabilities for the specified AWS topic/service.

You can filter on news type which is news or blogs. By default, returns both news and blogs.

You can optionally ask for regional expansion news (defaults to false).

Optionally, specify a \"since\" date in ISO 8601 format by which to filter the results.

Examples:
- To get all news about Amazon S3: use topic=\"s3\"
- To get only blog posts about Amazon EC2: use topic=\"ec2\", news_type=\"blogs\"
- To get news about Lambda since January 2025: use topic=\"lambda\", since_date=\"2025-01-01T00:00:00Z\"
- To get regional expansion news for DynamoDB: use topic=\"dynamodb\", include_regional_expansions=true

Use this tool when:
1. The user asks about recent AWS announcements for a specific service
2. The user wants to know about new features or capabilities in AWS services
3. The user is looking for AWS blog posts about specific topics
4. The user wants to stay updated on AWS service expansions to new regions";

/// Rejected tool arguments. Rendered as `INVALID_PARAMS` errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A required argument was absent or null.
    #[error("Missing required argument '{0}'")]
    Missing(&'static str),
    /// An argument was present with an unusable value.
    #[error("Argument '{name}' {reason}")]
    Invalid { name: &'static str, reason: String },
    /// The arguments could not be decoded at all.
    #[error("invalid arguments for get_aws_news: {0}")]
    Malformed(String),
}

/// Arguments advertised in the tool's input schema.
pub fn tool_arguments() -> Vec<ToolArgument> {
    vec![
        ToolArgument::new(
            "topic",
            "string",
            "AWS topic or service to search for (e.g., 's3', 'lambda', 'ec2')",
        )
        .required(),
        ToolArgument::new(
            "news_type",
            "string",
            "Type of news to return (all, news, or blogs)",
        )
        .with_default(json!(NewsType::All.as_str()))
        .one_of([NewsType::All, NewsType::News, NewsType::Blogs].map(NewsType::as_str)),
        ToolArgument::new(
            "include_regional_expansions",
            "boolean",
            "Whether to include regional expansion news",
        )
        .with_default(json!(false)),
        ToolArgument::new(
            "number_of_results",
            "integer",
            "Maximum number of results to return",
        )
        .with_default(json!(DEFAULT_LIMIT)),
        ToolArgument::new(
            "since_date",
            "string",
            "Optional ISO 8601 date to filter results (e.g., '2025-01-01T00:00:00Z')",
        ),
    ]
}

/// The `tools/list` entry for `get_aws_news`.
pub fn tool_definition() -> McpToolDefinition {
    McpToolDefinition {
        name: TOOL_NAME.to_string(),
        description: Some(DESCRIPTION.to_string()),
        input_schema: build_input_schema(&tool_arguments()),
    }
}

/// Optional arguments, each with its advertised default.
#[derive(Debug, Deserialize)]
struct OptionalArguments {
    #[serde(default = "default_news_type")]
    news_type: String,
    #[serde(default)]
    include_regional_expansions: bool,
    #[serde(default = "default_limit")]
    number_of_results: u32,
    #[serde(default)]
    since_date: Option<String>,
}

fn default_news_type() -> String {
    NewsType::All.as_str().to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Maps raw `tools/call` arguments onto [`NewsQueryParams`].
///
/// `topic` must be a non-empty string. `since_date` is only
/// type-checked here; its format is validated by the query builder. An
/// empty `since_date` is treated as not given.
///
/// # Errors
///
/// Returns an [`ArgumentError`] describing the first problem found.
pub fn parse_arguments(arguments: &Value) -> Result<NewsQueryParams, ArgumentError> {
    let empty = Map::new();
    let object = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ArgumentError::Malformed(format!(
                "expected an object, got {other}"
            )))
        }
    };

    let topic = match object.get("topic") {
        None | Some(Value::Null) => return Err(ArgumentError::Missing("topic")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ArgumentError::Invalid {
                name: "topic",
                reason: "must not be empty".into(),
            })
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ArgumentError::Invalid {
                name: "topic",
                reason: "must be a string".into(),
            })
        }
    };

    let optional: OptionalArguments = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|e| ArgumentError::Malformed(e.to_string()))?;

    if optional.number_of_results == 0 {
        return Err(ArgumentError::Invalid {
            name: "number_of_results",
            reason: "must be a positive integer".into(),
        });
    }

    let mut params = NewsQueryParams::new(topic)
        .with_news_type(optional.news_type)
        .with_regional_expansions(optional.include_regional_expansions)
        .with_limit(optional.number_of_results);
    if let Some(since) = optional.since_date.filter(|s| !s.is_empty()) {
        params = params.with_since_date(since);
    }
    Ok(params)
}
