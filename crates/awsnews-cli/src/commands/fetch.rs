//! `aws-news-mcp fetch` command.
//!
//! Runs one news query outside of MCP and prints the result envelope.

use clap::Args;

use awsnews_client::NewsQueryService;
use awsnews_config::AwsNewsConfig;
use awsnews_mcp::ERROR_PREFIX;
use awsnews_types::{NewsError, NewsQueryParams, DEFAULT_LIMIT};

use crate::{output, shared};

/// Fetch AWS news for a topic and print the JSON envelope.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Search topic (e.g. "Lambda", "S3").
    #[arg(value_parser = parse_topic)]
    pub topic: String,
    /// Article kind: all, news or blogs.
    #[arg(long, default_value = "all")]
    pub news_type: String,
    /// Include announcements that only add regional availability.
    #[arg(long)]
    pub include_regional_expansions: bool,
    /// Number of articles requested from the API.
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,
    /// Only articles published on or after this ISO 8601 timestamp.
    #[arg(long)]
    pub since: Option<String>,
}

/// Rejects topics that are empty or only whitespace.
fn parse_topic(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("topic must not be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}

impl FetchArgs {
    fn to_params(&self) -> NewsQueryParams {
        let params = NewsQueryParams::new(&self.topic)
            .with_news_type(&self.news_type)
            .with_regional_expansions(self.include_regional_expansions)
            .with_limit(self.limit);
        match &self.since {
            Some(since) => params.with_since_date(since),
            None => params,
        }
    }
}

/// Queries the news API and renders the envelope as pretty JSON.
async fn fetch_rendered(
    service: &NewsQueryService,
    params: &NewsQueryParams,
) -> Result<String, NewsError> {
    let result = service.fetch_news(params).await?;
    result
        .to_pretty_json()
        .map_err(|e| NewsError::upstream(format!("failed to render result: {e}")))
}

/// Executes the fetch command.
pub async fn execute(args: &FetchArgs, config: &AwsNewsConfig) -> anyhow::Result<()> {
    let service = shared::build_service(config)?;
    let params = args.to_params();

    tracing::info!(
        topic = %params.topic,
        news_type = %params.news_type,
        limit = params.limit,
        "Fetching AWS news"
    );
    output::print_info(&format!("Querying {} for '{}'...", service.base_url(), args.topic));

    match fetch_rendered(&service, &params).await {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            output::print_diagnostics(&e);
            Err(anyhow::anyhow!("{ERROR_PREFIX}{e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    fn args(topic: &str) -> FetchArgs {
        FetchArgs {
            topic: topic.into(),
            news_type: "all".into(),
            include_regional_expansions: false,
            limit: DEFAULT_LIMIT,
            since: None,
        }
    }

    #[test]
    fn to_params_carries_every_flag() {
        let mut a = args("EC2");
        a.news_type = "news".into();
        a.include_regional_expansions = true;
        a.limit = 3;
        a.since = Some("2025-01-01".into());

        let params = a.to_params();
        assert_eq!(params.topic, "EC2");
        assert_eq!(params.news_type, "news");
        assert!(params.include_regional_expansions);
        assert_eq!(params.limit, 3);
        assert_eq!(params.since_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn blank_topics_are_rejected() {
        assert!(parse_topic("").is_err());
        assert!(parse_topic(" \t ").is_err());
        assert_eq!(parse_topic("S3").as_deref(), Ok("S3"));
    }

    #[test]
    fn to_params_without_since() {
        assert!(args("S3").to_params().since_date.is_none());
    }

    #[tokio::test]
    async fn renders_envelope_from_upstream() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/articles")
                    .query_param("search", "Lambda");
                then.status(200)
                    .json_body(json!([{ "title": "Lambda adds a runtime" }]));
            })
            .await;

        let service = NewsQueryService::from_url_str(&server.url("/articles")).expect("url");
        let rendered = fetch_rendered(&service, &args("Lambda").to_params())
            .await
            .expect("fetch");

        let v: Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(v["topic"], "Lambda");
        assert_eq!(v["news_type"], "all");
        assert_eq!(v["articles"][0]["title"], "Lambda adds a runtime");
        assert!(rendered.contains('\n'));
    }

    #[tokio::test]
    async fn execute_reports_prefixed_error() {
        let mut a = args("Lambda");
        a.since = Some("yesterday".into());

        let err = execute(&a, &AwsNewsConfig::default())
            .await
            .expect_err("invalid date");
        assert!(err.to_string().starts_with("Error fetching AWS news: "));
    }
}
