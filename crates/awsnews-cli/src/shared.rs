//! Shared helpers used across CLI commands.
//!
//! Centralises config loading and construction of the news service so
//! every command resolves the upstream endpoint the same way.

use awsnews_client::NewsQueryService;
use awsnews_config::AwsNewsConfig;

/// Loads layered configuration (defaults, optional file, `AWS_NEWS_*` env).
///
/// # Errors
///
/// Returns an error if the file is missing or any layer fails to parse.
pub fn load_config(path: Option<&str>) -> anyhow::Result<AwsNewsConfig> {
    awsnews_config::load_config(path).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Builds the news service from the configured upstream base URL.
///
/// # Errors
///
/// Returns an error if `upstream.base_url` is not a valid absolute URL.
pub fn build_service(config: &AwsNewsConfig) -> anyhow::Result<NewsQueryService> {
    let base_url = &config.upstream.base_url;
    NewsQueryService::from_url_str(base_url)
        .map_err(|e| anyhow::anyhow!("invalid upstream.base_url '{base_url}': {e}"))
}

/// Picks the tracing filter: `-v`/`-vv` win over the configured level.
pub fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_service_uses_configured_base_url() {
        let mut config = AwsNewsConfig::default();
        config.upstream.base_url = "http://127.0.0.1:4000/articles".into();
        let service = build_service(&config).expect("service");
        assert_eq!(service.base_url().as_str(), "http://127.0.0.1:4000/articles");
    }

    #[test]
    fn build_service_with_defaults() {
        let service = build_service(&AwsNewsConfig::default()).expect("service");
        assert_eq!(service.base_url().host_str(), Some("api.aws-news.com"));
    }

    #[test]
    fn build_service_rejects_relative_url() {
        let mut config = AwsNewsConfig::default();
        config.upstream.base_url = "not a url".into();
        let err = build_service(&config).expect_err("invalid");
        assert!(err.to_string().contains("upstream.base_url"));
    }

    #[test]
    fn log_filter_prefers_verbosity() {
        assert_eq!(log_filter(0, "warn"), "warn");
        assert_eq!(log_filter(1, "warn"), "debug");
        assert_eq!(log_filter(3, "warn"), "trace");
    }

    #[test]
    fn load_config_missing_file_is_error() {
        let err = load_config(Some("/nonexistent/aws-news.toml")).expect_err("missing");
        assert!(err.to_string().contains("not found"));
    }
}
