//! `NewsQueryService`: one validated GET against the news API.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use awsnews_types::{NewsError, NewsQueryParams, QueryResult};

use crate::query::build_query;

/// Production endpoint of the AWS news API.
pub const DEFAULT_BASE_URL: &str = "https://api.aws-news.com/articles";

/// Fetches AWS news articles for a topic.
///
/// Holds only the endpoint; each call builds and drops its own HTTP
/// client, so concurrent calls share nothing mutable.
#[derive(Debug, Clone)]
pub struct NewsQueryService {
    base_url: Url,
}

impl NewsQueryService {
    /// Creates a service targeting `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Parses `base_url` and creates a service targeting it.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `base_url` is not an absolute URL.
    pub fn from_url_str(base_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(base_url).map(Self::new)
    }

    /// The configured endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full request URL for `params`.
    ///
    /// # Errors
    ///
    /// Returns `NewsError::Validation` if `since_date` is malformed.
    pub fn request_url(&self, params: &NewsQueryParams) -> Result<Url, NewsError> {
        let pairs = build_query(params)?;
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    /// Fetches news for `params`.
    ///
    /// Validation happens before any I/O. Exactly one GET is issued
    /// otherwise, with no retry.
    ///
    /// # Errors
    ///
    /// - `NewsError::Validation` for a malformed `since_date`.
    /// - `NewsError::Upstream` for a transport failure, a non-2xx status
    ///   or a body that is not a JSON array.
    pub async fn fetch_news(&self, params: &NewsQueryParams) -> Result<QueryResult, NewsError> {
        let url = self.request_url(params)?;
        debug!(topic = %params.topic, %url, "fetching AWS news");

        let client = Client::builder()
            .build()
            .map_err(|e| NewsError::upstream(format!("failed to create HTTP client: {e}")))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsError::upstream(format!("request to news API failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, topic = %params.topic, "news API returned an error status");
            return Err(NewsError::upstream(format!(
                "news API returned HTTP {status}"
            )));
        }

        let articles: Vec<Value> = response
            .json()
            .await
            .map_err(|e| NewsError::upstream(format!("invalid JSON from news API: {e}")))?;

        debug!(count = articles.len(), "received articles");
        Ok(QueryResult::new(params, articles))
    }
}
