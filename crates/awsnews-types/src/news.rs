//! News query parameters and the response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default page size requested from the upstream service.
pub const DEFAULT_LIMIT: u32 = 40;

/// Kind of article to request.
///
/// Parsing is lenient: anything that is not recognisably
/// `news` or `blog(s)` behaves like [`NewsType::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsType {
    /// Both news posts and blog posts.
    #[default]
    All,
    /// "What's New" announcements only.
    News,
    /// Blog posts only.
    Blogs,
}

impl NewsType {
    /// Classifies a raw filter value, case-insensitively.
    pub fn from_filter(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "news" => Self::News,
            "blogs" | "blog" => Self::Blogs,
            _ => Self::All,
        }
    }

    /// Value of the upstream `article_type` parameter, if any.
    ///
    /// `All` sends no filter so the upstream returns both kinds.
    pub fn article_type(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::News => Some("news"),
            Self::Blogs => Some("blog"),
        }
    }

    /// Canonical name as advertised in the tool schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::News => "news",
            Self::Blogs => "blogs",
        }
    }
}

impl fmt::Display for NewsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single news lookup.
///
/// `news_type` keeps the caller's raw text so it can be echoed back
/// unchanged in the [`QueryResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQueryParams {
    /// AWS service or subject to search for (e.g. `s3`).
    pub topic: String,
    /// Raw article-type filter (`all`, `news`, `blogs`, ...).
    pub news_type: String,
    /// Whether regional expansion announcements are included.
    pub include_regional_expansions: bool,
    /// Upstream page size.
    pub limit: u32,
    /// Optional ISO 8601 lower bound on publication date.
    pub since_date: Option<String>,
}

impl NewsQueryParams {
    /// Creates parameters for `topic` with every filter at its default.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            news_type: NewsType::All.as_str().to_string(),
            include_regional_expansions: false,
            limit: DEFAULT_LIMIT,
            since_date: None,
        }
    }

    /// Sets the article-type filter.
    pub fn with_news_type(mut self, news_type: impl Into<String>) -> Self {
        self.news_type = news_type.into();
        self
    }

    /// Includes or hides regional expansion announcements.
    pub fn with_regional_expansions(mut self, include: bool) -> Self {
        self.include_regional_expansions = include;
        self
    }

    /// Sets the upstream page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the ISO 8601 lower date bound.
    pub fn with_since_date(mut self, since: impl Into<String>) -> Self {
        self.since_date = Some(since.into());
        self
    }

    /// The classified article-type filter.
    pub fn kind(&self) -> NewsType {
        NewsType::from_filter(&self.news_type)
    }
}

/// Envelope returned to the caller: echoed inputs plus the articles.
///
/// Articles are opaque upstream records and are never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub topic: String,
    pub news_type: String,
    pub include_regional_expansions: bool,
    pub articles: Vec<Value>,
}

impl QueryResult {
    /// Wraps `articles` with the parameters that produced them.
    pub fn new(params: &NewsQueryParams, articles: Vec<Value>) -> Self {
        Self {
            topic: params.topic.clone(),
            news_type: params.news_type.clone(),
            include_regional_expansions: params.include_regional_expansions,
            articles,
        }
    }

    /// Pretty-prints the envelope with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
