//! # awsnews-client
//!
//! Builds validated queries for the AWS news API and performs the
//! single outbound GET, passing the JSON article list through untouched.

pub mod query;
pub mod service;

pub use query::{build_query, validate_since_date};
pub use service::{NewsQueryService, DEFAULT_BASE_URL};
