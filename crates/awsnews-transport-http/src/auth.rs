//! Bearer token check for the MCP endpoints (`/mcp`, `/sse`, `/messages/`).
//!
//! This guards the MCP front end only; the upstream news API is
//! always called anonymously.

use axum::http::{header, HeaderMap, StatusCode};

/// Validates the `Authorization: Bearer <token>` header.
///
/// The scheme name is matched case-insensitively; the token is not.
///
/// # Errors
///
/// Returns `StatusCode::UNAUTHORIZED` if the header is absent, uses a
/// different scheme, or carries a token other than `expected`.
pub(crate) fn validate_bearer(headers: &HeaderMap, expected: &str) -> Result<(), StatusCode> {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim());

    match provided {
        Some(token) if tokens_match(token, expected) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn valid_bearer_passes() {
        assert!(validate_bearer(&with_auth("Bearer secret123"), "secret123").is_ok());
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(validate_bearer(&with_auth("bearer secret123"), "secret123").is_ok());
    }

    #[test]
    fn wrong_token_rejected() {
        assert_eq!(
            validate_bearer(&with_auth("Bearer secret124"), "secret123"),
            Err(StatusCode::UNAUTHORIZED)
        );
        assert!(validate_bearer(&with_auth("Bearer secret"), "secret123").is_err());
    }

    #[test]
    fn missing_header_rejected() {
        assert!(validate_bearer(&HeaderMap::new(), "secret123").is_err());
    }

    #[test]
    fn basic_auth_scheme_rejected() {
        assert!(validate_bearer(&with_auth("Basic secret123"), "secret123").is_err());
    }
}
