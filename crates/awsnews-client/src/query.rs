//! Upstream query construction.
//!
//! Parameters are emitted in a fixed order so that the resulting URL is
//! deterministic for a given [`NewsQueryParams`].

use chrono::{NaiveDate, NaiveTime};

use awsnews_types::{NewsError, NewsQueryParams};

/// Calendar and week-date layouts, keyed by their exact length.
const DATE_FORMATS: &[(usize, &str)] = &[
    (10, "%Y-%m-%d"),
    (8, "%Y%m%d"),
    (10, "%G-W%V-%u"),
    (8, "%GW%V%u"),
];

/// Clock layouts, keyed by the length of the text without fraction.
const CLOCK_FORMATS: &[(usize, &str)] = &[
    (8, "%H:%M:%S"),
    (6, "%H%M%S"),
    (5, "%H:%M"),
    (4, "%H%M"),
];

/// Checks that `raw` is an ISO 8601 date or timestamp.
///
/// Accepts calendar (`2025-05-01`, `20250501`) and week (`2025-W18-4`,
/// `2025-W18`) dates, optionally followed by `T` or a space and a time
/// of hour, minute or second precision, extended or basic, with an
/// optional fraction and a `Z` or `±HH[:MM]` offset. The value itself is
/// never rewritten; callers forward the original text.
///
/// # Errors
///
/// Returns `NewsError::Validation` with a message naming the expected
/// format when nothing matches.
pub fn validate_since_date(raw: &str) -> Result<(), NewsError> {
    if is_iso8601(raw) {
        Ok(())
    } else {
        Err(NewsError::invalid_date())
    }
}

fn is_iso8601(raw: &str) -> bool {
    match raw.find(|c: char| c == 'T' || c == ' ') {
        Some(i) => is_date(&raw[..i]) && is_time(&raw[i + 1..]),
        None => is_date(raw),
    }
}

fn is_date(date: &str) -> bool {
    let four_digit_year = date
        .get(..4)
        .is_some_and(|y| y.bytes().all(|b| b.is_ascii_digit()));
    if !four_digit_year {
        return false;
    }

    // A week date without a weekday means its Monday.
    let with_weekday = match date.len() {
        8 if date.contains("-W") => format!("{date}-1"),
        7 if date.contains('W') => format!("{date}1"),
        _ => date.to_string(),
    };

    DATE_FORMATS.iter().any(|(len, f)| {
        with_weekday.len() == *len && NaiveDate::parse_from_str(&with_weekday, f).is_ok()
    })
}

/// A time of day with an optional UTC offset.
fn is_time(time: &str) -> bool {
    if let Some(clock) = time.strip_suffix('Z') {
        return is_clock(clock, true);
    }
    match time.find(|c: char| c == '+' || c == '-') {
        Some(i) => is_clock(&time[..i], true) && is_clock(&time[i + 1..], false),
        None => is_clock(time, true),
    }
}

fn is_clock(clock: &str, allow_fraction: bool) -> bool {
    let (whole, fraction) = match clock.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (clock, None),
    };

    if let Some(fraction) = fraction {
        let has_seconds = whole.len() == 6 || whole.len() == 8;
        let digits = (1..=9).contains(&fraction.len())
            && fraction.bytes().all(|b| b.is_ascii_digit());
        if !(allow_fraction && has_seconds && digits) {
            return false;
        }
    }

    if whole.len() == 2 {
        return NaiveTime::parse_from_str(&format!("{whole}:00"), "%H:%M").is_ok();
    }
    CLOCK_FORMATS
        .iter()
        .any(|(len, f)| whole.len() == *len && NaiveTime::parse_from_str(whole, f).is_ok())
}

/// Builds the ordered `(key, value)` query pairs for the upstream call.
///
/// # Errors
///
/// Returns `NewsError::Validation` if `since_date` is malformed. Nothing
/// is sent in that case. An empty `since_date` counts as absent.
pub fn build_query(params: &NewsQueryParams) -> Result<Vec<(&'static str, String)>, NewsError> {
    let mut pairs = vec![
        ("page_size", params.limit.to_string()),
        (
            "hide_regional_expansions",
            (!params.include_regional_expansions).to_string(),
        ),
        ("search", params.topic.clone()),
    ];

    if let Some(article_type) = params.kind().article_type() {
        pairs.push(("article_type", article_type.to_string()));
    }

    if let Some(since) = params.since_date.as_deref().filter(|s| !s.is_empty()) {
        validate_since_date(since)?;
        pairs.push(("since", since.to_string()));
    }

    Ok(pairs)
}
