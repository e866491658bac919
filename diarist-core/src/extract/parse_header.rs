//! Splits `<date> - <title>` headers and normalizes the date half.
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SLASH_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Date given to markup entries that have no bold header.
pub const FALLBACK_DATE: &str = "1970-01-01 00:00:00";

/// A date shaped like a known format that is not a real calendar date (e.g. `02/30/2024`).
/// The whole document is considered malformed.
#[derive(Debug, Error)]
#[error("invalid date `{date}`: {source}")]
pub struct InvalidDate {
    pub date: String,
    source: chrono::ParseError,
}

/// A recognized date shape and how to turn a match into canonical form.
struct DateMatcher {
    pattern: Regex,
    convert: fn(&str) -> Result<String, InvalidDate>,
}

/// Ordered: the first matcher whose pattern is found decides the result.
static DATE_MATCHERS: Lazy<Vec<DateMatcher>> = Lazy::new(|| {
    vec![
        DateMatcher {
            pattern: Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").expect("valid regex"),
            convert: |found| Ok(found.to_string()),
        },
        DateMatcher {
            pattern: Regex::new(r"\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2}").expect("valid regex"),
            convert: |found| {
                NaiveDateTime::parse_from_str(found, SLASH_FORMAT)
                    .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
                    .map_err(|source| InvalidDate {
                        date: found.to_string(),
                        source,
                    })
            },
        },
    ]
});

/// Splits a header on the first ` - `, or failing that on the first `|`.
/// Both halves come back trimmed.
pub fn split_header(header: &str) -> Option<(&str, &str)> {
    header
        .split_once(" - ")
        .or_else(|| header.split_once('|'))
        .map(|(date, title)| (date.trim(), title.trim()))
}

/// Normalizes a date to `YYYY-MM-DD HH:MM:SS`.
///
/// Text containing a canonical timestamp yields it verbatim, `MM/DD/YYYY HH:MM:SS` is
/// reformatted, and anything else is returned unchanged so it can be reviewed by hand.
/// A slash date that does not exist on the calendar is an error.
pub fn normalize_date(raw: &str) -> Result<String, InvalidDate> {
    for matcher in DATE_MATCHERS.iter() {
        if let Some(found) = matcher.pattern.find(raw) {
            return (matcher.convert)(found.as_str());
        }
    }
    tracing::debug!(date = raw, "unrecognized date kept for manual review");
    Ok(raw.to_string())
}

/// Parses an entry header into `(post_date, title)`.
///
/// # Arguments
///
/// * `header` - e.g. `"2024-03-05 10:00:00 - Morning thoughts"` or
///   `"03/05/2024 10:00:00 | Morning thoughts"`.
///
/// A header without either delimiter is returned trimmed as both the date and the title.
pub fn parse_date_title(header: &str) -> Result<(String, String), InvalidDate> {
    match split_header(header) {
        Some((date, title)) => Ok((normalize_date(date)?, title.to_string())),
        None => {
            let header = header.trim();
            tracing::debug!(header, "header has no date delimiter");
            Ok((header.to_string(), header.to_string()))
        }
    }
}
