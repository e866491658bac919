use chrono::NaiveDate;

pub const UNKNOWN_ANCHOR: &str = "unknown";

/// Builds the deep-link slug for an entry, e.g. `2025-05-09 08:00:00` becomes `may2025_09`.
///
/// Only the first whitespace-delimited token is read, as `YYYY-MM-DD`. Anything else
/// (including dates left for manual review) yields [`UNKNOWN_ANCHOR`].
pub fn generate_anchor(post_date: &str) -> String {
    post_date
        .split_whitespace()
        .next()
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|date| date.format("%b%Y_%d").to_string().to_lowercase())
        .unwrap_or_else(|| UNKNOWN_ANCHOR.to_string())
}
