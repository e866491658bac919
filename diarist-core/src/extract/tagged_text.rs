//! Parses documents made of `TITLE: ... DATE: ... BODY: ...` groups.
use super::parse_header::{InvalidDate, normalize_date, split_header};
use super::{DATE_MARKER, TITLE_MARKER};
use crate::entry::DiaryEntry;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches everything of a group up to where its body starts.
static GROUP_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)TITLE:\s*(.*?)\s*DATE:\s*(.*?)\s*BODY:\s*").expect("valid regex")
});

/// A `-----` rule and whatever follows it inside the date text.
static DATE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)-{5,}.*$").expect("valid regex"));

/// Extracts one entry per `TITLE:`/`DATE:`/`BODY:` group, in document order.
///
/// A body runs until the next `TITLE:` or `DATE:` marker, or the end of the text.
/// Groups missing any of the three markers are ignored. An impossible date fails the
/// whole document.
pub fn parse_tagged_text(text: &str, category: &str) -> Result<Vec<DiaryEntry>, InvalidDate> {
    let mut entries = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = GROUP_HEAD.captures_at(text, cursor) {
        let (Some(head), Some(title), Some(date)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        let body_start = head.end();
        let body_end = next_marker(text, body_start);

        let post_date = normalize_tagged_date(date.as_str())?;
        entries.push(DiaryEntry::new(
            title.as_str(),
            &text[body_start..body_end],
            &post_date,
            category,
        ));

        // The marker that ended this body belongs to the next group.
        cursor = body_end;
    }
    Ok(entries)
}

/// Byte offset of the first `TITLE:` or `DATE:` at or after `from`, or the end of `text`.
fn next_marker(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    [TITLE_MARKER, DATE_MARKER]
        .iter()
        .filter_map(|marker| rest.find(marker))
        .min()
        .map_or(text.len(), |offset| from + offset)
}

/// Drops a trailing separator rule, then normalizes. A date line that still carries a
/// `date - title` header only contributes its date half.
fn normalize_tagged_date(raw: &str) -> Result<String, InvalidDate> {
    let cleaned = DATE_SEPARATOR.replace(raw, "");
    let cleaned = cleaned.trim();
    match split_header(cleaned) {
        Some((date, _)) => normalize_date(date),
        None => normalize_date(cleaned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY: &str = "Uncategorized";

    #[test]
    fn parse_three_sequential_groups() {
        let text = r#"TITLE: First day
DATE: 2024-03-05 10:00:00
BODY: Woke up early.
Had coffee.

TITLE: Second day
DATE: 03/06/2024 21:15:00
BODY: Long walk.

TITLE: Third day
DATE: 2024-03-07 08:30:00
BODY: Rain all day.
"#;
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].title, "First day");
        assert_eq!(entries[0].post_date, "2024-03-05 10:00:00");
        assert_eq!(entries[0].content, "Woke up early.\nHad coffee.");
        assert_eq!(entries[0].anchor_name, "mar2024_05");

        assert_eq!(entries[1].title, "Second day");
        assert_eq!(entries[1].post_date, "2024-03-06 21:15:00");
        assert_eq!(entries[1].content, "Long walk.");

        assert_eq!(entries[2].title, "Third day");
        assert_eq!(entries[2].content, "Rain all day.");
        assert!(entries.iter().all(|e| !e.content.is_empty()));
    }

    #[test]
    fn groups_on_a_single_line() {
        let text = "TITLE: A DATE: 2024-01-01 00:00:00 BODY: one TITLE: B DATE: 2024-01-02 00:00:00 BODY: two";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].content, "one");
        assert_eq!(entries[1].title, "B");
        assert_eq!(entries[1].content, "two");
    }

    #[test]
    fn separator_rule_is_stripped_from_date() {
        let text = "TITLE: Ruled\nDATE: 2024-03-05 10:00:00 ----------\nBODY: Body text";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].post_date, "2024-03-05 10:00:00");

        let text = "TITLE: Ruled\nDATE: March 5th\n-----\nBODY: Body text";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries[0].post_date, "March 5th");
        assert_eq!(entries[0].anchor_name, "unknown");
    }

    #[test]
    fn date_line_with_trailing_note_uses_date_half() {
        let text = "TITLE: Noted\nDATE: 03/05/2024 10:00:00 - written late\nBODY: Body text";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries[0].post_date, "2024-03-05 10:00:00");
        assert_eq!(entries[0].anchor_name, "mar2024_05");

        let text = "TITLE: Noted\nDATE: sometime | later\nBODY: Body text";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries[0].post_date, "sometime");
    }

    #[test]
    fn impossible_date_fails_the_document() {
        let text = "TITLE: Good\nDATE: 2024-03-05 10:00:00\nBODY: fine\nTITLE: Bad\nDATE: 02/30/2024 10:00:00\nBODY: never";
        let err = parse_tagged_text(text, CATEGORY).unwrap_err();
        assert_eq!(err.date, "02/30/2024 10:00:00");
    }

    #[test]
    fn body_stops_at_stray_date_marker() {
        let text = "TITLE: A\nDATE: 2024-01-01 00:00:00\nBODY: kept\nDATE: stray\nTITLE: B\nDATE: 2024-01-02 00:00:00\nBODY: second";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "kept");
        assert_eq!(entries[1].title, "B");
        assert_eq!(entries[1].content, "second");
    }

    #[test]
    fn group_without_body_marker_is_ignored() {
        let text = "TITLE: Lonely\nDATE: 2024-01-01 00:00:00\nno body here";
        assert!(parse_tagged_text(text, CATEGORY).unwrap().is_empty());
    }

    #[test]
    fn empty_body_is_allowed() {
        let text = "TITLE: A\nDATE: 2024-01-01 00:00:00\nBODY:\nTITLE: B\nDATE: 2024-01-02 00:00:00\nBODY: b";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].content.is_empty());
        assert_eq!(entries[1].content, "b");
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let text = "TITLE: Café ☕\nDATE: 2024-03-05 10:00:00\nBODY: Très bien — 日記";
        let entries = parse_tagged_text(text, CATEGORY).unwrap();
        assert_eq!(entries[0].title, "Café ☕");
        assert_eq!(entries[0].content, "Très bien — 日記");
    }

    #[test]
    fn next_marker_defaults_to_end() {
        assert_eq!(next_marker("abc", 0), 3);
        assert_eq!(next_marker("ab DATE: x TITLE: y", 0), 3);
        assert_eq!(next_marker("ab TITLE: x DATE: y", 4), 12);
    }
}
