//! Turns the text of one legacy diary document into `DiaryEntry` rows.
mod markup;
mod parse_header;
mod tagged_text;

pub use markup::parse_markup;
pub use parse_header::{FALLBACK_DATE, InvalidDate, normalize_date, parse_date_title, split_header};
pub use tagged_text::parse_tagged_text;

use crate::config::{DEFAULT_CATEGORY, DEFAULT_ENTRY_CLASS};
use crate::entry::DiaryEntry;
use strum_macros::{AsRefStr, Display};

pub const TITLE_MARKER: &str = "TITLE:";
pub const DATE_MARKER: &str = "DATE:";

/// The two legacy layouts a diary document can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SourceFormat {
    /// `TITLE: ... DATE: ... BODY: ...` groups in plain text.
    TaggedText,
    /// `<div class="diarycontent">` blocks with a `<b>date - title</b>` header.
    Markup,
}

#[derive(Clone, Debug)]
pub struct ExtractOptions<'a> {
    pub entry_class: &'a str,
    pub category: &'a str,
}

impl Default for ExtractOptions<'_> {
    fn default() -> Self {
        Self {
            entry_class: DEFAULT_ENTRY_CLASS,
            category: DEFAULT_CATEGORY,
        }
    }
}

/// A document is tagged text when both `TITLE:` and `DATE:` appear anywhere in it.
pub fn detect_format(content: &str) -> SourceFormat {
    if content.contains(TITLE_MARKER) && content.contains(DATE_MARKER) {
        SourceFormat::TaggedText
    } else {
        SourceFormat::Markup
    }
}

/// Detects the layout of `content` and extracts every entry in document order.
///
/// Fails when any entry carries an impossible date; no partial result is returned.
pub fn extract_entries(
    content: &str,
    opts: &ExtractOptions,
) -> Result<(SourceFormat, Vec<DiaryEntry>), InvalidDate> {
    let format = detect_format(content);
    let entries = match format {
        SourceFormat::TaggedText => parse_tagged_text(content, opts.category)?,
        SourceFormat::Markup => parse_markup(content, opts)?,
    };
    Ok((format, entries))
}
