//! CSV output in the column order the diary database expects.
use crate::entry::DiaryEntry;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::io;

pub const HEADER: [&str; 8] = [
    "id",
    "title",
    "content",
    "post_date",
    "updated_at",
    "category",
    "tags",
    "anchor_name",
];

/// Streams entries into a CSV file. The header row is written on creation, so an export
/// with no entries still has it.
pub struct EntryWriter<W: io::Write> {
    inner: csv::Writer<W>,
}

impl<W: io::Write> EntryWriter<W> {
    pub fn new(out: W) -> Result<Self, csv::Error> {
        let mut inner = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(out);
        inner.write_record(HEADER)?;
        Ok(Self { inner })
    }

    pub fn write_entries(&mut self, entries: &[DiaryEntry]) -> Result<(), csv::Error> {
        for entry in entries {
            self.inner.serialize(entry)?;
        }
        Ok(())
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.inner
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// Reads an export back into entries. The header row is required.
pub fn read_entries<R: io::Read>(input: R) -> Result<Vec<DiaryEntry>, csv::Error> {
    ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input)
        .deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(entries: &[DiaryEntry]) -> String {
        let mut writer = EntryWriter::new(Vec::new()).unwrap();
        writer.write_entries(entries).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn empty_export_has_header_only() {
        assert_eq!(
            write(&[]),
            "id,title,content,post_date,updated_at,category,tags,anchor_name\r\n"
        );
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let entry = DiaryEntry::new("Walk", "Nice day", "2024-03-05 10:00:00", "Uncategorized");
        let csv = write(&[entry]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            ",Walk,Nice day,2024-03-05 10:00:00,2024-03-05 10:00:00,Uncategorized,,mar2024_05"
        );
    }

    #[test]
    fn special_fields_are_quoted() {
        let entry = DiaryEntry::new(
            "Tea, then \"coffee\"",
            "<p class=\"a\">line one</p>\nline two",
            "2024-03-05 10:00:00",
            "Uncategorized",
        );
        let csv = write(&[entry]);
        assert!(csv.contains(r#","Tea, then ""coffee""","#));
        assert!(csv.contains("\"<p class=\"\"a\"\">line one</p>\nline two\""));
    }

    #[test]
    fn rows_round_trip_through_reader() {
        let entries = vec![
            DiaryEntry::new(
                "Tea, then \"coffee\"",
                "<p>multi\r\nline</p>\n<hr>",
                "2024-03-05 10:00:00",
                "Uncategorized",
            ),
            DiaryEntry::new("Café ☕", "日記 | notes", "just a title", "Uncategorized"),
            DiaryEntry::new("Untitled", "", "1970-01-01 00:00:00", "Uncategorized"),
        ];
        let csv = write(&entries);
        let read = read_entries(csv.as_bytes()).unwrap();
        assert_eq!(read, entries);
    }
}
