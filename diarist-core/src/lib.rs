pub mod anchor;
pub mod config;
pub mod entry;
pub mod export;
pub mod exporter;
pub mod extract;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use entry::DiaryEntry;
pub use exporter::{DocumentReport, ExportError, ExportReport, Exporter, Progress};
pub use extract::{ExtractOptions, SourceFormat, detect_format, extract_entries};
