//! Runs the extractor over every document in the input folder and streams the rows to CSV.
use crate::config::Config;
use crate::entry::DiaryEntry;
use crate::export::EntryWriter;
use crate::extract::{ExtractOptions, InvalidDate, SourceFormat, extract_entries};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("input folder not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("could not list {}: {source}", path.display())]
    ListDirectory { path: PathBuf, source: io::Error },

    #[error("could not read {}: {source}", path.display())]
    DocumentRead { path: PathBuf, source: io::Error },

    #[error("skipped malformed {}: {source}", path.display())]
    DocumentMalformed { path: PathBuf, source: InvalidDate },

    #[error("could not create {}: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("could not write CSV output: {0}")]
    Write(#[from] csv::Error),
}

/// What came out of one successfully processed document.
#[derive(Debug)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub entries: usize,
}

/// Emitted while exporting, in document order.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Started(&'a Path),
    Exported(&'a DocumentReport),
    Skipped(&'a ExportError),
}

/// Outcome of a whole run. `errors` only holds documents that were skipped.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub documents: Vec<DocumentReport>,
    pub errors: Vec<ExportError>,
}

impl ExportReport {
    pub fn total_entries(&self) -> usize {
        self.documents.iter().map(|doc| doc.entries).sum()
    }
}

/// Exports a folder of legacy diary documents as one CSV file.
#[derive(Debug)]
pub struct Exporter {
    pub config: Config,
}

impl Exporter {
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    fn extract_options(&self) -> ExtractOptions<'_> {
        ExtractOptions {
            entry_class: &self.config.entry_class,
            category: &self.config.category,
        }
    }

    /// Documents in the input folder with a configured extension, sorted by file name.
    ///
    /// Fails with [`ExportError::DirectoryNotFound`] when the folder is missing.
    pub fn list_documents(&self) -> Result<Vec<PathBuf>, ExportError> {
        let dir = &self.config.input_dir;
        if !dir.is_dir() {
            return Err(ExportError::DirectoryNotFound(dir.clone()));
        }
        let read_dir = fs::read_dir(dir).map_err(|source| ExportError::ListDirectory {
            path: dir.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|source| ExportError::ListDirectory {
                path: dir.clone(),
                source,
            })?;
            let path = dir_entry.path();
            if self.config.accepts(&path) {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    /// Reads one document as UTF-8 and extracts its entries.
    pub fn extract_file(&self, path: &Path) -> Result<(SourceFormat, Vec<DiaryEntry>), ExportError> {
        let content = fs::read_to_string(path).map_err(|source| ExportError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        extract_entries(&content, &self.extract_options()).map_err(|source| {
            ExportError::DocumentMalformed {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Exports every document into `out`.
    ///
    /// The input folder is checked before anything is written. A document that cannot be read
    /// or holds an impossible date is recorded in the report and skipped wholesale; rows from
    /// the other documents are kept.
    pub fn export<W: io::Write>(&self, out: W) -> Result<ExportReport, ExportError> {
        let documents = self.list_documents()?;
        self.export_documents(&documents, out, |_| {})
    }

    /// Like [`export`](Self::export), creating `output` only once the input folder is known
    /// to exist.
    pub fn export_to_file(&self, output: &Path) -> Result<ExportReport, ExportError> {
        self.export_to_file_with(output, |_| {})
    }

    /// [`export_to_file`](Self::export_to_file), reporting each document to `on_progress`
    /// as soon as it is handled.
    pub fn export_to_file_with<F>(
        &self,
        output: &Path,
        on_progress: F,
    ) -> Result<ExportReport, ExportError>
    where
        F: FnMut(Progress<'_>),
    {
        let documents = self.list_documents()?;
        let file = File::create(output).map_err(|source| ExportError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;
        self.export_documents(&documents, BufWriter::new(file), on_progress)
    }

    fn export_documents<W, F>(
        &self,
        documents: &[PathBuf],
        out: W,
        mut on_progress: F,
    ) -> Result<ExportReport, ExportError>
    where
        W: io::Write,
        F: FnMut(Progress<'_>),
    {
        let mut writer = EntryWriter::new(out)?;
        let mut report = ExportReport::default();

        for path in documents {
            tracing::info!(path = %path.display(), "processing document");
            on_progress(Progress::Started(path));
            match self.extract_file(path) {
                Ok((format, entries)) => {
                    writer.write_entries(&entries)?;
                    tracing::info!(
                        path = %path.display(),
                        %format,
                        entries = entries.len(),
                        "document exported"
                    );
                    let doc = DocumentReport {
                        path: path.clone(),
                        format,
                        entries: entries.len(),
                    };
                    on_progress(Progress::Exported(&doc));
                    report.documents.push(doc);
                }
                Err(error) => {
                    tracing::warn!("skipping document: {error}");
                    on_progress(Progress::Skipped(&error));
                    report.errors.push(error);
                }
            }
        }

        writer.into_inner()?;
        Ok(report)
    }
}
