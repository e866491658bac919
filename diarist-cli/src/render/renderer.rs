use super::theme::OneDark;
use diarist_core::{DocumentReport, ExportError, ExportReport, Progress};
use std::path::Path;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// Prints one line per progress event, so each document's outcome follows its name.
    pub fn print_progress(&self, progress: Progress<'_>) {
        match progress {
            Progress::Started(path) => println!("Processing: {}", file_name(path)),
            Progress::Exported(doc) => self.print_document(doc),
            Progress::Skipped(error) => self.print_skipped(error),
        }
    }

    fn print_document(&self, doc: &DocumentReport) {
        let mut format = format!("[{}]", doc.format.as_ref());
        let mut count = format!("added {} entries", doc.entries);
        if self.opts.use_color {
            format = format.with(Color::Blue).to_string();
            count = count.with(Color::Green).to_string();
        }
        println!("  {count} {format}");
    }

    fn print_skipped(&self, error: &ExportError) {
        let mut message = format!("skipped: {error}");
        if self.opts.use_color {
            message = message.with(Color::Red).to_string();
        }
        println!("  {message}");
    }

    pub fn print_summary(&self, report: &ExportReport, output: &Path) {
        self.print_info(&format!(
            "Done! {} entries from {} documents written to {} ({} skipped)",
            report.total_entries(),
            report.documents.len(),
            output.display(),
            report.errors.len()
        ));
    }

    /// How to load the CSV with a database import tool such as phpMyAdmin.
    pub fn print_import_instructions(&self) {
        self.print_md(
            "\n## Import with your database tool:\n\
             1. Format: `CSV`\n\
             2. Columns enclosed by `\"`\n\
             3. First line contains column names",
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
