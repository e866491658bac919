use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENTRY_CLASS: &str = "diarycontent";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding the legacy diary documents.
    pub input_dir: PathBuf,
    /// CSV file the export is written to.
    pub output_file: PathBuf,
    /// Extensions (without the dot) of files treated as documents. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Class that marks an entry block (`<div class="diarycontent">`) in markup documents.
    pub entry_class: String,
    /// Category written on every exported row.
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    input_dir: Option<PathBuf>,
    output_file: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    entry_class: Option<String>,
    category: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults
    /// for every missing field. A malformed file is reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            tracing::warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let extensions = file_config
            .extensions
            .map(|exts| exts.iter().map(|e| normalize_extension(e)).collect())
            .unwrap_or_else(|| vec!["html".to_string()]);

        Self {
            input_dir: file_config
                .input_dir
                .unwrap_or_else(|| PathBuf::from("./diary")),
            output_file: file_config
                .output_file
                .unwrap_or_else(|| PathBuf::from("./diaryentries.csv")),
            extensions,
            entry_class: file_config
                .entry_class
                .unwrap_or_else(|| DEFAULT_ENTRY_CLASS.to_string()),
            category: file_config
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }

    /// Whether `path` carries one of the configured document extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|known| *known == ext)
            })
            .unwrap_or(false)
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("diarist")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("diarist").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
