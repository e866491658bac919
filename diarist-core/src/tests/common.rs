use crate::Config;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(input_dir: PathBuf) -> Config {
    Config {
        output_file: input_dir.join("diaryentries.csv"),
        input_dir,
        extensions: vec!["html".to_string()],
        entry_class: "diarycontent".to_string(),
        category: "Uncategorized".to_string(),
    }
}
