mod render;

use anyhow::{Context, Result};
use clap::Parser;
use diarist_core::{Config, Exporter};
use render::{ColorMode, RenderOptions, Renderer};
use std::path::PathBuf;
use std::process::ExitCode;

/// diarist — export legacy diary documents to a database-ready CSV
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Folder holding the diary documents. Overrides `input_dir` from the config file.
    #[arg(long, short, env = "DIARIST_INPUT")]
    input: Option<PathBuf>,
    /// CSV file to write. Overrides `output_file` from the config file.
    #[arg(long, short, env = "DIARIST_OUTPUT")]
    output: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("diarist: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(input) = cli.input {
        config.input_dir = input;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }

    let renderer = Renderer::new(RenderOptions {
        use_color: cli.color.use_color(),
    });
    renderer.print_md("# Diary export");

    let output = config.output_file.clone();
    let exporter = Exporter::with_config(config);
    let report = exporter
        .export_to_file_with(&output, |progress| renderer.print_progress(progress))
        .with_context(|| format!("exporting {}", exporter.config.input_dir.display()))?;

    renderer.print_summary(&report, &output);
    renderer.print_import_instructions();
    Ok(())
}
