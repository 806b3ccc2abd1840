//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use owo_colors::{OwoColorize, Stream::Stderr};
use toshu_core::{StateStore, markup, report, store::StorePaths};

pub mod compare;
pub mod document;
pub mod info;
pub mod notes;
pub mod refs;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod stats;
pub mod style;

/// Settings every command may need, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Global `--json` flag.
    pub json: bool,
    /// Input size limit, `None` when disabled.
    pub max_input: Option<usize>,
    /// Directory backing the [`StateStore`].
    pub data_dir: Utf8PathBuf,
    /// Directory for `--save-report` output.
    pub report_dir: Utf8PathBuf,
    /// Whether stdout gets ANSI styling (`--color` resolved against the terminal).
    pub styled: bool,
}

impl CommandContext {
    /// Open the state store in the data directory.
    pub fn open_store(&self) -> anyhow::Result<StateStore> {
        StateStore::open(StorePaths::new(&self.data_dir))
            .with_context(|| format!("failed to open data directory {}", self.data_dir))
    }

    /// Print `text`, then save it as a report when `prefix` is set.
    ///
    /// `plain` is what goes into the file; it is `text` without colors.
    pub fn emit(&self, text: &str, plain: &str, prefix: Option<&str>) -> anyhow::Result<()> {
        println!("{text}");
        if let Some(prefix) = prefix {
            let mut content = plain.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            let path = report::save_report(&self.report_dir, prefix, &content)
                .context("failed to save report")?;
            eprintln!("{} {path}", "Report saved:".if_supports_color(Stderr, |t| t.dimmed()));
        }
        Ok(())
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Check size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a file for analysis. Markdown (`.md`) is reduced to its prose.
pub fn read_analysis_input(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if path.extension() == Some("md") {
        Ok(markup::strip_to_prose(&content))
    } else {
        Ok(content)
    }
}

/// Analysis input: the given file, or the stored document when absent.
///
/// Returns the text and a label naming where it came from.
pub fn file_or_document(
    file: Option<&Utf8Path>,
    ctx: &CommandContext,
) -> anyhow::Result<(String, String)> {
    match file {
        Some(path) => Ok((read_analysis_input(path, ctx.max_input)?, path.to_string())),
        None => {
            let store = ctx.open_store()?;
            Ok((store.document().to_string(), "stored document".to_string()))
        }
    }
}

/// A `label:` prefix, dimmed when `styled`.
pub(crate) fn label(text: &str, styled: bool) -> String {
    if styled {
        format!("{}:", text.dimmed())
    } else {
        format!("{text}:")
    }
}

/// A heading, bold when `styled`.
pub(crate) fn heading(text: &str, styled: bool) -> String {
    if styled {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
