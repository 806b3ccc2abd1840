//! Style command: long sentences, irregular spacing and passive voice.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toshu_core::style::{self, Severity, StyleIssue};

use super::{CommandContext, file_or_document, heading};

/// Arguments for the `style` subcommand.
#[derive(Args, Debug)]
pub struct StyleArgs {
    /// File to check (defaults to the stored document).
    pub file: Option<Utf8PathBuf>,

    /// Also write the output to a timestamped report file.
    #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = "style")]
    pub save_report: Option<String>,
}

/// Print style suggestions for a file or the stored document.
///
/// Suggestions are advisory: finding some is not a failure.
#[instrument(name = "cmd_style", skip_all, fields(file = ?args.file))]
pub fn cmd_style(args: StyleArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let (content, source) = file_or_document(args.file.as_deref(), ctx)?;
    let issues = style::check_style(&content);
    debug!(count = issues.len(), "style check finished");

    let (text, plain) = if ctx.json {
        let json = serde_json::to_string_pretty(&issues)?;
        (json.clone(), json)
    } else {
        (
            render(&issues, &source, ctx.styled),
            render(&issues, &source, false),
        )
    };
    ctx.emit(&text, &plain, args.save_report.as_deref())
}

fn render(issues: &[StyleIssue], source: &str, styled: bool) -> String {
    let mut lines = vec![heading(&format!("Style check for {source}"), styled)];
    if issues.is_empty() {
        lines.push("No style issues found.".to_string());
        return lines.join("\n");
    }
    for issue in issues {
        let tag = format!("[{}]", issue.severity.as_str());
        let tag = match (styled, issue.severity) {
            (false, _) => tag,
            (true, Severity::Warning) => tag.yellow().to_string(),
            (true, Severity::Info) => tag.cyan().to_string(),
        };
        lines.push(format!("{tag} {} ({})", issue.text, issue.category.as_str()));
        lines.push(format!("    {}", issue.suggestion));
    }
    lines.join("\n")
}
