//! Stats command: words, characters, pages and reading time.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use toshu_core::stats::{self, DetailedStats};

use super::{CommandContext, file_or_document, heading, label};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// File to analyze (defaults to the stored document).
    pub file: Option<Utf8PathBuf>,

    /// Include character-without-spaces, sentence and paragraph counts.
    #[arg(long)]
    pub detailed: bool,

    /// Also write the output to a timestamped report file.
    #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = "stats")]
    pub save_report: Option<String>,
}

/// Print statistics for a file or the stored document.
#[instrument(name = "cmd_stats", skip_all, fields(file = ?args.file))]
pub fn cmd_stats(args: StatsArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    debug!(detailed = args.detailed, "executing stats command");

    let (content, source) = file_or_document(args.file.as_deref(), ctx)?;
    let report = stats::compute_detailed_stats(&content);

    let (text, plain) = if ctx.json {
        let json = if args.detailed {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string_pretty(&report.stats)?
        };
        (json.clone(), json)
    } else {
        (
            render(&report, &source, args.detailed, ctx.styled),
            render(&report, &source, args.detailed, false),
        )
    };
    ctx.emit(&text, &plain, args.save_report.as_deref())
}

fn render(report: &DetailedStats, source: &str, detailed: bool, styled: bool) -> String {
    let s = &report.stats;
    let mut lines = vec![
        heading(&format!("Statistics for {source}"), styled),
        format!("{} {}", label("Words", styled), s.word_count),
        format!("{} {}", label("Characters", styled), s.character_count),
        format!("{} {:.1}", label("Pages", styled), s.page_count),
        format!("{} {}", label("Reading time", styled), s.reading_time),
    ];
    if detailed {
        lines.push(format!(
            "{} {}",
            label("Characters (no spaces)", styled),
            report.characters_no_spaces
        ));
        lines.push(format!("{} {}", label("Sentences", styled), report.sentence_count));
        lines.push(format!("{} {}", label("Paragraphs", styled), report.paragraph_count));
    }
    lines.join("\n")
}
