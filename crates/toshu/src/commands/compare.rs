//! Compare command: similarity of two texts.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use toshu_core::similarity::{self, SimilarityScore};

use super::{CommandContext, heading, label, read_analysis_input};

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First text (e.g. your paragraph).
    pub a: Utf8PathBuf,

    /// Second text (e.g. a source you drew on).
    pub b: Utf8PathBuf,

    /// Also write the output to a timestamped report file.
    #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = "similarity")]
    pub save_report: Option<String>,
}

/// Print Jaccard, cosine and vocabulary-overlap scores for two files.
#[instrument(name = "cmd_compare", skip_all, fields(a = %args.a, b = %args.b))]
pub fn cmd_compare(args: CompareArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let text_a = read_analysis_input(&args.a, ctx.max_input)?;
    let text_b = read_analysis_input(&args.b, ctx.max_input)?;

    let score = similarity::compare(&text_a, &text_b)
        .with_context(|| format!("cannot compare {} and {}", args.a, args.b))?;
    debug!(?score, "comparison finished");

    let (text, plain) = if ctx.json {
        let json = serde_json::to_string_pretty(&score)?;
        (json.clone(), json)
    } else {
        (
            render(&score, &args, ctx.styled),
            render(&score, &args, false),
        )
    };
    ctx.emit(&text, &plain, args.save_report.as_deref())
}

fn render(score: &SimilarityScore, args: &CompareArgs, styled: bool) -> String {
    [
        heading(&format!("Similarity between {} and {}", args.a, args.b), styled),
        format!(
            "  {} {:.2}%",
            label("Jaccard (unique word overlap)", styled),
            score.jaccard_percent
        ),
        format!(
            "  {} {:.2}%",
            label("Cosine (frequency similarity)", styled),
            score.cosine_percent
        ),
        format!(
            "  {} {:.2}%",
            label("Vocab overlap (smaller vocab)", styled),
            score.vocab_overlap_percent
        ),
    ]
    .join("\n")
}
