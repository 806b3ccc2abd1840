//! Document command: show or replace the stored document.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Subcommand};
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::instrument;

use toshu_core::stats;

use super::{CommandContext, read_input_file};

/// `document` subcommands.
#[derive(Subcommand, Debug)]
pub enum DocumentCommand {
    /// Print the stored document
    Show,
    /// Replace the stored document
    Set(SetArgs),
}

/// Arguments for `document set`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SetArgs {
    /// Read the new content from this file.
    pub file: Option<Utf8PathBuf>,

    /// Use this text as the new content.
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Serialize)]
struct DocumentOutput<'a> {
    content: &'a str,
    #[serde(rename = "wordCount")]
    word_count: usize,
}

/// Run a `document` subcommand.
#[instrument(name = "cmd_document", skip_all)]
pub fn cmd_document(command: DocumentCommand, ctx: &CommandContext) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        DocumentCommand::Show => {
            if ctx.json {
                let out = DocumentOutput {
                    content: store.document(),
                    word_count: stats::compute_stats(store.document()).word_count,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", store.document());
            }
        }
        DocumentCommand::Set(args) => {
            // Stored as-is: the document keeps its markup.
            let content = match (args.file, args.text) {
                (Some(path), _) => read_input_file(&path, ctx.max_input)?,
                (None, Some(text)) => text,
                (None, None) => anyhow::bail!("provide a FILE or --text"),
            };
            store
                .set_document(content)
                .context("failed to save document")?;
            let words = stats::compute_stats(store.document()).word_count;
            if ctx.json {
                let out = DocumentOutput {
                    content: store.document(),
                    word_count: words,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} ({words} words)", "Document saved".if_supports_color(Stdout, |t| t.green()));
            }
        }
    }
    Ok(())
}
