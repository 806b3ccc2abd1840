//! Notes command: show or replace stored sticky notes.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Subcommand};
use owo_colors::{OwoColorize, Stream::Stdout};
use tracing::instrument;

use super::{CommandContext, read_input_file};

/// `notes` subcommands.
#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// Print the stored sticky notes as JSON
    Show,
    /// Replace all sticky notes with a JSON array
    Set(SetNotesArgs),
}

/// Arguments for `notes set`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SetNotesArgs {
    /// File containing a JSON array.
    pub file: Option<Utf8PathBuf>,

    /// JSON array given inline.
    #[arg(long)]
    pub json_text: Option<String>,
}

/// Run a `notes` subcommand.
#[instrument(name = "cmd_notes", skip_all)]
pub fn cmd_notes(command: NotesCommand, ctx: &CommandContext) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        // Notes are opaque JSON, so this prints JSON with or without --json.
        NotesCommand::Show => {
            println!("{}", serde_json::to_string_pretty(store.sticky_notes())?);
        }
        NotesCommand::Set(args) => {
            let (raw, source) = match (args.file, args.json_text) {
                (Some(path), _) => (read_input_file(&path, ctx.max_input)?, path.to_string()),
                (None, Some(text)) => (text, "--json-text".to_string()),
                (None, None) => anyhow::bail!("provide a FILE or --json-text"),
            };
            let notes: Vec<serde_json::Value> = serde_json::from_str(&raw)
                .with_context(|| format!("{source} is not a JSON array"))?;
            let count = notes.len();
            store
                .set_sticky_notes(notes)
                .context("failed to save sticky notes")?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(store.sticky_notes())?);
            } else {
                println!("{} ({count} notes)", "Sticky notes saved".if_supports_color(Stdout, |t| t.green()));
            }
        }
    }
    Ok(())
}
