//! Refs command: list, add and delete stored references.

use anyhow::Context;
use clap::Subcommand;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde_json::json;
use tracing::instrument;

use toshu_core::Reference;

use super::CommandContext;

/// `refs` subcommands.
#[derive(Subcommand, Debug)]
pub enum RefsCommand {
    /// List references in insertion order
    List,
    /// Add a reference
    Add {
        /// Citation or note text.
        text: String,
    },
    /// Delete a reference by id
    Delete {
        /// Id shown by `refs list`.
        id: u64,
    },
}

/// Run a `refs` subcommand.
#[instrument(name = "cmd_refs", skip_all)]
pub fn cmd_refs(command: RefsCommand, ctx: &CommandContext) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        RefsCommand::List => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(store.references())?);
            } else if store.references().is_empty() {
                println!("{}", "No references.".if_supports_color(Stdout, |t| t.dimmed()));
            } else {
                for reference in store.references() {
                    print_reference(reference);
                }
            }
        }
        RefsCommand::Add { text } => {
            let reference = store
                .add_reference(text)
                .context("failed to add reference")?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&reference)?);
            } else {
                print_reference(&reference);
            }
        }
        RefsCommand::Delete { id } => {
            let deleted = store
                .delete_reference(id)
                .context("failed to delete reference")?;
            if ctx.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "id": id, "deleted": deleted }))?
                );
            } else if deleted {
                println!("{} {id}", "Deleted reference".if_supports_color(Stdout, |t| t.green()));
            } else {
                println!("{} {id}", "No reference with id".if_supports_color(Stdout, |t| t.yellow()));
            }
        }
    }
    Ok(())
}

fn print_reference(reference: &Reference) {
    println!(
        "{} {} {}",
        format!("[{}]", reference.id).if_supports_color(Stdout, |t| t.bold()),
        reference.text,
        reference
            .added
            .format("%Y-%m-%d %H:%M")
            .if_supports_color(Stdout, |t| t.dimmed())
    );
}
