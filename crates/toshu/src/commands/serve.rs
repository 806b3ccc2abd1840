//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::ToshuServer;

use super::CommandContext;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server until the client disconnects.
///
/// stdout carries the protocol; logs go to stderr and the log file.
#[instrument(name = "cmd_serve", skip_all, fields(data_dir = %ctx.data_dir))]
pub async fn cmd_serve(_args: ServeArgs, ctx: CommandContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let server = ToshuServer::new(store, ctx.report_dir.clone(), ctx.max_input);

    info!("starting MCP server on stdio");
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server task failed")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
