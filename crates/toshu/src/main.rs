//! toshu CLI
#![deny(unsafe_code)]

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use toshu::commands::CommandContext;
use toshu::{Cli, Commands, commands};
use toshu_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn utf8_path(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8_path(cwd, "current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        loader = loader.with_file(utf8_path(config_path.clone(), "config path")?);
    }
    let (mut config, config_sources) = loader.load().context("failed to load configuration")?;
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(utf8_path(dir.clone(), "data directory")?);
    }

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    let ctx = CommandContext {
        json: cli.json,
        max_input: config.max_input(),
        data_dir: config.data_dir(),
        report_dir: config.report_dir(),
        styled: cli.color.styles_stdout(),
    };

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        styled = ctx.styled,
        chdir = ?cli.chdir,
        data_dir = %ctx.data_dir,
        "CLI initialized"
    );

    let result = match command {
        Commands::Stats(args) => commands::stats::cmd_stats(args, &ctx),
        Commands::Style(args) => commands::style::cmd_style(args, &ctx),
        Commands::Compare(args) => commands::compare::cmd_compare(args, &ctx),
        Commands::Document(cmd) => commands::document::cmd_document(cmd, &ctx),
        Commands::Refs(cmd) => commands::refs::cmd_refs(cmd, &ctx),
        Commands::Notes(cmd) => commands::notes::cmd_notes(cmd, &ctx),
        Commands::Info(args) => commands::info::cmd_info(args, &ctx, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, ctx))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
