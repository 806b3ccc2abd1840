//! Info command implementation

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use toshu_core::config::{Config, ConfigSources};
use tracing::{debug, instrument};

use super::CommandContext;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    data_dir: String,
    report_dir: String,
    /// `null` when the limit is disabled.
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn new(config: &Config, sources: &ConfigSources, ctx: &CommandContext) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            data_dir: ctx.data_dir.to_string(),
            report_dir: ctx.report_dir.to_string(),
            max_input_bytes: ctx.max_input,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    ctx: &CommandContext,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = ctx.json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::new(config, sources, ctx),
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package.name.if_supports_color(Stdout, |t| t.bold()),
        info.package.version.if_supports_color(Stdout, |t| t.green())
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        println!("{}: {}", label("License"), info.package.license);
    }

    println!();
    println!(
        "{}",
        "Configuration".if_supports_color(Stdout, |t| t.bold().underline().to_string())
    );
    if let Some(ref path) = info.config.config_file {
        println!(
            "{}: {}",
            label("Config file"),
            path.if_supports_color(Stdout, |t| t.cyan())
        );
    } else {
        println!(
            "{}: {}",
            label("Config file"),
            "none loaded".if_supports_color(Stdout, |t| t.yellow())
        );
    }
    println!("{}: {}", label("Log level"), info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        println!("{}: {}", label("Log directory"), dir);
    }
    println!("{}: {}", label("Data directory"), info.config.data_dir);
    println!("{}: {}", label("Report directory"), info.config.report_dir);
    match info.config.max_input_bytes {
        Some(max) => println!("{}: {max} bytes", label("Input limit")),
        None => println!(
            "{}: {}",
            label("Input limit"),
            "disabled".if_supports_color(Stdout, |t| t.yellow())
        ),
    }

    Ok(())
}

fn label(text: &str) -> impl std::fmt::Display + '_ {
    text.if_supports_color(Stdout, |t| t.dimmed()).to_string()
}
