//! CLI command definitions and dispatch.

pub mod check;
pub mod generate;
pub mod list;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use composegen_common::constants::{BIN_NAME, DEFAULT_VERSION_FILE};
use composegen_common::version::read_version;
use composegen_compose::model::ComposeConfig;
use composegen_compose::stacks::StackKind;

/// compose-gen — Compose documents for the NeoPRISM test environments.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// File holding the project version used for default image tags.
    #[arg(long, global = true, default_value = DEFAULT_VERSION_FILE)]
    pub version_file: PathBuf,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the stacks that can be generated.
    List,
    /// Render a stack as a Compose document.
    Generate(generate::GenerateArgs),
    /// Show the startup order of a stack without writing anything.
    Plan(plan::PlanArgs),
    /// Strictly re-validate an existing Compose document.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::List => list::execute(),
        Command::Generate(args) => generate::execute(args, &cli.version_file),
        Command::Plan(args) => plan::execute(args, &cli.version_file),
        Command::Check(args) => check::execute(args),
    }
}

/// Reads the project version and the optional options file, then builds
/// `stack`.
fn build_stack(
    stack: StackKind,
    options: Option<&Path>,
    version_file: &Path,
) -> anyhow::Result<ComposeConfig> {
    let version = read_version(version_file)?;
    let options_yaml = options
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))
        })
        .transpose()?;
    let config = stack
        .build(options_yaml.as_deref(), &version)
        .with_context(|| format!("failed to build stack {stack}"))?;
    Ok(config)
}
