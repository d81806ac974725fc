//! `compose-gen check` — Strictly re-validate an existing Compose document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use composegen_common::constants::DEFAULT_OUTPUT_FILE;
use composegen_compose::model::ComposeConfig;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the Compose document.
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    pub file: PathBuf,
}

/// Executes the `check` command.
///
/// The document must use only the keys this tool emits, and its
/// dependencies and volumes must be closed and acyclic.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let config = ComposeConfig::from_yaml(&content)
        .with_context(|| format!("{} is not a valid compose document", args.file.display()))?;
    println!(
        "{}: ok ({} services, {} volumes)",
        args.file.display(),
        config.services().len(),
        config.volumes().map_or(0, std::collections::BTreeMap::len)
    );
    Ok(())
}
