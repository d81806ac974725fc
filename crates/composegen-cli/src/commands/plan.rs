//! `compose-gen plan` — Show the startup order of a stack.

use std::path::{Path, PathBuf};

use clap::Args;
use composegen_compose::stacks::StackKind;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Stack to plan.
    pub stack: StackKind,

    /// YAML file with stack options. Defaults apply when omitted.
    #[arg(long)]
    pub options: Option<PathBuf>,
}

/// Executes the `plan` command.
///
/// Builds the stack and prints its services in the order `docker compose`
/// would start them, with each service's image and dependencies.
///
/// # Errors
///
/// Returns an error if the stack fails to build or its dependency graph
/// has no startup order.
pub fn execute(args: PlanArgs, version_file: &Path) -> anyhow::Result<()> {
    let config = super::build_stack(args.stack, args.options.as_deref(), version_file)?;
    let order = config.startup_order()?;
    print!("{}", output::format_plan(args.stack.name(), &config, &order));
    Ok(())
}
