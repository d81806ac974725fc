//! `compose-gen list` — List the stacks that can be generated.

use composegen_compose::stacks::StackKind;

use crate::output;

/// Executes the `list` command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn execute() -> anyhow::Result<()> {
    print!("{}", output::format_stack_list(&StackKind::ALL));
    Ok(())
}
