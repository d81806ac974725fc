//! `compose-gen generate` — Render a stack as a Compose document.

use std::path::{Path, PathBuf};

use clap::Args;
use composegen_common::config::{GeneratorConfig, OutputFormat};
use composegen_compose::render;
use composegen_compose::stacks::StackKind;

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Stack to generate.
    pub stack: StackKind,

    /// YAML file with stack options. Defaults apply when omitted.
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns an error if the version or options cannot be read, the stack
/// fails to build, or the document cannot be written.
pub fn execute(args: GenerateArgs, version_file: &Path) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        version_file: version_file.to_path_buf(),
        output_format: args.format,
        output: args.output,
    };
    tracing::info!(stack = %args.stack, format = %config.output_format, "generating compose document");

    let document = super::build_stack(args.stack, args.options.as_deref(), &config.version_file)?;

    if let Some(ref path) = config.output {
        render::write(&document, path, config.output_format)?;
        println!(
            "Generated {} -> {} ({} services)",
            args.stack,
            path.display(),
            document.services().len()
        );
    } else {
        print!("{}", render::render(&document, config.output_format)?);
    }

    Ok(())
}
