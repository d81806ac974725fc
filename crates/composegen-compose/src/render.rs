//! Rendering of finished documents.

use std::path::Path;

use composegen_common::config::OutputFormat;
use composegen_common::error::{ComposeGenError, Result};

use crate::model::ComposeConfig;

/// Renders a document as Compose YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml(config: &ComposeConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Renders a document as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(config: &ComposeConfig) -> Result<String> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    Ok(json)
}

/// Renders a document in `format`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(config: &ComposeConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(config),
        OutputFormat::Json => to_json(config),
    }
}

/// Renders a document and writes it to `path`. Nothing is written if
/// rendering fails.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write(config: &ComposeConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let rendered = render(config, format)?;
    std::fs::write(path, rendered).map_err(|source| ComposeGenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), %format, "wrote compose document");
    Ok(())
}
