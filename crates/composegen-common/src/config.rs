//! Generator configuration model.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComposeGenError;

/// Serialization format of a generated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compose YAML (the format consumed by `docker compose`).
    #[default]
    Yaml,
    /// Pretty-printed JSON, accepted by `docker compose` as well.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ComposeGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ComposeGenError::validation(
                "format",
                format!("unknown output format \"{other}\", expected yaml or json"),
            )),
        }
    }
}

/// Root configuration for a generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// File holding the project version used for default image tags.
    pub version_file: PathBuf,
    /// Serialization format of the emitted document.
    pub output_format: OutputFormat,
    /// Destination file; `None` writes to stdout.
    pub output: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            version_file: PathBuf::from(crate::constants::DEFAULT_VERSION_FILE),
            output_format: OutputFormat::default(),
            output: None,
        }
    }
}
