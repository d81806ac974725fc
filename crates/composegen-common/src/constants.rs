//! Workspace-wide constants and default paths.

/// Default location of the project version file, relative to the
/// working directory.
pub const DEFAULT_VERSION_FILE: &str = "version";

/// Default output file name for generated documents.
pub const DEFAULT_OUTPUT_FILE: &str = "compose.yml";

/// Default interval between health-check probes.
pub const HEALTHCHECK_INTERVAL: &str = "2s";

/// Default health-check probe timeout.
pub const HEALTHCHECK_TIMEOUT: &str = "5s";

/// Default number of failed probes before a container is unhealthy.
pub const HEALTHCHECK_RETRIES: u32 = 30;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "compose-gen";
