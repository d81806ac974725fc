//! Field-level validation shared by the schema and the builders.
//!
//! Checks run at construction time so that no partially valid value is
//! ever observable. Each check names the offending field in its error.

use composegen_common::error::{ComposeGenError, Result};

/// Post-construction consistency check for options structures.
///
/// Stack options run it before any service is built, and whenever they
/// are decoded from external input.
pub trait Validate {
    /// Checks the value, returning the first violated constraint.
    ///
    /// # Errors
    ///
    /// Returns a validation or conflict error describing the violation.
    fn validate(&self) -> Result<()>;
}

/// Rejects empty or whitespace-only strings.
///
/// # Errors
///
/// Returns a validation error if `value` is blank.
pub fn check_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ComposeGenError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Rejects a host port of zero. An absent port is always valid.
///
/// # Errors
///
/// Returns a validation error if the port is `Some(0)`.
pub fn check_host_port(field: &str, port: Option<u16>) -> Result<()> {
    if port == Some(0) {
        return Err(ComposeGenError::validation(
            field,
            "host port must be greater than zero",
        ));
    }
    Ok(())
}

/// Checks a `host:container` port mapping where both sides are positive
/// integers.
///
/// # Errors
///
/// Returns a validation error if the mapping is malformed.
pub fn check_port_mapping(field: &str, mapping: &str) -> Result<()> {
    let Some((host, container)) = mapping.split_once(':') else {
        return Err(ComposeGenError::validation(
            field,
            format!("port mapping \"{mapping}\" must have the form host:container"),
        ));
    };
    for part in [host, container] {
        match part.parse::<u16>() {
            Ok(port) if port > 0 => {}
            _ => {
                return Err(ComposeGenError::validation(
                    field,
                    format!("port \"{part}\" in \"{mapping}\" is not a positive integer"),
                ));
            }
        }
    }
    Ok(())
}

/// Checks a `source:target[:mode]` volume mount with an absolute target.
///
/// # Errors
///
/// Returns a validation error if the mount is malformed.
pub fn check_volume_mount(field: &str, mount: &str) -> Result<()> {
    let mut parts = mount.splitn(3, ':');
    let source = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    if source.is_empty() || target.is_empty() {
        return Err(ComposeGenError::validation(
            field,
            format!("volume mount \"{mount}\" must have the form source:target"),
        ));
    }
    if !target.starts_with('/') {
        return Err(ComposeGenError::validation(
            field,
            format!("volume target \"{target}\" must be an absolute path"),
        ));
    }
    if let Some(mode) = parts.next() {
        if !matches!(mode, "ro" | "rw") {
            return Err(ComposeGenError::validation(
                field,
                format!("volume mode \"{mode}\" must be ro or rw"),
            ));
        }
    }
    Ok(())
}

/// Returns the named volume referenced by a mount, or `None` for bind
/// mounts of host paths.
#[must_use]
pub fn named_volume(mount: &str) -> Option<&str> {
    let source = mount.split(':').next()?;
    let is_host_path = source.starts_with('.')
        || source.starts_with('/')
        || source.starts_with('~')
        || source.starts_with('$');
    (!source.is_empty() && !is_host_path).then_some(source)
}
