//! Caddy reverse proxy.

use composegen_common::error::Result;

use crate::model::Service;
use crate::validator::{self, Validate};

/// Pinned Caddy image.
pub const IMAGE: &str = "caddy:2.10.2";

/// Caddy service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Replaces [`IMAGE`].
    pub image_override: Option<String>,
    /// Published host port.
    pub host_port: Option<u16>,
    /// Port Caddy listens on inside the container.
    pub target_port: u16,
    /// Host path of the Caddyfile.
    pub caddyfile: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            image_override: None,
            host_port: None,
            target_port: 3000,
            caddyfile: "./Caddyfile".to_owned(),
        }
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("caddy.host_port", self.host_port)?;
        validator::check_host_port("caddy.target_port", Some(self.target_port))?;
        validator::check_non_empty("caddy.caddyfile", &self.caddyfile)
    }
}

/// Builds the Caddy service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    let image = options.image_override.as_deref().unwrap_or(IMAGE);
    Service::builder(image)
        .publish(options.host_port, options.target_port)
        .volume(format!("{}:/etc/caddy/Caddyfile", options.caddyfile))
        .build()
}
