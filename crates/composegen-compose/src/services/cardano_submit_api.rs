//! Cardano transaction submission API.

use composegen_common::error::Result;

use super::{NODE_SOCKET_PATH, TESTNET_MOUNT};
use crate::model::{Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned submit-api image.
pub const IMAGE: &str = "ghcr.io/intersectmbo/cardano-submit-api:10.5.1";

/// Submit API service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Published host port for the API (8090).
    pub host_port: Option<u16>,
    /// Named volume holding the testnet state.
    pub testnet_volume: String,
    /// Service name of the node to submit through.
    pub cardano_node_host: String,
    /// Testnet magic number.
    pub network_magic: u32,
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("cardano_submit_api.host_port", self.host_port)?;
        validator::check_non_empty("cardano_submit_api.testnet_volume", &self.testnet_volume)?;
        validator::check_non_empty(
            "cardano_submit_api.cardano_node_host",
            &self.cardano_node_host,
        )
    }
}

/// Builds the submit API service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    let magic = options.network_magic.to_string();
    Service::builder(IMAGE)
        .publish(options.host_port, 8090)
        .command([
            "--config",
            "/config.yaml",
            "--socket-path",
            NODE_SOCKET_PATH,
            "--testnet-magic",
            magic.as_str(),
            "--listen-address",
            "0.0.0.0",
        ])
        .volume(format!("{}:{TESTNET_MOUNT}", options.testnet_volume))
        .volume("./cardano-submit-api.yaml:/config.yaml")
        .depends_on(&options.cardano_node_host, ServiceCondition::ServiceHealthy)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_network_magic_on_command_line() {
        let svc = mk_service(&Options {
            host_port: None,
            testnet_volume: "node-testnet".into(),
            cardano_node_host: "cardano-node".into(),
            network_magic: 42,
        })
        .expect("build");
        let command = svc.command().expect("command");
        let pos = command
            .iter()
            .position(|arg| arg == "--testnet-magic")
            .expect("flag");
        assert_eq!(command[pos + 1], "42");
        assert!(svc.ports().is_none());
    }
}
