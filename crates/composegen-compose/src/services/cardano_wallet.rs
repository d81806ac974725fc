//! Cardano wallet backend used to fund and sign PRISM transactions.

use composegen_common::error::Result;

use super::TESTNET_MOUNT;
use crate::model::{Healthcheck, Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned wallet image.
pub const IMAGE: &str = "cardanofoundation/cardano-wallet:2025.3.31";

const SERVE_SCRIPT: &str = "cardano-wallet serve \\
  --database /wallet/db \\
  --node-socket /node/testnet/socket/node1/sock \\
  --testnet /node/testnet/byron-genesis.json \\
  --listen-address 0.0.0.0
";

/// Wallet service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Published host port for the wallet API (8090).
    pub host_port: Option<u16>,
    /// Named volume holding the testnet state.
    pub testnet_volume: String,
    /// Service name of the node to connect to.
    pub cardano_node_host: String,
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("cardano_wallet.host_port", self.host_port)?;
        validator::check_non_empty("cardano_wallet.testnet_volume", &self.testnet_volume)?;
        validator::check_non_empty("cardano_wallet.cardano_node_host", &self.cardano_node_host)
    }
}

/// Builds the wallet service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    Service::builder(IMAGE)
        .entrypoint(Vec::<String>::new())
        .command(["bash", "-c", SERVE_SCRIPT])
        .publish(options.host_port, 8090)
        .volume(format!("{}:{TESTNET_MOUNT}", options.testnet_volume))
        .healthcheck(Healthcheck::new([
            "CMD-SHELL",
            "cardano-wallet network information",
        ]))
        .depends_on(&options.cardano_node_host, ServiceCondition::ServiceHealthy)
        .build()
}
