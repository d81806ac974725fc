//! Cardano testnet node and its one-shot bootstrap container.
//!
//! Both share one image: the node runs `initTestnet` and stays up, the
//! bootstrap container funds the wallet, publishes the seed DID, and exits.

use composegen_common::error::Result;

use super::{NODE_SOCKET_PATH, TESTNET_MOUNT};
use crate::model::{Healthcheck, Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned testnet image.
pub const IMAGE: &str = "patextreme/cardano-testnet:20251111-145358";

const BOOTSTRAP_SCRIPT: &str = "transactGenesis
hurl ./init-wallet.hurl
hurl ./init-did.hurl

# blockfrost-ryo expects a different location
cp testnet/conway-genesis.json testnet/genesis.json
cp testnet/byron-genesis.json testnet/byron_genesis.json
";

/// Cardano node service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOptions {
    /// Testnet magic number.
    pub network_magic: u32,
    /// Named volume holding the testnet state.
    pub testnet_volume: String,
}

impl Validate for NodeOptions {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("cardano_node.testnet_volume", &self.testnet_volume)
    }
}

/// Cardano bootstrap service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Testnet magic number.
    pub network_magic: u32,
    /// Named volume holding the testnet state.
    pub testnet_volume: String,
    /// Service name of the node to wait for.
    pub cardano_node_host: String,
    /// Wallet API base URL used by the hurl scripts.
    pub wallet_base_url: String,
    /// Wallet passphrase used by the hurl scripts.
    pub wallet_passphrase: String,
    /// Address funded from genesis.
    pub wallet_payment_address: String,
    /// Host path of the wallet initialization script.
    pub init_wallet_hurl_file: String,
    /// Host path of the DID initialization script.
    pub init_did_hurl_file: String,
}

impl Validate for BootstrapOptions {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("bootstrap.testnet_volume", &self.testnet_volume)?;
        validator::check_non_empty("bootstrap.cardano_node_host", &self.cardano_node_host)?;
        validator::check_non_empty("bootstrap.wallet_base_url", &self.wallet_base_url)?;
        validator::check_non_empty("bootstrap.init_wallet_hurl_file", &self.init_wallet_hurl_file)?;
        validator::check_non_empty("bootstrap.init_did_hurl_file", &self.init_did_hurl_file)
    }
}

/// Builds the long-running node service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_node_service(options: &NodeOptions) -> Result<Service> {
    options.validate()?;
    Service::builder(IMAGE)
        .restart(None)
        .command(["initTestnet"])
        .volume(format!("{}:{TESTNET_MOUNT}", options.testnet_volume))
        .env("CARDANO_NODE_SOCKET_PATH", NODE_SOCKET_PATH)
        .env("CARDANO_NODE_NETWORK_ID", options.network_magic.to_string())
        .healthcheck(Healthcheck::new(["CMD-SHELL", "cardano-cli query tip"]))
        .build()
}

/// Builds the one-shot bootstrap service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_bootstrap_service(options: &BootstrapOptions) -> Result<Service> {
    options.validate()?;
    Service::builder(IMAGE)
        .restart(None)
        .volume(format!("{}:{TESTNET_MOUNT}", options.testnet_volume))
        .volume(format!("{}:/node/init-wallet.hurl", options.init_wallet_hurl_file))
        .volume(format!("{}:/node/init-did.hurl", options.init_did_hurl_file))
        .command(["bash", "-c", BOOTSTRAP_SCRIPT])
        .env("HURL_WALLET_BASE_URL", &options.wallet_base_url)
        .env("HURL_WALLET_PASSPHRASE", &options.wallet_passphrase)
        .env("GENESIS_PAYMENT_ADDR", &options.wallet_payment_address)
        .env("CARDANO_NODE_SOCKET_PATH", NODE_SOCKET_PATH)
        .env("CARDANO_NODE_NETWORK_ID", options.network_magic.to_string())
        .depends_on(&options.cardano_node_host, ServiceCondition::ServiceHealthy)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap_options() -> BootstrapOptions {
        BootstrapOptions {
            network_magic: 42,
            testnet_volume: "node-testnet".into(),
            cardano_node_host: "cardano-node".into(),
            wallet_base_url: "http://cardano-wallet:8090/v2".into(),
            wallet_passphrase: "super_secret".into(),
            wallet_payment_address: "addr_test1".into(),
            init_wallet_hurl_file: "./init-wallet.hurl".into(),
            init_did_hurl_file: "./init-did.hurl".into(),
        }
    }

    #[test]
    fn node_has_no_restart_policy_and_a_healthcheck() {
        let svc = mk_node_service(&NodeOptions {
            network_magic: 42,
            testnet_volume: "node-testnet".into(),
        })
        .expect("build");
        assert!(svc.restart().is_none());
        assert_eq!(svc.command(), Some(&["initTestnet".to_owned()][..]));
        assert_eq!(svc.env("CARDANO_NODE_NETWORK_ID"), Some("42"));
        assert_eq!(svc.env("CARDANO_NODE_SOCKET_PATH"), Some(NODE_SOCKET_PATH));
        assert!(svc.healthcheck().is_some());
    }

    #[test]
    fn bootstrap_waits_for_healthy_node() {
        let svc = mk_bootstrap_service(&bootstrap_options()).expect("build");
        assert!(svc.restart().is_none());
        assert_eq!(
            svc.dependency("cardano-node"),
            Some(ServiceCondition::ServiceHealthy)
        );
        assert_eq!(svc.volumes().map(<[String]>::len), Some(3));
        let command = svc.command().expect("command");
        assert_eq!(&command[..2], ["bash", "-c"]);
        assert!(command[2].contains("transactGenesis"));
    }

    #[test]
    fn bootstrap_without_node_host_is_rejected() {
        let err = mk_bootstrap_service(&BootstrapOptions {
            cardano_node_host: String::new(),
            ..bootstrap_options()
        })
        .unwrap_err();
        assert!(err.to_string().contains("cardano_node_host"), "got: {err}");
    }
}
