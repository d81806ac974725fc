//! Legacy Scala PRISM node, kept in the test stack for cross-checking
//! NeoPRISM against the reference implementation.

use composegen_common::error::Result;

use super::POSTGRES_CREDENTIAL;
use crate::model::{Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned PRISM node image.
pub const IMAGE: &str = "ghcr.io/input-output-hk/prism-node:2.6.1";

/// PRISM node service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Replaces [`IMAGE`].
    pub image_override: Option<String>,
    /// Service name of the node's own database.
    pub node_db_host: String,
    /// Service name of the db-sync database.
    pub db_sync_db_host: String,
    /// Service name of the one-shot testnet bootstrap.
    pub bootstrap_testnet_host: String,
    /// Service name of the wallet.
    pub wallet_api_host: String,
    /// Wallet API port.
    pub wallet_api_port: u16,
    /// Spending passphrase.
    pub wallet_passphrase: String,
    /// Wallet identifier.
    pub wallet_id: String,
    /// Address paying the transaction fees.
    pub wallet_payment_address: String,
    /// Published host port for the gRPC API (50053).
    pub host_port: Option<u16>,
    /// Blocks to wait before an operation counts as confirmed.
    pub confirmation_blocks: u32,
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("prism_node.node_db_host", &self.node_db_host)?;
        validator::check_non_empty("prism_node.db_sync_db_host", &self.db_sync_db_host)?;
        validator::check_non_empty(
            "prism_node.bootstrap_testnet_host",
            &self.bootstrap_testnet_host,
        )?;
        validator::check_non_empty("prism_node.wallet_api_host", &self.wallet_api_host)?;
        validator::check_host_port("prism_node.wallet_api_port", Some(self.wallet_api_port))?;
        validator::check_host_port("prism_node.host_port", self.host_port)
    }
}

/// Builds the PRISM node service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    let image = options.image_override.as_deref().unwrap_or(IMAGE);
    Service::builder(image)
        .publish(options.host_port, 50053)
        .env("NODE_PSQL_HOST", format!("{}:5432", options.node_db_host))
        .env("NODE_PSQL_DATABASE", POSTGRES_CREDENTIAL)
        .env("NODE_PSQL_USERNAME", POSTGRES_CREDENTIAL)
        .env("NODE_PSQL_PASSWORD", POSTGRES_CREDENTIAL)
        .env("NODE_LEDGER", "cardano")
        .env(
            "NODE_CARDANO_CONFIRMATION_BLOCKS",
            options.confirmation_blocks.to_string(),
        )
        .env("NODE_REFRESH_AND_SUBMIT_PERIOD", "1s")
        .env("NODE_MOVE_SCHEDULED_TO_PENDING_PERIOD", "1s")
        .env("NODE_SCHEDULE_SYNC_PERIOD", "1s")
        .env("NODE_CARDANO_NETWORK", "testnet")
        .env("NODE_CARDANO_WALLET_PASSPHRASE", &options.wallet_passphrase)
        .env("NODE_CARDANO_WALLET_ID", &options.wallet_id)
        .env("NODE_CARDANO_PAYMENT_ADDRESS", &options.wallet_payment_address)
        .env("NODE_CARDANO_WALLET_API_HOST", &options.wallet_api_host)
        .env(
            "NODE_CARDANO_WALLET_API_PORT",
            options.wallet_api_port.to_string(),
        )
        .env("NODE_CARDANO_PRISM_GENESIS_BLOCK", "0")
        .env(
            "NODE_CARDANO_DB_SYNC_HOST",
            format!("{}:5432", options.db_sync_db_host),
        )
        .env("NODE_CARDANO_DB_SYNC_DATABASE", POSTGRES_CREDENTIAL)
        .env("NODE_CARDANO_DB_SYNC_USERNAME", POSTGRES_CREDENTIAL)
        .env("NODE_CARDANO_DB_SYNC_PASSWORD", POSTGRES_CREDENTIAL)
        .depends_on(&options.node_db_host, ServiceCondition::ServiceHealthy)
        .depends_on(&options.db_sync_db_host, ServiceCondition::ServiceHealthy)
        .depends_on(&options.wallet_api_host, ServiceCondition::ServiceHealthy)
        .depends_on(
            &options.bootstrap_testnet_host,
            ServiceCondition::ServiceCompletedSuccessfully,
        )
        .build()
}
