//! Cardano db-sync, which mirrors the chain into PostgreSQL.

use composegen_common::error::Result;

use super::{NODE_SOCKET_PATH, POSTGRES_CREDENTIAL, TESTNET_MOUNT};
use crate::model::{Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned db-sync image.
pub const IMAGE: &str = "ghcr.io/intersectmbo/cardano-db-sync:13.6.0.5";

/// db-sync service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Named volume holding the testnet state.
    pub testnet_volume: String,
    /// Service name of the node to follow.
    pub cardano_node_host: String,
    /// Host path of the db-sync configuration.
    pub config_file: String,
    /// Service name of the target database.
    pub db_host: String,
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("cardano_dbsync.testnet_volume", &self.testnet_volume)?;
        validator::check_non_empty("cardano_dbsync.cardano_node_host", &self.cardano_node_host)?;
        validator::check_non_empty("cardano_dbsync.config_file", &self.config_file)?;
        validator::check_non_empty("cardano_dbsync.db_host", &self.db_host)
    }
}

/// Builds the db-sync service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    Service::builder(IMAGE)
        .env("POSTGRES_HOST", &options.db_host)
        .env("POSTGRES_DB", POSTGRES_CREDENTIAL)
        .env("POSTGRES_PORT", "5432")
        .env("POSTGRES_USER", POSTGRES_CREDENTIAL)
        .env("POSTGRES_PASSWORD", POSTGRES_CREDENTIAL)
        .command([
            "--config",
            "/config/dbsync-config.yaml",
            "--socket-path",
            NODE_SOCKET_PATH,
            "--force-indexes",
        ])
        .volume(format!("{}:{TESTNET_MOUNT}", options.testnet_volume))
        .volume(format!("{}:/config/dbsync-config.yaml", options.config_file))
        .depends_on(&options.cardano_node_host, ServiceCondition::ServiceHealthy)
        .depends_on(&options.db_host, ServiceCondition::ServiceHealthy)
        .build()
}
