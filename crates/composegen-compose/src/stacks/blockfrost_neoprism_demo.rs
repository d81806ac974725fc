//! Demo stack against an externally hosted db-sync.
//!
//! Connection settings default to `${VAR}` placeholders so the generated
//! file is configured through the environment at `docker compose up` time.
//! The NeoPRISM indexer reads either db-sync directly or the Blockfrost API
//! that `bf-ryo` serves over the same database behind `caddy`.

use composegen_common::error::Result;
use serde::{Deserialize, Serialize};

use super::{BackendKind, ServiceSet};
use crate::model::ComposeConfig;
use crate::services::neoprism::{Command, DltSource};
use crate::services::{caddy, db, neoprism, ryo};
use crate::validator::{self, Validate};

const NEOPRISM: &str = "neoprism";
const DB_NEOPRISM: &str = "db-neoprism";
const PROXY: &str = "caddy";

/// Which API the demo indexer reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoSource {
    /// Poll the db-sync database directly.
    #[default]
    Dbsync,
    /// Poll the Blockfrost API served by `bf-ryo` through the proxy.
    Blockfrost,
}

/// Demo stack options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// db-sync connection URL for the indexer.
    pub dbsync_url: String,
    /// db-sync host for Blockfrost RYO.
    pub dbsync_host: String,
    /// db-sync port for Blockfrost RYO.
    pub dbsync_port: String,
    /// db-sync database name.
    pub dbsync_db: String,
    /// db-sync user.
    pub dbsync_user: String,
    /// db-sync password.
    pub dbsync_password: String,
    /// Cardano network name.
    pub network: String,
    /// Source the indexer reads from.
    pub dlt_source: DemoSource,
    /// API key presented to the Blockfrost API.
    pub blockfrost_api_key: String,
    /// NeoPRISM storage backend.
    pub storage_backend: BackendKind,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dbsync_url: "${DBSYNC_URL}".to_owned(),
            dbsync_host: "${DBSYNC_HOST}".to_owned(),
            dbsync_port: "${DBSYNC_PORT:-5432}".to_owned(),
            dbsync_db: "${DBSYNC_DB}".to_owned(),
            dbsync_user: "${DBSYNC_USER}".to_owned(),
            dbsync_password: "${DBSYNC_PASSWORD}".to_owned(),
            network: "${NETWORK:-mainnet}".to_owned(),
            dlt_source: DemoSource::default(),
            blockfrost_api_key: "${BLOCKFROST_API_KEY:-ryo}".to_owned(),
            storage_backend: BackendKind::default(),
        }
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("dbsync_url", &self.dbsync_url)?;
        validator::check_non_empty("dbsync_host", &self.dbsync_host)?;
        validator::check_non_empty("dbsync_port", &self.dbsync_port)?;
        validator::check_non_empty("dbsync_db", &self.dbsync_db)?;
        validator::check_non_empty("dbsync_user", &self.dbsync_user)?;
        validator::check_non_empty("network", &self.network)?;
        if self.dlt_source == DemoSource::Blockfrost {
            validator::check_non_empty("blockfrost_api_key", &self.blockfrost_api_key)?;
        }
        Ok(())
    }
}

/// Builds the demo stack.
///
/// # Errors
///
/// Returns an error if the options are invalid or any service fails to
/// build.
pub fn mk_stack(options: &Options, version: &str) -> Result<ComposeConfig> {
    options.validate()?;
    tracing::info!(source = ?options.dlt_source, backend = ?options.storage_backend, "building blockfrost-neoprism-demo stack");

    let mut services = ServiceSet::default();

    let mut indexer = neoprism::Options::new(
        version,
        Command::Indexer {
            dlt_source: match options.dlt_source {
                DemoSource::Dbsync => DltSource::dbsync(&options.dbsync_url),
                DemoSource::Blockfrost => DltSource::blockfrost(
                    &options.blockfrost_api_key,
                    format!("http://{PROXY}:3000"),
                ),
            },
        },
    );
    indexer.host_port = Some(8080);
    indexer.network.clone_from(&options.network);
    indexer.storage_backend = options.storage_backend.storage_backend(DB_NEOPRISM);
    if options.dlt_source == DemoSource::Blockfrost {
        indexer.extra_depends_on = vec![PROXY.to_owned()];
    }
    services.add(NEOPRISM, neoprism::mk_service(&indexer)?);

    if options.storage_backend == BackendKind::Postgres {
        services.add(DB_NEOPRISM, db::mk_service(&db::Options::default())?);
    }

    let mut ryo_options = ryo::Options::new(
        ryo::DbSyncDbArgs {
            host: options.dbsync_host.clone(),
            port: options.dbsync_port.clone(),
            db_name: options.dbsync_db.clone(),
            username: options.dbsync_user.clone(),
            password: options.dbsync_password.clone(),
        },
        "./ryo.yaml",
    );
    ryo_options.network.clone_from(&options.network);
    ryo_options.wait_for_db_sync = false;
    ryo_options.genesis_data_folder = None;
    services.add("bf-ryo", ryo::mk_service(&ryo_options)?);

    services.add(
        PROXY,
        caddy::mk_service(&caddy::Options {
            host_port: Some(3000),
            target_port: 3000,
            caddyfile: "./Caddyfile-blockfrost".to_owned(),
            ..caddy::Options::default()
        })?,
    );

    services.into_config(Vec::<String>::new())
}
