//! Blockfrost "run your own" backend, serving the Blockfrost API from a
//! db-sync database.

use composegen_common::error::Result;

use super::TESTNET_MOUNT;
use crate::model::{Service, ServiceCondition};
use crate::validator::{self, Validate};

/// Pinned Blockfrost RYO image.
pub const IMAGE: &str = "blockfrost/backend-ryo:v4.3.0";

/// Connection to the db-sync database. Values may be `${VAR}` placeholders
/// resolved by Compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSyncDbArgs {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: String,
    /// Database name.
    pub db_name: String,
    /// Database user.
    pub username: String,
    /// Database password.
    pub password: String,
}

/// RYO service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Published host port for the API (3000).
    pub host_port: Option<u16>,
    /// db-sync database connection.
    pub dbsync_db: DbSyncDbArgs,
    /// Network name.
    pub network: String,
    /// Named testnet volume, for genesis files of a local testnet.
    pub testnet_volume: Option<String>,
    /// Host path of the RYO configuration.
    pub config_file: String,
    /// Service name of the one-shot testnet bootstrap to wait for.
    pub bootstrap_testnet_host: Option<String>,
    /// Whether `dbsync_db.host` is a service of the same document.
    pub wait_for_db_sync: bool,
    /// Genesis data folder inside the container.
    pub genesis_data_folder: Option<String>,
}

impl Options {
    /// Options with defaults for a local testnet.
    pub fn new(dbsync_db: DbSyncDbArgs, config_file: impl Into<String>) -> Self {
        Self {
            host_port: None,
            dbsync_db,
            network: "mainnet".to_owned(),
            testnet_volume: None,
            config_file: config_file.into(),
            bootstrap_testnet_host: None,
            wait_for_db_sync: true,
            genesis_data_folder: Some(TESTNET_MOUNT.to_owned()),
        }
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("ryo.host_port", self.host_port)?;
        validator::check_non_empty("ryo.dbsync_db.host", &self.dbsync_db.host)?;
        validator::check_non_empty("ryo.config_file", &self.config_file)?;
        validator::check_non_empty("ryo.network", &self.network)?;
        if let Some(host) = &self.bootstrap_testnet_host {
            validator::check_non_empty("ryo.bootstrap_testnet_host", host)?;
        }
        Ok(())
    }
}

/// Builds the RYO service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    let db = &options.dbsync_db;
    let mut builder = Service::builder(IMAGE)
        .publish(options.host_port, 3000)
        .volume(format!("{}:/app/config/development.yaml", options.config_file))
        .env("BLOCKFROST_CONFIG_DBSYNC_HOST", &db.host)
        .env("BLOCKFROST_CONFIG_DBSYNC_PORT", &db.port)
        .env("BLOCKFROST_CONFIG_DBSYNC_DATABASE", &db.db_name)
        .env("BLOCKFROST_CONFIG_DBSYNC_USER", &db.username)
        .env("BLOCKFROST_CONFIG_DBSYNC_PASSWORD", &db.password)
        .env("BLOCKFROST_CONFIG_NETWORK", &options.network)
        .env("BLOCKFROST_MITHRIL_ENABLED", "false")
        .env("NODE_ENV", "development");

    if let Some(volume) = &options.testnet_volume {
        builder = builder.volume(format!("{volume}:{TESTNET_MOUNT}"));
    }
    if let Some(folder) = &options.genesis_data_folder {
        builder = builder.env("BLOCKFROST_CONFIG_GENESIS_DATA_FOLDER", folder);
    }
    if options.wait_for_db_sync {
        builder = builder.depends_on(&db.host, ServiceCondition::ServiceHealthy);
    }
    if let Some(host) = &options.bootstrap_testnet_host {
        builder = builder.depends_on(host, ServiceCondition::ServiceCompletedSuccessfully);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_db() -> DbSyncDbArgs {
        DbSyncDbArgs {
            host: "db-dbsync".into(),
            port: "5432".into(),
            db_name: "postgres".into(),
            username: "postgres".into(),
            password: "postgres".into(),
        }
    }

    #[test]
    fn local_testnet_waits_for_dbsync_and_bootstrap() {
        let mut options = Options::new(local_db(), "./ryo.yaml");
        options.testnet_volume = Some("node-testnet".into());
        options.bootstrap_testnet_host = Some("bootstrap-testnet".into());
        options.network = "custom".into();
        let svc = mk_service(&options).expect("build");

        assert_eq!(
            svc.dependency("db-dbsync"),
            Some(ServiceCondition::ServiceHealthy)
        );
        assert_eq!(
            svc.dependency("bootstrap-testnet"),
            Some(ServiceCondition::ServiceCompletedSuccessfully)
        );
        assert_eq!(svc.volumes().map(<[String]>::len), Some(2));
        assert_eq!(
            svc.env("BLOCKFROST_CONFIG_GENESIS_DATA_FOLDER"),
            Some("/node/testnet")
        );
    }

    #[test]
    fn external_dbsync_has_no_dependencies() {
        let mut options = Options::new(
            DbSyncDbArgs {
                host: "${DBSYNC_HOST}".into(),
                ..local_db()
            },
            "./ryo.yaml",
        );
        options.wait_for_db_sync = false;
        options.genesis_data_folder = None;
        let svc = mk_service(&options).expect("build");

        assert!(svc.depends_on().is_none());
        assert_eq!(svc.env("BLOCKFROST_CONFIG_DBSYNC_HOST"), Some("${DBSYNC_HOST}"));
        assert!(svc.env("BLOCKFROST_CONFIG_GENESIS_DATA_FOLDER").is_none());
        assert_eq!(svc.volumes().map(<[String]>::len), Some(1));
    }
}
