//! Universal Resolver integration: NeoPRISM indexes mainnet from a public
//! relay and serves as the `did:prism` driver.

use composegen_common::error::Result;
use serde::{Deserialize, Serialize};

use super::{BackendKind, ServiceSet, check_distinct_ports};
use crate::model::ComposeConfig;
use crate::services::neoprism::{Command, DltSource};
use crate::services::{db, neoprism, uni_resolver_web};
use crate::validator::{self, Validate};

const DB: &str = "db";
const INDEXER: &str = "neoprism-indexer";

/// Universal Resolver stack options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Host port of the resolver web API.
    pub resolver_port: u16,
    /// Host port of the NeoPRISM API.
    pub indexer_port: u16,
    /// Host port of the database, if published.
    pub db_port: Option<u16>,
    /// Cardano relay the indexer follows.
    pub relay_address: String,
    /// NeoPRISM storage backend.
    pub storage_backend: BackendKind,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            resolver_port: 8080,
            indexer_port: 8081,
            db_port: Some(5432),
            relay_address: "backbone.mainnet.cardanofoundation.org:3001".to_owned(),
            storage_backend: BackendKind::default(),
        }
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("resolver_port", Some(self.resolver_port))?;
        validator::check_host_port("indexer_port", Some(self.indexer_port))?;
        validator::check_host_port("db_port", self.db_port)?;
        validator::check_non_empty("relay_address", &self.relay_address)?;
        let db_port = match self.storage_backend {
            BackendKind::Postgres => self.db_port,
            BackendKind::Sqlite => None,
        };
        check_distinct_ports(&[
            ("resolver_port", Some(self.resolver_port)),
            ("indexer_port", Some(self.indexer_port)),
            ("db_port", db_port),
        ])
    }
}

/// Builds the Universal Resolver stack.
///
/// # Errors
///
/// Returns an error if the options are invalid or any service fails to
/// build.
pub fn mk_stack(options: &Options, version: &str) -> Result<ComposeConfig> {
    options.validate()?;
    tracing::info!(backend = ?options.storage_backend, "building universal-resolver stack");

    let mut services = ServiceSet::default();

    if options.storage_backend == BackendKind::Postgres {
        services.add(
            DB,
            db::mk_service(&db::Options {
                host_port: options.db_port,
            })?,
        );
    }

    let mut indexer = neoprism::Options::new(
        version,
        Command::Indexer {
            dlt_source: DltSource::Relay {
                address: options.relay_address.clone(),
            },
        },
    );
    indexer.host_port = Some(options.indexer_port);
    indexer.storage_backend = options.storage_backend.storage_backend(DB);
    services.add(INDEXER, neoprism::mk_service(&indexer)?);

    let mut resolver = uni_resolver_web::Options::new(options.resolver_port);
    resolver.prism_driver_url = format!("http://{INDEXER}:8080/api");
    services.add("uni-resolver-web", uni_resolver_web::mk_service(&resolver)?);

    services.into_config(Vec::<String>::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceCondition;

    #[test]
    fn default_stack_follows_mainnet_relay() {
        let config = mk_stack(&Options::default(), "0.1.0").expect("build");
        let names: Vec<&str> = config.services().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["db", "neoprism-indexer", "uni-resolver-web"]);

        let indexer = config.service(INDEXER).expect("indexer");
        assert_eq!(
            indexer.env("NPRISM_CARDANO_RELAY_ADDR"),
            Some("backbone.mainnet.cardanofoundation.org:3001")
        );
        assert_eq!(indexer.ports(), Some(&["8081:8080".to_owned()][..]));
        assert_eq!(indexer.dependency(DB), Some(ServiceCondition::ServiceHealthy));

        let db = config.service(DB).expect("db");
        assert_eq!(db.ports(), Some(&["5432:5432".to_owned()][..]));
    }

    #[test]
    fn colliding_host_ports_conflict() {
        let options = Options {
            indexer_port: 8080,
            ..Options::default()
        };
        let err = mk_stack(&options, "0.1.0").unwrap_err();
        assert!(err.to_string().contains("host port 8080"), "got: {err}");
    }

    #[test]
    fn sqlite_ignores_database_port() {
        let options = Options {
            storage_backend: BackendKind::Sqlite,
            db_port: Some(8080),
            ..Options::default()
        };
        let config = mk_stack(&options, "0.1.0").expect("build");
        assert!(config.service(DB).is_none());
    }
}
