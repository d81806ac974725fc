//! Stack builders.
//!
//! A stack validates its options as a whole, derives the options of every
//! participating service, and assembles the results into a
//! [`ComposeConfig`]. Cross-option conflicts are rejected before any
//! service is built.

pub mod blockfrost_neoprism_demo;
pub mod prism_test;
pub mod universal_resolver;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use composegen_common::error::{ComposeGenError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{ComposeConfig, Service};
use crate::services::neoprism::StorageBackend;
use crate::validator::Validate;

/// Named volume shared by every container of the local testnet.
pub const TESTNET_VOLUME: &str = "node-testnet";

/// Storage backend choice at stack level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// A bundled PostgreSQL service.
    #[default]
    Postgres,
    /// An embedded SQLite file; no database service is added.
    Sqlite,
}

impl BackendKind {
    /// Backend definition pointing at `db_host` when networked.
    pub fn storage_backend(self, db_host: &str) -> StorageBackend {
        match self {
            Self::Postgres => StorageBackend::postgres(db_host),
            Self::Sqlite => StorageBackend::sqlite(),
        }
    }
}

/// The stacks this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackKind {
    /// Local testnet with NeoPRISM, the legacy PRISM node, and Blockfrost.
    PrismTest,
    /// NeoPRISM demo against an externally hosted db-sync.
    BlockfrostNeoprismDemo,
    /// NeoPRISM as the `did:prism` driver of a Universal Resolver.
    UniversalResolver,
}

impl StackKind {
    /// Every stack, in listing order.
    pub const ALL: [Self; 3] = [
        Self::PrismTest,
        Self::BlockfrostNeoprismDemo,
        Self::UniversalResolver,
    ];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PrismTest => "prism-test",
            Self::BlockfrostNeoprismDemo => "blockfrost-neoprism-demo",
            Self::UniversalResolver => "universal-resolver",
        }
    }

    /// One-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::PrismTest => "local Cardano testnet with NeoPRISM, PRISM node and Blockfrost",
            Self::BlockfrostNeoprismDemo => "NeoPRISM indexer demo against a hosted db-sync",
            Self::UniversalResolver => "Universal Resolver with the NeoPRISM did:prism driver",
        }
    }

    /// Builds the stack from YAML options. `None` or blank input uses the
    /// stack defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not decode strictly, fail
    /// validation, or any service fails to build.
    pub fn build(self, options_yaml: Option<&str>, version: &str) -> Result<ComposeConfig> {
        match self {
            Self::PrismTest => {
                prism_test::mk_stack(&load_options(options_yaml.unwrap_or_default())?, version)
            }
            Self::BlockfrostNeoprismDemo => blockfrost_neoprism_demo::mk_stack(
                &load_options(options_yaml.unwrap_or_default())?,
                version,
            ),
            Self::UniversalResolver => universal_resolver::mk_stack(
                &load_options(options_yaml.unwrap_or_default())?,
                version,
            ),
        }
    }
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StackKind {
    type Err = ComposeGenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
                ComposeGenError::validation(
                    "stack",
                    format!("unknown stack \"{s}\", expected one of: {}", known.join(", ")),
                )
            })
    }
}

/// Decodes stack options strictly and validates them.
///
/// Blank input yields the defaults, which are validated as well.
///
/// # Errors
///
/// Returns a schema error for unknown keys or bad literals, and a
/// validation or conflict error if the options are inconsistent.
pub fn load_options<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned + Default + Validate,
{
    let options = if input.trim().is_empty() {
        T::default()
    } else {
        serde_yaml::from_str(input)?
    };
    options.validate()?;
    Ok(options)
}

/// Rejects two published host ports with the same number.
///
/// # Errors
///
/// Returns a conflict error naming both fields.
pub(crate) fn check_distinct_ports(ports: &[(&str, Option<u16>)]) -> Result<()> {
    for (i, (field, port)) in ports.iter().enumerate() {
        let Some(port) = port else { continue };
        if let Some((other, _)) = ports[i + 1..]
            .iter()
            .find(|(_, candidate)| *candidate == Some(*port))
        {
            return Err(ComposeGenError::conflict(format!(
                "{field} and {other} both publish host port {port}"
            )));
        }
    }
    Ok(())
}

/// Service mapping under construction.
#[derive(Debug, Default)]
pub(crate) struct ServiceSet {
    services: BTreeMap<String, Service>,
}

impl ServiceSet {
    pub(crate) fn add(&mut self, name: &str, service: Service) {
        tracing::debug!(service = name, image = service.image(), "adding service");
        let _ = self.services.insert(name.to_owned(), service);
    }

    pub(crate) fn into_config<I, S>(self, volumes: I) -> Result<ComposeConfig>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComposeConfig::new(self.services, volumes)
    }
}
