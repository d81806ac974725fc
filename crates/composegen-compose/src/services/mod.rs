//! Service builders.
//!
//! Each module exposes an `Options` structure and a pure function mapping
//! it to a validated [`Service`](crate::model::Service). Identical options
//! always yield identical services.

pub mod caddy;
pub mod cardano_dbsync;
pub mod cardano_node;
pub mod cardano_submit_api;
pub mod cardano_wallet;
pub mod db;
pub mod neoprism;
pub mod prism_node;
pub mod ryo;
pub mod uni_resolver_web;

/// Socket path of the first testnet node inside the shared testnet volume.
pub(crate) const NODE_SOCKET_PATH: &str = "/node/testnet/socket/node1/sock";

/// Mount point of the shared testnet volume.
pub(crate) const TESTNET_MOUNT: &str = "/node/testnet";

/// Credential used for every bundled PostgreSQL instance.
pub(crate) const POSTGRES_CREDENTIAL: &str = "postgres";
