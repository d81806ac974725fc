//! PostgreSQL database.

use composegen_common::error::Result;

use super::POSTGRES_CREDENTIAL;
use crate::model::{Healthcheck, Service};
use crate::validator::{self, Validate};

/// Pinned PostgreSQL image.
pub const IMAGE: &str = "postgres:16";

/// PostgreSQL service options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Published host port for 5432.
    pub host_port: Option<u16>,
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_host_port("db.host_port", self.host_port)
    }
}

/// Builds the PostgreSQL service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    Service::builder(IMAGE)
        .publish(options.host_port, 5432)
        .env("POSTGRES_DB", POSTGRES_CREDENTIAL)
        .env("POSTGRES_PASSWORD", POSTGRES_CREDENTIAL)
        .env("POSTGRES_USER", POSTGRES_CREDENTIAL)
        .healthcheck(Healthcheck::new(["CMD", "pg_isready", "-U", "postgres"]))
        .build()
}
