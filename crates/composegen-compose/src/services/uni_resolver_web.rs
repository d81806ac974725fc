//! Universal Resolver web front end with the PRISM driver.

use composegen_common::error::Result;

use crate::model::Service;
use crate::validator::{self, Validate};

/// Default Universal Resolver image.
pub const IMAGE: &str = "universalresolver/uni-resolver-web:0.44.0-4922fcc";

/// Universal Resolver service options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Image reference.
    pub image: String,
    /// Published host port for the web API (8080).
    pub host_port: u16,
    /// URL of the `did:prism` driver.
    pub prism_driver_url: String,
}

impl Options {
    /// Options with the default image and driver URL.
    pub fn new(host_port: u16) -> Self {
        Self {
            image: IMAGE.to_owned(),
            host_port,
            prism_driver_url: "http://neoprism-indexer:8080/api".to_owned(),
        }
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validator::check_non_empty("uni_resolver_web.image", &self.image)?;
        validator::check_host_port("uni_resolver_web.host_port", Some(self.host_port))?;
        validator::check_non_empty("uni_resolver_web.prism_driver_url", &self.prism_driver_url)
    }
}

/// Builds the Universal Resolver service.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn mk_service(options: &Options) -> Result<Service> {
    options.validate()?;
    Service::builder(&options.image)
        .publish(Some(options.host_port), 8080)
        .env(
            "uniresolver_web_driver_url_did_prism",
            &options.prism_driver_url,
        )
        .build()
}
