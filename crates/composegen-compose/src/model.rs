//! Closed Compose schema.
//!
//! Field names map one-to-one onto Compose document keys. Every structure
//! rejects unknown keys when decoded, and `Service`/`ComposeConfig` can only
//! be obtained through validating constructors.

use std::collections::BTreeMap;
use std::fmt;

use composegen_common::constants::{HEALTHCHECK_INTERVAL, HEALTHCHECK_RETRIES, HEALTHCHECK_TIMEOUT};
use composegen_common::error::{ComposeGenError, Result};
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::validator;

/// Container health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Healthcheck {
    /// Probe command vector, e.g. `["CMD", "pg_isready"]`.
    pub test: Vec<String>,
    /// Time between probes.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Probe timeout.
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Failed probes before the container is marked unhealthy.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_interval() -> String {
    HEALTHCHECK_INTERVAL.to_owned()
}

fn default_timeout() -> String {
    HEALTHCHECK_TIMEOUT.to_owned()
}

const fn default_retries() -> u32 {
    HEALTHCHECK_RETRIES
}

impl Healthcheck {
    /// Creates a health check with the default interval, timeout and retries.
    pub fn new<I, S>(test: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            test: test.into_iter().map(Into::into).collect(),
            interval: default_interval(),
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.test.is_empty() {
            return Err(ComposeGenError::validation(
                format!("{field}.test"),
                "health check command must not be empty",
            ));
        }
        validator::check_non_empty(&format!("{field}.interval"), &self.interval)?;
        validator::check_non_empty(&format!("{field}.timeout"), &self.timeout)?;
        Ok(())
    }
}

/// Startup gate on a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCondition {
    /// The dependency process has been launched.
    ServiceStarted,
    /// The dependency's health check passed.
    ServiceHealthy,
    /// The dependency exited with status zero.
    ServiceCompletedSuccessfully,
}

impl fmt::Display for ServiceCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceStarted => write!(f, "service_started"),
            Self::ServiceHealthy => write!(f, "service_healthy"),
            Self::ServiceCompletedSuccessfully => write!(f, "service_completed_successfully"),
        }
    }
}

/// One `depends_on` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDependency {
    /// Condition the dependency must reach before this service starts.
    pub condition: ServiceCondition,
}

impl ServiceDependency {
    /// Creates a dependency edge with the given condition.
    #[must_use]
    pub const fn new(condition: ServiceCondition) -> Self {
        Self { condition }
    }
}

/// Container restart policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Always restart.
    Always,
    /// Never restart.
    No,
    /// Restart on non-zero exit.
    OnFailure,
    /// Restart unless explicitly stopped.
    UnlessStopped,
}

/// One container's runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    restart: Option<RestartPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entrypoint: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volumes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    depends_on: Option<BTreeMap<String, ServiceDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    healthcheck: Option<Healthcheck>,
}

impl Service {
    /// Starts building a service for `image` with restart policy `always`.
    pub fn builder(image: impl Into<String>) -> ServiceBuilder {
        ServiceBuilder::new(image)
    }

    /// Image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Restart policy, if any.
    pub const fn restart(&self) -> Option<RestartPolicy> {
        self.restart
    }

    /// Published `host:container` port mappings.
    pub fn ports(&self) -> Option<&[String]> {
        self.ports.as_deref()
    }

    /// Command override.
    pub fn command(&self) -> Option<&[String]> {
        self.command.as_deref()
    }

    /// Entrypoint override. `Some(&[])` clears the image entrypoint.
    pub fn entrypoint(&self) -> Option<&[String]> {
        self.entrypoint.as_deref()
    }

    /// Environment variables.
    pub const fn environment(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref()
    }

    /// Value of a single environment variable.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment
            .as_ref()
            .and_then(|env| env.get(key))
            .map(String::as_str)
    }

    /// `source:target` volume mounts.
    pub fn volumes(&self) -> Option<&[String]> {
        self.volumes.as_deref()
    }

    /// Dependency edges keyed by service name.
    pub const fn depends_on(&self) -> Option<&BTreeMap<String, ServiceDependency>> {
        self.depends_on.as_ref()
    }

    /// Condition on the dependency named `service`, if declared.
    pub fn dependency(&self, service: &str) -> Option<ServiceCondition> {
        self.depends_on
            .as_ref()
            .and_then(|deps| deps.get(service))
            .map(|dep| dep.condition)
    }

    /// Health check.
    pub const fn healthcheck(&self) -> Option<&Healthcheck> {
        self.healthcheck.as_ref()
    }

    /// Names of the services this one depends on.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.depends_on
            .iter()
            .flat_map(|deps| deps.keys().map(String::as_str))
    }

    fn validate(&self, field: &str) -> Result<()> {
        validator::check_non_empty(&format!("{field}.image"), &self.image)?;
        for (i, mapping) in self.ports.iter().flatten().enumerate() {
            validator::check_port_mapping(&format!("{field}.ports[{i}]"), mapping)?;
        }
        if let Some(command) = &self.command {
            if command.is_empty() {
                return Err(ComposeGenError::validation(
                    format!("{field}.command"),
                    "command override must not be empty",
                ));
            }
        }
        for key in self.environment.iter().flat_map(BTreeMap::keys) {
            validator::check_non_empty(&format!("{field}.environment"), key)?;
        }
        for (i, mount) in self.volumes.iter().flatten().enumerate() {
            validator::check_volume_mount(&format!("{field}.volumes[{i}]"), mount)?;
        }
        for name in self.dependency_names() {
            validator::check_non_empty(&format!("{field}.depends_on"), name)?;
        }
        if let Some(healthcheck) = &self.healthcheck {
            healthcheck.validate(&format!("{field}.healthcheck"))?;
        }
        Ok(())
    }
}

/// Fluent constructor for [`Service`].
#[derive(Debug)]
pub struct ServiceBuilder {
    image: String,
    restart: Option<RestartPolicy>,
    ports: Vec<String>,
    command: Option<Vec<String>>,
    entrypoint: Option<Vec<String>>,
    environment: BTreeMap<String, String>,
    volumes: Vec<String>,
    depends_on: BTreeMap<String, ServiceDependency>,
    healthcheck: Option<Healthcheck>,
}

impl ServiceBuilder {
    fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            restart: Some(RestartPolicy::Always),
            ports: Vec::new(),
            command: None,
            entrypoint: None,
            environment: BTreeMap::new(),
            volumes: Vec::new(),
            depends_on: BTreeMap::new(),
            healthcheck: None,
        }
    }

    /// Sets or clears the restart policy.
    #[must_use]
    pub const fn restart(mut self, policy: Option<RestartPolicy>) -> Self {
        self.restart = policy;
        self
    }

    /// Publishes `container_port` on `host_port` when a host port is given.
    #[must_use]
    pub fn publish(mut self, host_port: Option<u16>, container_port: u16) -> Self {
        if let Some(host) = host_port {
            self.ports.push(format!("{host}:{container_port}"));
        }
        self
    }

    /// Sets the command override.
    #[must_use]
    pub fn command<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the entrypoint override. An empty iterator clears the image's
    /// entrypoint.
    #[must_use]
    pub fn entrypoint<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Sets an environment variable, replacing any previous value.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.environment.insert(key.into(), value.into());
        self
    }

    /// Adds a volume mount.
    #[must_use]
    pub fn volume(mut self, mount: impl Into<String>) -> Self {
        self.volumes.push(mount.into());
        self
    }

    /// Declares a dependency on `service`, replacing any previous condition.
    #[must_use]
    pub fn depends_on(mut self, service: impl Into<String>, condition: ServiceCondition) -> Self {
        let _ = self
            .depends_on
            .insert(service.into(), ServiceDependency::new(condition));
        self
    }

    /// Sets the health check.
    #[must_use]
    pub fn healthcheck(mut self, healthcheck: Healthcheck) -> Self {
        self.healthcheck = Some(healthcheck);
        self
    }

    /// Validates every field and returns the immutable service.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first malformed field.
    pub fn build(self) -> Result<Service> {
        let service = Service {
            image: self.image,
            restart: self.restart,
            ports: non_empty(self.ports),
            command: self.command,
            entrypoint: self.entrypoint,
            environment: (!self.environment.is_empty()).then_some(self.environment),
            volumes: non_empty(self.volumes),
            depends_on: (!self.depends_on.is_empty()).then_some(self.depends_on),
            healthcheck: self.healthcheck,
        };
        service.validate("service")?;
        Ok(service)
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

/// Options of a top-level named volume. Always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeOptions {}

/// Top-level Compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeConfig {
    services: BTreeMap<String, Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volumes: Option<BTreeMap<String, VolumeOptions>>,
}

impl ComposeConfig {
    /// Assembles a document from named services and declared volumes.
    ///
    /// # Checks performed
    ///
    /// 1. Every service is well-formed.
    /// 2. Every dependency target is a service of this document.
    /// 3. Every named volume mount is declared under `volumes`.
    /// 4. Dependency edges are acyclic.
    ///
    /// # Errors
    ///
    /// Returns an error if any check fails.
    pub fn new<I, S>(services: BTreeMap<String, Service>, volumes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let volumes: BTreeMap<String, VolumeOptions> = volumes
            .into_iter()
            .map(|name| (name.into(), VolumeOptions::default()))
            .collect();
        let config = Self {
            services,
            volumes: (!volumes.is_empty()).then_some(volumes),
        };
        config.validate()?;
        Ok(config)
    }

    /// Decodes a document strictly and runs the same checks as [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns a schema error for unknown keys, bad literals, or missing
    /// required keys, and a validation error if any check fails.
    pub fn from_yaml(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        tracing::info!(services = config.services.len(), "compose document is valid");
        Ok(config)
    }

    /// Services keyed by name.
    pub const fn services(&self) -> &BTreeMap<String, Service> {
        &self.services
    }

    /// Service named `name`.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Declared named volumes.
    pub const fn volumes(&self) -> Option<&BTreeMap<String, VolumeOptions>> {
        self.volumes.as_ref()
    }

    /// Services ordered so that every dependency precedes its dependents.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependency edges form a cycle.
    pub fn startup_order(&self) -> Result<Vec<String>> {
        DependencyGraph::from_services(&self.services).startup_order()
    }

    fn validate(&self) -> Result<()> {
        tracing::debug!(services = self.services.len(), "validating compose document");
        for (name, service) in &self.services {
            validator::check_non_empty("services", name)?;
            service.validate(&format!("services.{name}"))?;
        }
        self.check_dependency_references()?;
        self.check_volume_declarations()?;
        let _ = self.startup_order()?;
        Ok(())
    }

    fn check_dependency_references(&self) -> Result<()> {
        for (name, service) in &self.services {
            if let Some(missing) = service
                .dependency_names()
                .find(|dep| !self.services.contains_key(*dep))
            {
                return Err(ComposeGenError::DanglingDependency {
                    service: name.clone(),
                    dependency: missing.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn check_volume_declarations(&self) -> Result<()> {
        for (name, service) in &self.services {
            for mount in service.volumes().unwrap_or_default() {
                let Some(volume) = validator::named_volume(mount) else {
                    continue;
                };
                let declared = self
                    .volumes
                    .as_ref()
                    .is_some_and(|volumes| volumes.contains_key(volume));
                if !declared {
                    return Err(ComposeGenError::UndeclaredVolume {
                        service: name.clone(),
                        volume: volume.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}
