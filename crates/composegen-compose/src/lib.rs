//! # composegen-compose
//!
//! Declarative generation of Compose documents for the NeoPRISM test and
//! demo environments.
//!
//! Handles:
//! - **Model**: The closed Compose schema (`Service`, `ComposeConfig`, ...).
//! - **Validator**: Field-level checks and the `Validate` trait for options.
//! - **Graph**: Dependency graph construction and startup ordering.
//! - **Services**: One pure builder per container image.
//! - **Stacks**: Complete topologies assembled from the service builders.
//! - **Render**: YAML and JSON output of finished documents.

pub mod graph;
pub mod model;
pub mod render;
pub mod services;
pub mod stacks;
pub mod validator;
