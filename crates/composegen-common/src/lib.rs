//! # composegen-common
//!
//! Shared error definitions, generator configuration, version lookup, and
//! constants used across the compose-gen workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod version;
