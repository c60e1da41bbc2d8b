//! # mapp-core — Typed Bundle Documents
//!
//! Foundational types for `mapp-check`, the integration bundle checker.
//! A bundle (`.mapp` archive) carries two JSON documents; this crate turns
//! them into typed, read-only views the rule crate can inspect without any
//! further key lookups.
//!
//! ## Key Design Principles
//!
//! 1. **Parse, then walk.** Members are parsed into `serde_json::Value` and
//!    walked with a path-tracking [`Node`], so every schema failure names the
//!    exact field (`services[0].configuration.dataEndpoints[3].name`).
//!
//! 2. **Presence is data.** Optional fields whose mere presence matters
//!    (`paginationMethod`) are kept as `Option<Value>` rather than defaulted.
//!
//! 3. **All-or-nothing loading.** A document either loads completely or
//!    yields a [`SchemaError`]; there is no partially populated model.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mapp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod json;

pub use document::{
    Endpoint, IntegrationConfig, Metadata, Parameter, ParameterLocation, Security, Service,
    ServiceAction, ServiceConfiguration,
};
pub use error::{DocumentError, SchemaError};
pub use json::Node;
