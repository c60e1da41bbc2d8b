//! # mapp-rules — Best-Practice Rules for Integration Bundles
//!
//! The substance of `mapp-check`: a handful of independent predicates over
//! typed bundle documents, aggregators that collect their findings per
//! entity, and the sectioned report.
//!
//! ## Pipeline
//!
//! ```text
//! Metadata + IntegrationConfig
//!     → predicates (one Violation or none each)
//!     → aggregators (CheckOutcome: config list + endpoint/action FailureSets)
//!     → TextReport / render_json
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `mapp-core` internally; performs no I/O.
//! - Violations are data, never errors. The only error is a
//!   [`mapp_core::SchemaError`] for a configuration with no services.
//! - Rules are fixed; there is no rule configuration.

pub mod aggregate;
pub mod failures;
pub mod predicates;
pub mod report;
pub mod violation;

pub use aggregate::{
    check_configuration, check_endpoints, check_service_actions, run_checks, CheckOutcome,
};
pub use failures::{EntityFailures, FailureSet};
pub use report::{render_json, TextReport};
pub use violation::Violation;
