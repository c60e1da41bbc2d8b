//! # mapp-cli — Integration Bundle Checker
//!
//! Provides the `mapp-check` command-line tool. It unpacks a `.mapp`
//! integration bundle, checks its metadata and service configuration
//! against a fixed set of best-practice rules, and writes a report of the
//! violations grouped into Configuration, Endpoint, and Service Action
//! sections.
//!
//! ```bash
//! mapp-check --file ServiceNowHTTP.service.mapp
//! mapp-check --file bundle.mapp --output reports/bundle.json --format json --strict
//! mapp-check --config mapp-check.yaml --file bundle.mapp -v
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and configuration live here; rule logic lives in
//!   `mapp-rules` and archive handling in `mapp-bundle`.
//! - Fatal errors surface as `anyhow` chains and exit status 1.

pub mod check;
pub mod config;

pub use check::{run_check, CheckArgs, EXIT_OK, EXIT_VIOLATIONS};
pub use config::{CheckSettings, FileConfig, ReportFormat};
