//! # Violations
//!
//! The fixed set of best-practice violations a bundle can be reported for.
//! A violation is expected output, never an error: it is recorded in the
//! report and the run continues.

use serde::{Serialize, Serializer};

/// A best-practice violation, rendered as a fixed human-readable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The primary service's security type is `"None"`.
    NoAuthentication,
    /// Metadata declares no OAuth support for writeback actions.
    NoOAuthForActions,
    /// An endpoint parameter name looks like a credential.
    PlaintextSecret,
    /// An endpoint has no incremental sync parameters.
    NoIncrementalSync,
    /// An endpoint declares no pagination method.
    NoPagination,
    /// A service action refreshes no data before running.
    NoUpdateBeforeAction,
    /// A service action refreshes no data after running.
    NoUpdateAfterAction,
}

impl Violation {
    /// The reason line printed in reports.
    pub fn reason(self) -> &'static str {
        match self {
            Self::NoAuthentication => {
                "Integration configuration is not using an authentication method"
            }
            Self::NoOAuthForActions => "Integration does not use OAuth for writeback actions",
            Self::PlaintextSecret => "Endpoint appears to implement a secret in plaintext",
            Self::NoIncrementalSync => "Endpoint does not use incremental syncs",
            Self::NoPagination => "Endpoint does not use pagination",
            Self::NoUpdateBeforeAction => "Service action does not use update before action",
            Self::NoUpdateAfterAction => "Service action does not use update after action",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.reason())
    }
}
