//! # Aggregators
//!
//! Apply the predicates across a bundle and collect what they report.
//!
//! - Configuration level: a flat list, OAuth-for-actions then authentication.
//! - Endpoints: per endpoint, pagination, incremental sync, plaintext secret.
//! - Service actions: per action, update before, then update after.
//!
//! Only the primary service (`services[0]`) is read.

use mapp_core::{Endpoint, IntegrationConfig, Metadata, SchemaError, ServiceAction};
use serde::Serialize;

use crate::failures::FailureSet;
use crate::predicates::{
    check_authentication, check_incremental_sync, check_oauth_for_actions, check_pagination,
    check_plaintext_secret, check_update_after_action, check_update_before_action,
};
use crate::violation::Violation;

/// Everything a run found, ready for the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Configuration-level violations, in evaluation order.
    pub configuration: Vec<Violation>,
    /// Failing endpoints, in document order.
    pub endpoints: FailureSet,
    /// Failing service actions, in document order.
    pub service_actions: FailureSet,
}

impl CheckOutcome {
    /// Total violations across all three sections.
    pub fn violation_count(&self) -> usize {
        self.configuration.len()
            + self.endpoints.violation_count()
            + self.service_actions.violation_count()
    }

    /// Whether nothing failed.
    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }
}

/// Run every check over a loaded bundle.
pub fn run_checks(
    metadata: &Metadata,
    config: &IntegrationConfig,
) -> Result<CheckOutcome, SchemaError> {
    let service = config.primary_service()?;
    let outcome = CheckOutcome {
        configuration: check_configuration(metadata, config)?,
        endpoints: check_endpoints(&service.configuration.data_endpoints),
        service_actions: check_service_actions(&service.configuration.service_actions),
    };

    tracing::info!(
        configuration = outcome.configuration.len(),
        endpoints = outcome.endpoints.len(),
        service_actions = outcome.service_actions.len(),
        "checks complete"
    );
    Ok(outcome)
}

/// Configuration-level violations: OAuth for actions, then authentication.
pub fn check_configuration(
    metadata: &Metadata,
    config: &IntegrationConfig,
) -> Result<Vec<Violation>, SchemaError> {
    let mut failures = Vec::new();
    failures.extend(check_oauth_for_actions(metadata));
    failures.extend(check_authentication(config.primary_service()?));
    Ok(failures)
}

/// Per-endpoint violations.
pub fn check_endpoints(endpoints: &[Endpoint]) -> FailureSet {
    let mut failures = FailureSet::new();
    for endpoint in endpoints {
        failures.record_all(
            &endpoint.name,
            [
                check_pagination(endpoint),
                check_incremental_sync(endpoint),
                check_plaintext_secret(endpoint),
            ]
            .into_iter()
            .flatten(),
        );
    }
    tracing::debug!(
        checked = endpoints.len(),
        failing = failures.len(),
        "endpoint checks"
    );
    failures
}

/// Per-service-action violations.
pub fn check_service_actions(actions: &[ServiceAction]) -> FailureSet {
    let mut failures = FailureSet::new();
    for action in actions {
        failures.record_all(
            &action.name,
            [
                check_update_before_action(action),
                check_update_after_action(action),
            ]
            .into_iter()
            .flatten(),
        );
    }
    tracing::debug!(
        checked = actions.len(),
        failing = failures.len(),
        "service action checks"
    );
    failures
}
