//! # Rule Predicates
//!
//! Each predicate inspects one fragment of a bundle and returns the
//! [`Violation`] it found, or `None`. Predicates are pure and total over
//! typed documents: every field they read was validated at load time.
//!
//! | Predicate | Scope | Fails when |
//! |-----------|-------|------------|
//! | [`check_authentication`] | primary service | `security.type == "None"` |
//! | [`check_oauth_for_actions`] | metadata | `supportsOAuthForActions` is false |
//! | [`check_plaintext_secret`] | endpoint | a parameter name contains `token` or `bearer` |
//! | [`check_incremental_sync`] | endpoint | incremental sync parameters absent or empty |
//! | [`check_pagination`] | endpoint | `paginationMethod` key absent |
//! | [`check_update_before_action`] | service action | `preActionDataUpdates` empty |
//! | [`check_update_after_action`] | service action | `postActionDataUpdates` empty |

use mapp_core::{Endpoint, Metadata, Service, ServiceAction};

use crate::violation::Violation;

/// Substrings that mark a parameter as carrying a credential. Case-sensitive.
pub const SECRET_MARKERS: [&str; 2] = ["token", "bearer"];

/// The service declares no authentication method.
pub fn check_authentication(service: &Service) -> Option<Violation> {
    service
        .configuration
        .security
        .is_unauthenticated()
        .then_some(Violation::NoAuthentication)
}

/// Writeback actions do not authenticate with OAuth.
pub fn check_oauth_for_actions(metadata: &Metadata) -> Option<Violation> {
    (!metadata.supports_oauth_for_actions).then_some(Violation::NoOAuthForActions)
}

/// A parameter in any request collection looks like a plaintext secret.
///
/// Collections are scanned query, path, header, body; the scan stops at the
/// first match, so an endpoint yields at most one violation.
pub fn check_plaintext_secret(endpoint: &Endpoint) -> Option<Violation> {
    let (location, parameter) = endpoint
        .all_parameters()
        .find(|(_, p)| SECRET_MARKERS.iter().any(|m| p.name.contains(*m)))?;

    tracing::debug!(
        endpoint = %endpoint.name,
        %location,
        parameter = %parameter.name,
        "parameter name looks like a plaintext secret"
    );
    Some(Violation::PlaintextSecret)
}

/// The endpoint syncs everything on every run.
pub fn check_incremental_sync(endpoint: &Endpoint) -> Option<Violation> {
    let uses_incremental = endpoint
        .incremental_sync_query_parameters
        .as_ref()
        .is_some_and(|params| !params.is_empty());
    (!uses_incremental).then_some(Violation::NoIncrementalSync)
}

/// The endpoint has no pagination method. Its value is not inspected.
pub fn check_pagination(endpoint: &Endpoint) -> Option<Violation> {
    endpoint
        .pagination_method
        .is_none()
        .then_some(Violation::NoPagination)
}

/// The action does not refresh data before it runs.
pub fn check_update_before_action(action: &ServiceAction) -> Option<Violation> {
    action
        .pre_action_data_updates
        .is_empty()
        .then_some(Violation::NoUpdateBeforeAction)
}

/// The action does not refresh data after it runs.
pub fn check_update_after_action(action: &ServiceAction) -> Option<Violation> {
    action
        .post_action_data_updates
        .is_empty()
        .then_some(Violation::NoUpdateAfterAction)
}
