//! # Bundle Documents
//!
//! Typed, read-only views of the two JSON documents carried by a bundle:
//!
//! - **Metadata** (`metadata.json`): global integration settings.
//! - **Integration configuration** (`file.sapp`): services, each with a
//!   security configuration, data endpoints, and service actions.
//!
//! Only the subset of each document the checks consume is modelled.
//! Unknown fields are ignored. A missing or mistyped required field fails
//! the whole load with a [`SchemaError`] naming its path.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DocumentError, SchemaError};
use crate::json::Node;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Global integration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Whether writeback actions authenticate with OAuth.
    pub supports_oauth_for_actions: bool,
}

impl Metadata {
    /// Parse the metadata member.
    pub fn from_slice(document: &str, bytes: &[u8]) -> Result<Self, DocumentError> {
        let value = parse(document, bytes)?;
        Ok(Self::from_node(&Node::root(document, &value))?)
    }

    /// Build from an already parsed document.
    pub fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            supports_oauth_for_actions: node.field("supportsOAuthForActions")?.as_bool()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Integration configuration
// ---------------------------------------------------------------------------

/// The integration configuration document.
///
/// Only `services[0]` is typed. Later entries are counted but never
/// validated, since no check reads them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    /// Document name, kept for error reporting.
    #[serde(skip)]
    pub document: String,
    /// The first configured service, `None` when `services` is empty.
    pub primary: Option<Service>,
    /// Length of the `services` list.
    pub service_count: usize,
}

impl IntegrationConfig {
    /// Parse the configuration member.
    pub fn from_slice(document: &str, bytes: &[u8]) -> Result<Self, DocumentError> {
        let value = parse(document, bytes)?;
        Ok(Self::from_node(&Node::root(document, &value))?)
    }

    /// Build from an already parsed document.
    pub fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        let services = node.field("services")?;
        let service_count = services.as_array()?.len();
        let primary = if service_count == 0 {
            None
        } else {
            Some(Service::from_node(&services.index(0)?)?)
        };
        Ok(Self {
            document: node.document().to_string(),
            primary,
            service_count,
        })
    }

    /// The service every check reads: `services[0]`.
    ///
    /// Bundles are exported one service at a time, so later entries are
    /// not inspected.
    pub fn primary_service(&self) -> Result<&Service, SchemaError> {
        self.primary.as_ref().ok_or_else(|| SchemaError::MissingField {
            document: self.document.clone(),
            path: "services[0]".to_string(),
        })
    }
}

/// One configured service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Service-level configuration.
    pub configuration: ServiceConfiguration,
}

impl Service {
    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            configuration: ServiceConfiguration::from_node(&node.field("configuration")?)?,
        })
    }
}

/// Security settings, endpoints, and actions of a service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfiguration {
    /// Authentication settings.
    pub security: Security,
    /// Data retrieval endpoints, in document order.
    pub data_endpoints: Vec<Endpoint>,
    /// Writeback actions, in document order.
    pub service_actions: Vec<ServiceAction>,
}

impl ServiceConfiguration {
    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        let security = Security::from_node(&node.field("security")?)?;
        let data_endpoints = node
            .field("dataEndpoints")?
            .elements()?
            .map(|e| Endpoint::from_node(&e))
            .collect::<Result<Vec<_>, _>>()?;
        let service_actions = node
            .field("serviceActions")?
            .elements()?
            .map(|a| ServiceAction::from_node(&a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            security,
            data_endpoints,
            service_actions,
        })
    }
}

/// Authentication method of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Security {
    /// The `type` string, e.g. `"OAuth2"`, `"Basic"`, or `"None"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Security {
    /// The literal `type` value that marks an unauthenticated service.
    pub const NONE: &'static str = "None";

    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            kind: node.field("type")?.as_str()?.to_string(),
        })
    }

    /// Whether the service declares no authentication at all.
    pub fn is_unauthenticated(&self) -> bool {
        self.kind == Self::NONE
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Which request collection a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Body,
}

impl ParameterLocation {
    /// All locations, in the order they are scanned.
    pub const ALL: [ParameterLocation; 4] = [Self::Query, Self::Path, Self::Header, Self::Body];

    /// JSON key of the collection.
    pub fn key(self) -> &'static str {
        match self {
            Self::Query => "queryParameters",
            Self::Path => "pathParameters",
            Self::Header => "headerParameters",
            Self::Body => "bodyParameters",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A request parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name as sent on the wire.
    pub name: String,
}

impl Parameter {
    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            name: node.field("name")?.as_str()?.to_string(),
        })
    }
}

/// A configured data retrieval endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub name: String,
    pub query_parameters: Vec<Parameter>,
    pub path_parameters: Vec<Parameter>,
    pub header_parameters: Vec<Parameter>,
    pub body_parameters: Vec<Parameter>,
    /// `None` when the key is absent or `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental_sync_query_parameters: Option<Vec<Value>>,
    /// `Some` whenever the key exists, including `Some(Value::Null)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_method: Option<Value>,
}

impl Endpoint {
    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        let name = node.field("name")?.as_str()?.to_string();
        let params = |location: ParameterLocation| -> Result<Vec<Parameter>, SchemaError> {
            node.field(location.key())?
                .elements()?
                .map(|p| Parameter::from_node(&p))
                .collect()
        };
        let incremental_sync_query_parameters =
            match node.optional("incrementalSyncQueryParameters")? {
                Some(n) if n.value().is_null() => None,
                Some(n) => Some(n.as_array()?.clone()),
                None => None,
            };
        let pagination_method = node.optional("paginationMethod")?.map(|n| n.value().clone());

        Ok(Self {
            name,
            query_parameters: params(ParameterLocation::Query)?,
            path_parameters: params(ParameterLocation::Path)?,
            header_parameters: params(ParameterLocation::Header)?,
            body_parameters: params(ParameterLocation::Body)?,
            incremental_sync_query_parameters,
            pagination_method,
        })
    }

    /// Parameters of one collection.
    pub fn parameters(&self, location: ParameterLocation) -> &[Parameter] {
        match location {
            ParameterLocation::Query => &self.query_parameters,
            ParameterLocation::Path => &self.path_parameters,
            ParameterLocation::Header => &self.header_parameters,
            ParameterLocation::Body => &self.body_parameters,
        }
    }

    /// Every parameter with its location: query, path, header, then body.
    pub fn all_parameters(&self) -> impl Iterator<Item = (ParameterLocation, &Parameter)> {
        ParameterLocation::ALL
            .into_iter()
            .flat_map(move |loc| self.parameters(loc).iter().map(move |p| (loc, p)))
    }
}

// ---------------------------------------------------------------------------
// Service actions
// ---------------------------------------------------------------------------

/// A configured writeback action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAction {
    pub name: String,
    /// Data refreshes run before the action.
    pub pre_action_data_updates: Vec<Value>,
    /// Data refreshes run after the action.
    pub post_action_data_updates: Vec<Value>,
}

impl ServiceAction {
    fn from_node(node: &Node<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            name: node.field("name")?.as_str()?.to_string(),
            pre_action_data_updates: node.field("preActionDataUpdates")?.as_array()?.clone(),
            post_action_data_updates: node.field("postActionDataUpdates")?.as_array()?.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse(document: &str, bytes: &[u8]) -> Result<Value, DocumentError> {
    serde_json::from_slice(bytes).map_err(|source| DocumentError::Parse {
        document: document.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint_json(name: &str) -> Value {
        json!({
            "name": name,
            "queryParameters": [],
            "pathParameters": [],
            "headerParameters": [],
            "bodyParameters": [],
        })
    }

    fn config_json(endpoints: Vec<Value>, actions: Vec<Value>) -> Value {
        json!({
            "services": [{
                "configuration": {
                    "security": {"type": "OAuth2"},
                    "dataEndpoints": endpoints,
                    "serviceActions": actions,
                }
            }]
        })
    }

    fn load(value: &Value) -> Result<IntegrationConfig, DocumentError> {
        IntegrationConfig::from_slice("file.sapp", value.to_string().as_bytes())
    }

    #[test]
    fn metadata_parses_boolean() {
        let m = Metadata::from_slice("metadata.json", br#"{"supportsOAuthForActions": true}"#)
            .unwrap();
        assert!(m.supports_oauth_for_actions);
    }

    #[test]
    fn metadata_ignores_unknown_fields() {
        let m = Metadata::from_slice(
            "metadata.json",
            br#"{"supportsOAuthForActions": false, "name": "ServiceNow", "version": 3}"#,
        )
        .unwrap();
        assert!(!m.supports_oauth_for_actions);
    }

    #[test]
    fn metadata_missing_flag_is_schema_error() {
        let err = Metadata::from_slice("metadata.json", b"{}").unwrap_err();
        match err {
            DocumentError::Schema(e) => assert_eq!(e.path(), "supportsOAuthForActions"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn metadata_invalid_json_is_parse_error() {
        let err = Metadata::from_slice("metadata.json", b"not json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
    }

    #[test]
    fn config_parses_endpoints_and_actions_in_order() {
        let value = config_json(
            vec![endpoint_json("GetUsers"), endpoint_json("GetGroups")],
            vec![json!({
                "name": "CreateTicket",
                "preActionDataUpdates": [],
                "postActionDataUpdates": [{"endpoint": "GetUsers"}],
            })],
        );
        let config = load(&value).unwrap();
        let service = config.primary_service().unwrap();
        assert_eq!(service.configuration.security.kind, "OAuth2");
        let names: Vec<&str> = service
            .configuration
            .data_endpoints
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["GetUsers", "GetGroups"]);
        let action = &service.configuration.service_actions[0];
        assert!(action.pre_action_data_updates.is_empty());
        assert_eq!(action.post_action_data_updates.len(), 1);
    }

    #[test]
    fn empty_services_fails_on_primary_service() {
        let config = load(&json!({"services": []})).unwrap();
        let err = config.primary_service().unwrap_err();
        assert_eq!(err.path(), "services[0]");
        assert_eq!(err.document(), "file.sapp");
    }

    #[test]
    fn later_services_are_not_validated() {
        let mut value = config_json(vec![endpoint_json("GetUsers")], vec![]);
        value["services"]
            .as_array_mut()
            .unwrap()
            .push(json!({"name": "secondary-without-configuration"}));
        let config = load(&value).unwrap();
        assert_eq!(config.service_count, 2);
        let service = config.primary_service().unwrap();
        assert_eq!(service.configuration.data_endpoints[0].name, "GetUsers");
    }

    #[test]
    fn services_must_be_a_list() {
        let err = load(&json!({"services": {"name": "ServiceNow"}})).unwrap_err();
        match err {
            DocumentError::Schema(e) => assert_eq!(e.path(), "services"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_parameter_name_reports_path() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint["headerParameters"] = json!([{"value": "x"}]);
        let err = load(&config_json(vec![endpoint], vec![])).unwrap_err();
        match err {
            DocumentError::Schema(e) => assert_eq!(
                e.path(),
                "services[0].configuration.dataEndpoints[0].headerParameters[0].name"
            ),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_parameter_collection_is_schema_error() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint.as_object_mut().unwrap().remove("bodyParameters");
        let err = load(&config_json(vec![endpoint], vec![])).unwrap_err();
        assert!(err.to_string().contains("dataEndpoints[0].bodyParameters"));
    }

    #[test]
    fn missing_pre_action_updates_is_schema_error() {
        let action = json!({"name": "Close", "postActionDataUpdates": []});
        let err = load(&config_json(vec![], vec![action])).unwrap_err();
        assert!(err
            .to_string()
            .contains("serviceActions[0].preActionDataUpdates"));
    }

    #[test]
    fn pagination_null_counts_as_present() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint["paginationMethod"] = Value::Null;
        let config = load(&config_json(vec![endpoint], vec![])).unwrap();
        let e = &config.primary_service().unwrap().configuration.data_endpoints[0];
        assert_eq!(e.pagination_method, Some(Value::Null));
    }

    #[test]
    fn incremental_sync_null_counts_as_absent() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint["incrementalSyncQueryParameters"] = Value::Null;
        let config = load(&config_json(vec![endpoint], vec![])).unwrap();
        let e = &config.primary_service().unwrap().configuration.data_endpoints[0];
        assert!(e.incremental_sync_query_parameters.is_none());
    }

    #[test]
    fn incremental_sync_wrong_type_is_schema_error() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint["incrementalSyncQueryParameters"] = json!("since");
        let err = load(&config_json(vec![endpoint], vec![])).unwrap_err();
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn all_parameters_scans_in_collection_order() {
        let mut endpoint = endpoint_json("GetUsers");
        endpoint["bodyParameters"] = json!([{"name": "b"}]);
        endpoint["queryParameters"] = json!([{"name": "q1"}, {"name": "q2"}]);
        endpoint["headerParameters"] = json!([{"name": "h"}]);
        let config = load(&config_json(vec![endpoint], vec![])).unwrap();
        let e = &config.primary_service().unwrap().configuration.data_endpoints[0];
        let seen: Vec<(ParameterLocation, &str)> = e
            .all_parameters()
            .map(|(loc, p)| (loc, p.name.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (ParameterLocation::Query, "q1"),
                (ParameterLocation::Query, "q2"),
                (ParameterLocation::Header, "h"),
                (ParameterLocation::Body, "b"),
            ]
        );
    }

    #[test]
    fn security_none_is_unauthenticated() {
        let s = Security {
            kind: "None".to_string(),
        };
        assert!(s.is_unauthenticated());
        let s = Security {
            kind: "none".to_string(),
        };
        assert!(!s.is_unauthenticated());
    }

    #[test]
    fn endpoint_serializes_with_wire_names() {
        let config = load(&config_json(vec![endpoint_json("GetUsers")], vec![])).unwrap();
        let e = &config.primary_service().unwrap().configuration.data_endpoints[0];
        let v = serde_json::to_value(e).unwrap();
        assert!(v.get("queryParameters").is_some());
        assert!(v.get("paginationMethod").is_none());
    }
}
