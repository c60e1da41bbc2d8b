//! # Report Generation
//!
//! Renders a [`CheckOutcome`] as the plain-text report reviewers read, or as
//! JSON for tooling.
//!
//! ## Text layout
//!
//! Three sections, always in this order: Configuration, Endpoint, Service
//! Action. Each section is
//!
//! ```text
//! #####################
//! Endpoint report
//!
//! Please provide a justification for any tests which have failed
//!
//! Endpoint - GetUsers
//! Has the following failures:
//!   Endpoint does not use incremental syncs
//!
//! ```
//!
//! An empty section prints `No endpoint failures detected` in place of the
//! justification line and has no entity blocks. Configuration failures are
//! listed one per line with no entity header.

use std::fmt;

use crate::aggregate::CheckOutcome;
use crate::failures::FailureSet;
use crate::violation::Violation;

const BANNER: &str = "#####################";
const JUSTIFY: &str = "Please provide a justification for any tests which have failed";

/// Display adapter that renders the text report.
///
/// ```
/// # use mapp_rules::{CheckOutcome, TextReport};
/// let text = TextReport(&CheckOutcome::default()).to_string();
/// assert!(text.contains("No endpoint failures detected"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a>(pub &'a CheckOutcome);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_configuration_section(f, &self.0.configuration)?;
        write_entity_section(f, "Endpoint", &self.0.endpoints)?;
        write_entity_section(f, "Service Action", &self.0.service_actions)
    }
}

/// Pretty-printed JSON report.
pub fn render_json(outcome: &CheckOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

fn write_header(f: &mut fmt::Formatter<'_>, title: &str, is_empty: bool) -> fmt::Result {
    writeln!(f, "{BANNER}\n{title} report\n")?;
    if is_empty {
        writeln!(f, "No {} failures detected", title.to_lowercase())
    } else {
        writeln!(f, "{JUSTIFY}")
    }
}

fn write_configuration_section(f: &mut fmt::Formatter<'_>, failures: &[Violation]) -> fmt::Result {
    write_header(f, "Configuration", failures.is_empty())?;
    for failure in failures {
        writeln!(f, "  {failure}")?;
    }
    writeln!(f)
}

fn write_entity_section(f: &mut fmt::Formatter<'_>, title: &str, set: &FailureSet) -> fmt::Result {
    write_header(f, title, set.is_empty())?;
    for entity in set {
        writeln!(f, "\n{title} - {}\nHas the following failures:", entity.name)?;
        for failure in &entity.failures {
            writeln!(f, "  {failure}")?;
        }
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_outcome_renders_three_no_failure_sections() {
        let text = TextReport(&CheckOutcome::default()).to_string();
        assert_eq!(
            text,
            "#####################\nConfiguration report\n\n\
             No configuration failures detected\n\n\
             #####################\nEndpoint report\n\n\
             No endpoint failures detected\n\n\
             #####################\nService Action report\n\n\
             No service action failures detected\n\n"
        );
    }

    #[test]
    fn configuration_failures_are_indented_lines() {
        let outcome = CheckOutcome {
            configuration: vec![Violation::NoOAuthForActions, Violation::NoAuthentication],
            ..CheckOutcome::default()
        };
        let text = TextReport(&outcome).to_string();
        assert!(text.starts_with(
            "#####################\nConfiguration report\n\n\
             Please provide a justification for any tests which have failed\n\
             \x20 Integration does not use OAuth for writeback actions\n\
             \x20 Integration configuration is not using an authentication method\n\n\
             #####################\nEndpoint report\n"
        ));
    }

    #[test]
    fn entity_blocks_list_every_reason_in_order() {
        let mut endpoints = FailureSet::new();
        endpoints.record("GetUsers", Violation::NoPagination);
        endpoints.record("GetUsers", Violation::NoIncrementalSync);
        endpoints.record("GetGroups", Violation::PlaintextSecret);
        let outcome = CheckOutcome {
            endpoints,
            ..CheckOutcome::default()
        };
        let text = TextReport(&outcome).to_string();
        let expected = "#####################\nEndpoint report\n\n\
             Please provide a justification for any tests which have failed\n\
             \n\
             Endpoint - GetUsers\n\
             Has the following failures:\n\
             \x20 Endpoint does not use pagination\n\
             \x20 Endpoint does not use incremental syncs\n\
             \n\
             Endpoint - GetGroups\n\
             Has the following failures:\n\
             \x20 Endpoint appears to implement a secret in plaintext\n\
             \n";
        assert!(text.contains(expected), "report was:\n{text}");
    }

    #[test]
    fn service_action_section_uses_its_own_labels() {
        let mut service_actions = FailureSet::new();
        service_actions.record("Close", Violation::NoUpdateAfterAction);
        let outcome = CheckOutcome {
            service_actions,
            ..CheckOutcome::default()
        };
        let text = TextReport(&outcome).to_string();
        assert!(text.ends_with(
            "#####################\nService Action report\n\n\
             Please provide a justification for any tests which have failed\n\
             \n\
             Service Action - Close\n\
             Has the following failures:\n\
             \x20 Service action does not use update after action\n\
             \n"
        ));
        assert!(text.contains("No endpoint failures detected"));
        assert!(text.contains("No configuration failures detected"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = TextReport(&CheckOutcome::default()).to_string();
        let config = text.find("Configuration report").unwrap();
        let endpoint = text.find("Endpoint report").unwrap();
        let action = text.find("Service Action report").unwrap();
        assert!(config < endpoint && endpoint < action);
    }

    #[test]
    fn json_report_shape() {
        let mut endpoints = FailureSet::new();
        endpoints.record("GetUsers", Violation::NoIncrementalSync);
        let outcome = CheckOutcome {
            configuration: vec![Violation::NoAuthentication],
            endpoints,
            service_actions: FailureSet::new(),
        };
        let json: serde_json::Value = serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "configuration": ["Integration configuration is not using an authentication method"],
                "endpoints": [
                    {"name": "GetUsers", "failures": ["Endpoint does not use incremental syncs"]}
                ],
                "service_actions": []
            })
        );
    }
}
