//! # Bundle Loading
//!
//! Turns an archive path into typed documents in one pass:
//!
//! 1. open the archive and check both members exist at its root,
//! 2. unpack into a scoped [`WorkDir`],
//! 3. parse the metadata member, then the configuration member,
//! 4. remove the extraction directory.
//!
//! Any failure aborts the load. The extraction directory is removed on
//! every path because it is owned by a guard that is dropped on return.

use std::path::Path;

use mapp_core::{IntegrationConfig, Metadata};

use crate::archive::BundleArchive;
use crate::error::ArchiveError;
use crate::workdir::WorkDir;

/// Default name of the metadata member.
pub const METADATA_MEMBER: &str = "metadata.json";

/// Default name of the integration configuration member.
pub const CONFIGURATION_MEMBER: &str = "file.sapp";

/// Names of the two documents inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    pub metadata_member: String,
    pub configuration_member: String,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self {
            metadata_member: METADATA_MEMBER.to_string(),
            configuration_member: CONFIGURATION_MEMBER.to_string(),
        }
    }
}

/// The typed contents of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub metadata: Metadata,
    pub configuration: IntegrationConfig,
}

/// Load a bundle archive.
///
/// # Arguments
///
/// * `archive_path` - The `.mapp` zip archive.
/// * `layout` - Member names of the two documents.
/// * `work_parent` - Parent of the extraction directory; `None` uses the
///   system temp dir.
pub fn load_bundle(
    archive_path: &Path,
    layout: &BundleLayout,
    work_parent: Option<&Path>,
) -> Result<Bundle, ArchiveError> {
    let mut archive = BundleArchive::open(archive_path)?;
    archive.require_members(&[
        layout.metadata_member.as_str(),
        layout.configuration_member.as_str(),
    ])?;

    let work_dir = WorkDir::create(work_parent)?;
    archive.extract_into(&work_dir)?;

    let bytes = work_dir.read_member(&layout.metadata_member)?;
    let metadata = Metadata::from_slice(&layout.metadata_member, &bytes)?;

    let bytes = work_dir.read_member(&layout.configuration_member)?;
    let configuration = IntegrationConfig::from_slice(&layout.configuration_member, &bytes)?;

    work_dir.close()?;

    tracing::info!(
        services = configuration.service_count,
        "loaded bundle documents"
    );
    Ok(Bundle {
        metadata,
        configuration,
    })
}
