//! # Bundle Archive
//!
//! A `.mapp` bundle is a zip archive whose root holds the metadata and
//! integration configuration documents. [`BundleArchive`] opens it,
//! checks the required members are present before anything is written to
//! disk, and unpacks it into a [`WorkDir`].
//!
//! Member paths that would escape the extraction directory are rejected by
//! the `zip` crate during extraction.

use std::fs::File;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::workdir::WorkDir;

/// An opened bundle archive.
pub struct BundleArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl std::fmt::Debug for BundleArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleArchive")
            .field("path", &self.path)
            .field("members", &self.zip.len())
            .finish()
    }
}

impl BundleArchive {
    /// Open and index a bundle archive.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let zip = ZipArchive::new(file).map_err(|source| ArchiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), members = zip.len(), "opened bundle archive");
        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    /// Path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries, directories included.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.zip.len() == 0
    }

    /// Whether `member` is stored under exactly that name.
    pub fn contains(&self, member: &str) -> bool {
        self.zip.file_names().any(|name| name == member)
    }

    /// Fail with [`ArchiveError::MissingMember`] for the first absent member.
    pub fn require_members(&self, members: &[&str]) -> Result<(), ArchiveError> {
        match members.iter().find(|m| !self.contains(m)) {
            Some(missing) => Err(ArchiveError::MissingMember {
                path: self.path.clone(),
                member: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Unpack every entry into `dir`.
    pub fn extract_into(&mut self, dir: &WorkDir) -> Result<(), ArchiveError> {
        self.zip
            .extract(dir.path())
            .map_err(|source| ArchiveError::Extract {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            archive = %self.path.display(),
            into = %dir.path().display(),
            "extracted bundle archive"
        );
        Ok(())
    }
}
