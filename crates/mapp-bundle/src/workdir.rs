//! # Scoped Extraction Directory
//!
//! Each run unpacks its bundle into a fresh, uniquely named directory
//! (`mapp-check-XXXXXX`) under the system temp dir or a caller-chosen
//! parent. The directory is removed when the [`WorkDir`] is dropped, so a
//! failed run never leaves extracted files behind and concurrent runs in
//! the same working directory never collide.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::ArchiveError;

/// Name prefix of every extraction directory.
pub const WORK_DIR_PREFIX: &str = "mapp-check-";

/// A uniquely named directory that lives for one run.
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a fresh directory under `parent`, or under the system temp
    /// dir when `parent` is `None`.
    pub fn create(parent: Option<&Path>) -> Result<Self, ArchiveError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORK_DIR_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|source| ArchiveError::WorkDir { source })?;

        tracing::debug!(path = %dir.path().display(), "created extraction directory");
        Ok(Self { dir })
    }

    /// Location of the directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Read an extracted member by its archive-relative name.
    pub fn read_member(&self, member: &str) -> Result<Vec<u8>, ArchiveError> {
        std::fs::read(self.dir.path().join(member)).map_err(|source| ArchiveError::ReadMember {
            member: member.to_string(),
            source,
        })
    }

    /// Remove the directory now and report any failure.
    ///
    /// Dropping a `WorkDir` also removes it, but silently.
    pub fn close(self) -> Result<(), ArchiveError> {
        let path: PathBuf = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| ArchiveError::Cleanup {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "removed extraction directory");
        Ok(())
    }
}
