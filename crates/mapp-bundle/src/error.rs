//! # Archive Errors
//!
//! Everything that can stop a bundle from being opened, extracted, or
//! loaded. All variants are fatal: no check runs on a bundle that failed
//! to load.

use std::path::PathBuf;

use mapp_core::DocumentError;
use thiserror::Error;

/// Error opening, extracting, or loading a bundle archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("cannot open bundle archive {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a readable zip archive.
    #[error("cannot read bundle archive {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// A required document is not stored at the archive root.
    #[error("bundle archive {} has no `{member}` member at its root", path.display())]
    MissingMember { path: PathBuf, member: String },

    /// The scoped extraction directory could not be created.
    #[error("cannot create extraction directory: {source}")]
    WorkDir { source: std::io::Error },

    /// Unpacking the archive into the extraction directory failed.
    #[error("cannot extract bundle archive {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// An extracted member could not be read back.
    #[error("cannot read extracted member `{member}`: {source}")]
    ReadMember {
        member: String,
        source: std::io::Error,
    },

    /// The extraction directory could not be removed.
    #[error("cannot remove extraction directory {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A member was read but is not a valid document.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
