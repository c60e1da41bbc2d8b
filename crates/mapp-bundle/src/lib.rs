//! # mapp-bundle — Bundle Archive Handling
//!
//! Opens `.mapp` bundle archives, unpacks them into a scoped extraction
//! directory, and loads the two JSON documents as typed `mapp-core` models.
//!
//! ## Resource Model
//!
//! The extraction directory is uniquely named and owned by a guard
//! ([`WorkDir`]). It is removed when the load returns, whether it
//! succeeded or failed. Nothing is written to the current directory.
//!
//! ## Crate Policy
//!
//! - Depends only on `mapp-core` internally.
//! - No rule logic here: this crate stops at typed documents.

pub mod archive;
pub mod error;
pub mod loader;
pub mod workdir;

pub use archive::BundleArchive;
pub use error::ArchiveError;
pub use loader::{load_bundle, Bundle, BundleLayout, CONFIGURATION_MEMBER, METADATA_MEMBER};
pub use workdir::WorkDir;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    /// Write `bundle.mapp` into `dir` holding the given members.
    pub fn write_archive(dir: &Path, members: &[(&str, &str)]) -> PathBuf {
        let path = dir.join("bundle.mapp");
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, contents) in members {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        path
    }
}
