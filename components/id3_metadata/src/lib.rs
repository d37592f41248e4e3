//! ID3 tag codec for MP3 files.
//!
//! Reads the managed frame set out of a file's ID3v2 tag into a
//! [`Record`](track_record::Record) and writes a record back. Writing is a
//! destructive full replace of the managed frames: every managed frame type
//! is deleted first, then a frame is added for each non-empty field. Callers
//! that want a partial update decode, mutate and encode.
//!
//! The file is rewritten in place and saved as ID3v2.4. A crash during the
//! write can leave the file half-written; there is no journal.

mod frames;
mod properties;
mod read;
mod write;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use frames::ManagedFrame;
pub use properties::{read_properties, AudioProperties};
pub use read::{decode, read_tag};
pub use write::encode;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("no ID3 tag in {path}")]
    ContainerMissing { path: PathBuf },

    #[error("file not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("failed to read ID3 tag from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to write ID3 tag to {path}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to read audio properties of {path}")]
    Properties {
        path: PathBuf,
        #[source]
        source: lofty::LoftyError,
    },
}

impl MetadataError {
    pub fn path(&self) -> &Path {
        match self {
            MetadataError::ContainerMissing { path }
            | MetadataError::PathNotFound { path }
            | MetadataError::Read { path, .. }
            | MetadataError::Encoding { path, .. }
            | MetadataError::Properties { path, .. } => path,
        }
    }
}

/// Base name of a path as used for the `filename` join key.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
