// Metadata providers.
//
// A provider opens a package record by path and renders each catalog field
// of it as text. Records are released by dropping them.
//
// - `manifest`: JSON package manifests (`+MANIFEST`, `+COMPACT_MANIFEST`)
// - `memory`: in-memory records, for library callers and tests

#[cfg(feature = "json")]
pub mod manifest;
pub mod memory;

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::Field;

#[cfg(feature = "json")]
pub use manifest::{Manifest, ManifestProvider};
pub use memory::{MemoryProvider, MemoryRecord};

/// Source of package records.
pub trait MetadataProvider {
    /// An open record. Dropping it releases whatever `open` acquired.
    type Record<'p>: MetadataRecord
    where
        Self: 'p;

    /// Open the record stored at `path`.
    fn open(&self, path: &Path) -> Result<Self::Record<'_>, ProviderError>;
}

/// One open package record.
pub trait MetadataRecord {
    /// Text of `field`. A field the record does not carry is empty.
    fn get(&self, field: Field) -> Cow<'_, str>;
}

/// Failure to open a record.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[cfg(feature = "json")]
    #[error("{}: malformed manifest: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// Path of the record that could not be opened.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } => path,
            #[cfg(feature = "json")]
            Self::Malformed { path, .. } => path,
        }
    }
}
