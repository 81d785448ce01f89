// In-memory provider.

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::{MetadataProvider, MetadataRecord, ProviderError};
use crate::catalog::Field;

/// Records held in memory, keyed by path.
///
/// Counts open records so callers can check that every record handed out
/// was released.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    records: HashMap<PathBuf, HashMap<Field, String>>,
    open: Cell<usize>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the record at `path`.
    pub fn insert<P, I, S>(&mut self, path: P, fields: I)
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(|(f, s)| (f, s.into())).collect();
        self.records.insert(path.into(), fields);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<P, I, S>(mut self, path: P, fields: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        self.insert(path, fields);
        self
    }

    /// Number of records currently open.
    pub fn open_records(&self) -> usize {
        self.open.get()
    }
}

/// An open in-memory record.
#[derive(Debug)]
pub struct MemoryRecord<'p> {
    fields: &'p HashMap<Field, String>,
    open: &'p Cell<usize>,
}

impl MetadataProvider for MemoryProvider {
    type Record<'p> = MemoryRecord<'p>;

    fn open(&self, path: &Path) -> Result<Self::Record<'_>, ProviderError> {
        let fields = self
            .records
            .get(path)
            .ok_or_else(|| ProviderError::NotFound {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;
        self.open.set(self.open.get() + 1);
        Ok(MemoryRecord {
            fields,
            open: &self.open,
        })
    }
}

impl MetadataRecord for MemoryRecord<'_> {
    fn get(&self, field: Field) -> Cow<'_, str> {
        self.fields
            .get(&field)
            .map_or(Cow::Borrowed(""), |s| Cow::Borrowed(s.as_str()))
    }
}

impl Drop for MemoryRecord<'_> {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}
