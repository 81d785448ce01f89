// Field catalog and selection.
//
// The catalog is the fixed, ordered universe of comparable fields. Catalog
// order is comparison order and report order.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A comparable package metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Version,
    Origin,
    Prefix,
    Categories,
    Maintainer,
    Comment,
    Description,
    Licenses,
    Homepage,
    Architecture,
    Messages,
    Options,
    Annotations,
    Users,
    Groups,
    Dependencies,
    RequiredLibraries,
    Files,
    Directories,
    ProvidedLibraries,
}

impl Field {
    /// Every field, in catalog order.
    pub const ALL: &'static [Field] = &[
        Field::Name,
        Field::Version,
        Field::Origin,
        Field::Prefix,
        Field::Categories,
        Field::Maintainer,
        Field::Comment,
        Field::Description,
        Field::Licenses,
        Field::Homepage,
        Field::Architecture,
        Field::Messages,
        Field::Options,
        Field::Annotations,
        Field::Users,
        Field::Groups,
        Field::Dependencies,
        Field::RequiredLibraries,
        Field::Files,
        Field::Directories,
        Field::ProvidedLibraries,
    ];

    /// Catalog name, as accepted by `-x` and printed in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::Origin => "origin",
            Self::Prefix => "prefix",
            Self::Categories => "categories",
            Self::Maintainer => "maintainer",
            Self::Comment => "comment",
            Self::Description => "description",
            Self::Licenses => "licenses",
            Self::Homepage => "homepage",
            Self::Architecture => "architecture",
            Self::Messages => "messages",
            Self::Options => "options",
            Self::Annotations => "annotations",
            Self::Users => "users",
            Self::Groups => "groups",
            Self::Dependencies => "dependencies",
            Self::RequiredLibraries => "required_libraries",
            Self::Files => "files",
            Self::Directories => "directories",
            Self::ProvidedLibraries => "provided_libraries",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Select the catalog fields not named in `exclusions`, in catalog order.
///
/// Names that are not in the catalog are ignored.
pub fn select(exclusions: &HashSet<String>) -> Vec<Field> {
    select_from(Field::ALL, exclusions)
}

/// Same as [`select`], over an arbitrary ordered catalog.
pub fn select_from(catalog: &[Field], exclusions: &HashSet<String>) -> Vec<Field> {
    catalog
        .iter()
        .copied()
        .filter(|f| !exclusions.contains(f.as_str()))
        .collect()
}
