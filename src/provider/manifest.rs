// JSON package manifest provider.
//
// Reads the manifest `pkg` writes into every package (`+MANIFEST`, or the
// reduced `+COMPACT_MANIFEST`) and renders each catalog field as text, one
// entry per line for list-like fields. Object-valued collections render in
// key order.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use super::{MetadataProvider, MetadataRecord, ProviderError};
use crate::catalog::Field;

/// Manifest file names probed, in order, when a directory is opened.
pub const MANIFEST_NAMES: &[&str] = &["+MANIFEST", "+COMPACT_MANIFEST"];

/// Opens manifests from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestProvider;

impl ManifestProvider {
    fn resolve(path: &Path) -> PathBuf {
        if path.is_dir() {
            for name in MANIFEST_NAMES {
                let candidate = path.join(name);
                if candidate.is_file() {
                    return candidate;
                }
            }
        }
        path.to_path_buf()
    }
}

impl MetadataProvider for ManifestProvider {
    type Record<'p> = Manifest;

    fn open(&self, path: &Path) -> Result<Self::Record<'_>, ProviderError> {
        let file = Self::resolve(path);
        let text = std::fs::read_to_string(&file).map_err(|source| ProviderError::NotFound {
            path: file.clone(),
            source,
        })?;
        let manifest =
            Manifest::parse(&text).map_err(|source| ProviderError::Malformed {
                path: file.clone(),
                source,
            })?;
        debug!("opened manifest {}", file.display());
        Ok(manifest)
    }
}

/// A parsed package manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Value,
}

impl Manifest {
    /// Parse manifest JSON.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::from_value)
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Render `field` as text.
    pub fn render(&self, field: Field) -> String {
        match field {
            Field::Name => self.scalar("name"),
            Field::Version => self.scalar("version"),
            Field::Origin => self.scalar("origin"),
            Field::Prefix => self.scalar("prefix"),
            Field::Categories => self.line_per_name("categories"),
            Field::Maintainer => self.scalar("maintainer"),
            Field::Comment => self.scalar("comment"),
            Field::Description => self.scalar("desc"),
            Field::Licenses => self.licenses(),
            Field::Homepage => self.scalar("www"),
            Field::Architecture => match self.scalar("abi") {
                abi if abi.is_empty() => self.scalar("arch"),
                abi => abi,
            },
            Field::Messages => self.messages(),
            Field::Options => self.options(),
            Field::Annotations => self.annotations(),
            Field::Users => self.names("users").join(", "),
            Field::Groups => self.line_per_name("groups"),
            Field::Dependencies => self.dependencies(),
            Field::RequiredLibraries => self.line_per_name("shlibs_required"),
            Field::Files => self.files(),
            Field::Directories => self.directories(),
            Field::ProvidedLibraries => self.line_per_name("shlibs_provided"),
        }
    }

    fn scalar(&self, key: &str) -> String {
        self.root.get(key).map(text).unwrap_or_default()
    }

    fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.root.get(key).and_then(Value::as_object)
    }

    // Arrays list their elements; objects list their keys.
    fn names(&self, key: &str) -> Vec<String> {
        match self.root.get(key) {
            Some(Value::Array(items)) => items.iter().map(text).collect(),
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(other) => vec![text(other)],
            None => Vec::new(),
        }
    }

    fn line_per_name(&self, key: &str) -> String {
        self.names(key).into_iter().fold(String::new(), |mut out, name| {
            push_line(&mut out, &name);
            out
        })
    }

    fn licenses(&self) -> String {
        let sep = match self.scalar("licenselogic").as_str() {
            "or" | "dual" => " | ",
            _ => " & ",
        };
        self.names("licenses").join(sep)
    }

    fn messages(&self) -> String {
        let mut out = String::new();
        let mut push = |msg: String| {
            out.push_str(&msg);
            if !msg.ends_with('\n') {
                out.push('\n');
            }
        };
        match self.root.get("messages") {
            Some(Value::Array(items)) => {
                for item in items {
                    push(member(item, "message").unwrap_or_else(|| text(item)));
                }
            }
            Some(other) => push(text(other)),
            None => {
                if let Some(msg) = self.root.get("message") {
                    push(text(msg));
                }
            }
        }
        out
    }

    fn options(&self) -> String {
        let mut out = String::new();
        for (name, opt) in self.object("options").into_iter().flatten() {
            let (value, default, descr) = match opt {
                Value::Object(_) => (
                    member(opt, "value").unwrap_or_default(),
                    member(opt, "default").unwrap_or_default(),
                    member(opt, "description").unwrap_or_default(),
                ),
                other => (text(other), String::new(), String::new()),
            };
            push_line(&mut out, &format!("{name}: {value} [default: {default}] <{descr}>"));
        }
        out
    }

    fn annotations(&self) -> String {
        let mut out = String::new();
        for (tag, value) in self.object("annotations").into_iter().flatten() {
            push_line(&mut out, &format!("{tag}: {}", text(value)));
        }
        out
    }

    fn dependencies(&self) -> String {
        let mut out = String::new();
        for (name, dep) in self.object("deps").into_iter().flatten() {
            let version = member(dep, "version").unwrap_or_default();
            let origin = member(dep, "origin").unwrap_or_default();
            push_line(&mut out, &format!("{name}-{version} ({origin})"));
        }
        out
    }

    fn files(&self) -> String {
        let mut out = String::new();
        for (path, entry) in self.object("files").into_iter().flatten() {
            let sum = match entry {
                Value::Object(_) => member(entry, "sum").unwrap_or_default(),
                other => text(other),
            };
            push_line(&mut out, &format!("{path} {} {sum}", ownership(entry)));
        }
        out
    }

    fn directories(&self) -> String {
        let mut out = String::new();
        for (path, entry) in self.object("directories").into_iter().flatten() {
            push_line(&mut out, &format!("{path} {}", ownership(entry)));
        }
        out
    }
}

impl MetadataRecord for Manifest {
    fn get(&self, field: Field) -> Cow<'_, str> {
        Cow::Owned(self.render(field))
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn member(value: &Value, key: &str) -> Option<String> {
    value.get(key).map(text)
}

// "uname:gname:perm"; entries that are not objects carry no ownership.
fn ownership(entry: &Value) -> String {
    let part = |key| member(entry, key).unwrap_or_default();
    format!("{}:{}:{}", part("uname"), part("gname"), part("perm"))
}
