//! pkgdiff: compare two package records field by field.
//!
//! The crate provides:
//! - A field catalog and selector (`catalog`)
//! - A zero-copy line tokenizer (`lines`)
//! - A generic Myers shortest-edit-script engine (`diff`)
//! - The comparison engine driving them (`engine`)
//! - Record sources (`provider`) and reporters (`report`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! use pkgdiff::catalog::Field;
//! use pkgdiff::engine::{self, Outcome};
//! use pkgdiff::provider::MemoryProvider;
//! use pkgdiff::report::CollectReporter;
//!
//! let provider = MemoryProvider::new()
//!     .with("a", [(Field::Name, "foo"), (Field::Version, "1")])
//!     .with("b", [(Field::Name, "foo"), (Field::Version, "2")]);
//!
//! let mut report = CollectReporter::new();
//! let outcome = engine::compare(
//!     &provider,
//!     Path::new("a"),
//!     Path::new("b"),
//!     &HashSet::new(),
//!     Some(&mut report),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome, Outcome::Differ);
//! assert_eq!(report.diffs[0].field, Field::Version);
//! ```

pub mod catalog;
pub mod diff;
pub mod engine;
pub mod lines;
pub mod provider;
pub mod report;

#[cfg(feature = "cli")]
pub mod cli;

pub use catalog::Field;
pub use engine::{CompareError, CompareOptions, Outcome, compare, compare_with_options};
