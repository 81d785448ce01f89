// Sequence diff engine.
//
// This module provides:
// - `myers`: generalized Myers shortest-edit-script search over any
//   element type, driven by a caller-supplied equality predicate
// - `script`: the edit script data model (ops, coalesced groups)

pub mod myers;
pub mod script;

pub use myers::{DiffError, DiffOptions, diff, diff_by, diff_with_options};
pub use script::{EditGroup, EditOp, EditScript};
