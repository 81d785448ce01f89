// Comparison engine: ties field selection, tokenizing and diffing together.
//
// One `compare` call:
//   - opens both records (a failure aborts before any field is looked at)
//   - selects the catalog fields not excluded
//   - walks them in catalog order, either stopping at the first difference
//     (quiet mode, no reporter) or diffing and reporting every differing
//     field (detailed mode)
//
// Both records are dropped, and so released, on every return path.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::Path;

use log::{debug, trace};

use crate::catalog::{self, Field};
use crate::diff::{self, DiffError, DiffOptions};
use crate::lines;
use crate::provider::{MetadataProvider, MetadataRecord, ProviderError};
use crate::report::Reporter;

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

/// Configuration for one comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    /// Limits for each per-field diff (detailed mode only).
    pub diff: DiffOptions,
}

/// Result of a successful comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Differ,
}

impl Outcome {
    pub fn is_equal(self) -> bool {
        self == Self::Equal
    }
}

/// Which of the two compared records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Terminal failure of a comparison. There is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A record could not be opened; no field was compared.
    #[error("cannot open {side} package: {source}")]
    NotFound {
        side: Side,
        #[source]
        source: ProviderError,
    },
    /// The diff engine failed on `field`; later fields were not compared.
    #[error("diff of field '{field}' failed: {source}")]
    DiffFailure {
        field: Field,
        #[source]
        source: DiffError,
    },
    /// The reporter failed on `field`; later fields were not compared.
    #[error("reporting field '{field}' failed: {source}")]
    Report {
        field: Field,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compare the records at `first` and `second`, skipping `exclusions`.
///
/// Without a reporter only equality is decided, and the walk stops at the
/// first differing field. With one, every differing field is diffed and
/// reported in catalog order.
pub fn compare<P: MetadataProvider>(
    provider: &P,
    first: &Path,
    second: &Path,
    exclusions: &HashSet<String>,
    reporter: Option<&mut dyn Reporter>,
) -> Result<Outcome, CompareError> {
    compare_with_options(
        provider,
        first,
        second,
        exclusions,
        reporter,
        &CompareOptions::default(),
    )
}

/// Compare with custom options.
pub fn compare_with_options<P: MetadataProvider>(
    provider: &P,
    first: &Path,
    second: &Path,
    exclusions: &HashSet<String>,
    reporter: Option<&mut dyn Reporter>,
    opts: &CompareOptions,
) -> Result<Outcome, CompareError> {
    let left = provider
        .open(first)
        .map_err(|source| CompareError::NotFound {
            side: Side::First,
            source,
        })?;
    let right = provider
        .open(second)
        .map_err(|source| CompareError::NotFound {
            side: Side::Second,
            source,
        })?;

    let fields = catalog::select(exclusions);
    debug!(
        "comparing {} and {} over {} fields",
        first.display(),
        second.display(),
        fields.len()
    );

    let outcome = match reporter {
        None => compare_quiet(&left, &right, &fields),
        Some(reporter) => compare_detailed(&left, &right, &fields, reporter, &opts.diff)?,
    };

    debug!("outcome: {outcome:?}");
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Walks
// ---------------------------------------------------------------------------

// Raw text equality; the first difference decides the answer.
fn compare_quiet<R: MetadataRecord>(left: &R, right: &R, fields: &[Field]) -> Outcome {
    for &field in fields {
        if left.get(field) != right.get(field) {
            trace!("{field}: differs");
            return Outcome::Differ;
        }
        trace!("{field}: equal");
    }
    Outcome::Equal
}

// Every field is diffed; a difference never stops the walk.
fn compare_detailed<R: MetadataRecord>(
    left: &R,
    right: &R,
    fields: &[Field],
    reporter: &mut dyn Reporter,
    opts: &DiffOptions,
) -> Result<Outcome, CompareError> {
    let mut outcome = Outcome::Equal;

    for &field in fields {
        let a = left.get(field);
        let b = right.get(field);
        let a_lines = lines::tokenize(&a);
        let b_lines = lines::tokenize(&b);

        let script = diff::diff_with_options(&a_lines, &b_lines, |x, y| x == y, opts)
            .map_err(|source| CompareError::DiffFailure { field, source })?;
        if script.is_empty() {
            trace!("{field}: equal");
            continue;
        }

        trace!(
            "{field}: {} groups, distance {}",
            script.len(),
            script.distance()
        );
        outcome = Outcome::Differ;
        reporter
            .report(field, &script)
            .map_err(|source| CompareError::Report { field, source })?;
    }

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
