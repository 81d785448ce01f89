// Reporting of per-field differences.
//
// A `Reporter` receives every differing field's edit script, in catalog
// order, while the comparison runs. Scripts borrow the field text, which is
// released as soon as the reporter returns; `FieldDiff` is the owned copy for
// callers that keep results around.

use std::io::{self, Write};

use crate::catalog::Field;
use crate::diff::{EditOp, EditScript};
use crate::lines::LineRef;

/// Edit script over the lines of one field.
pub type LineScript<'s, 'a> = EditScript<'s, LineRef<'a>>;

/// Receives one call per differing field.
///
/// Runs synchronously inside the comparison loop. An error aborts the
/// comparison and is returned from it.
pub trait Reporter {
    fn report(&mut self, field: Field, script: &LineScript<'_, '_>) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, field: Field, script: &LineScript<'_, '_>) -> io::Result<()> {
        (**self).report(field, script)
    }
}

// ---------------------------------------------------------------------------
// Unified text output
// ---------------------------------------------------------------------------

/// Writes each differing field as
///
/// ```text
/// --- version
/// +++ version
/// -1
/// +2
/// ```
///
/// with every line prefixed by its op symbol.
#[derive(Debug)]
pub struct UnifiedReporter<W: Write> {
    out: W,
}

impl<W: Write> UnifiedReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for UnifiedReporter<W> {
    fn report(&mut self, field: Field, script: &LineScript<'_, '_>) -> io::Result<()> {
        writeln!(self.out, "--- {field}\n+++ {field}")?;
        for group in script {
            let symbol = group.op.symbol();
            for line in group.items {
                writeln!(self.out, "{symbol}{line}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Owned results
// ---------------------------------------------------------------------------

/// Owned copy of one edit group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedGroup {
    pub op: EditOp,
    pub lines: Vec<String>,
}

/// Owned copy of one differing field's edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: Field,
    pub groups: Vec<OwnedGroup>,
}

impl FieldDiff {
    pub fn new(field: Field, script: &LineScript<'_, '_>) -> Self {
        let groups = script
            .iter()
            .map(|g| OwnedGroup {
                op: g.op,
                lines: g.items.iter().map(|l| l.as_str().to_string()).collect(),
            })
            .collect();
        Self { field, groups }
    }

    /// JSON form: `{"field": ..., "groups": [{"op": "-", "lines": [...]}]}`.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        let groups: Vec<_> = self
            .groups
            .iter()
            .map(|g| {
                serde_json::json!({
                    "op": g.op.symbol().to_string(),
                    "lines": g.lines,
                })
            })
            .collect();
        serde_json::json!({
            "field": self.field.as_str(),
            "groups": groups,
        })
    }
}

/// Collects owned copies of every reported field.
#[derive(Debug, Default)]
pub struct CollectReporter {
    pub diffs: Vec<FieldDiff>,
}

impl CollectReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected diffs as a JSON array.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.diffs.iter().map(FieldDiff::to_json).collect())
    }
}

impl Reporter for CollectReporter {
    fn report(&mut self, field: Field, script: &LineScript<'_, '_>) -> io::Result<()> {
        self.diffs.push(FieldDiff::new(field, script));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;
    use crate::lines::tokenize;

    #[test]
    fn unified_output_matches_classic_format() {
        let a = tokenize("foo\nbar\n");
        let b = tokenize("foo\nbaz\n");
        let script = diff::diff(&a, &b).unwrap();

        let mut r = UnifiedReporter::new(Vec::new());
        r.report(Field::Description, &script).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(out, "--- description\n+++ description\n foo\n-bar\n+baz\n");
    }

    #[test]
    fn collect_keeps_owned_copies() {
        let mut r = CollectReporter::new();
        {
            let a = String::from("1");
            let b = String::from("2");
            let (la, lb) = (tokenize(&a), tokenize(&b));
            let script = diff::diff(&la, &lb).unwrap();
            r.report(Field::Version, &script).unwrap();
        }
        assert_eq!(
            r.diffs,
            vec![FieldDiff {
                field: Field::Version,
                groups: vec![
                    OwnedGroup {
                        op: EditOp::Delete,
                        lines: vec!["1".into()],
                    },
                    OwnedGroup {
                        op: EditOp::Insert,
                        lines: vec!["2".into()],
                    },
                ],
            }]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_form() {
        let diff = FieldDiff {
            field: Field::Name,
            groups: vec![OwnedGroup {
                op: EditOp::Insert,
                lines: vec!["bar".into()],
            }],
        };
        assert_eq!(
            diff.to_json(),
            serde_json::json!({"field": "name", "groups": [{"op": "+", "lines": ["bar"]}]})
        );
    }

    struct Failing;

    impl Reporter for Failing {
        fn report(&mut self, _: Field, _: &LineScript<'_, '_>) -> io::Result<()> {
            Err(io::Error::other("sink closed"))
        }
    }

    fn report_once<R: Reporter>(mut r: R, script: &LineScript<'_, '_>) -> io::Result<()> {
        r.report(Field::Name, script)
    }

    #[test]
    fn reporter_errors_pass_through_mut_ref() {
        let a = tokenize("x");
        let b = tokenize("y");
        let script = diff::diff(&a, &b).unwrap();
        let mut failing = Failing;
        let err = report_once(&mut failing, &script).unwrap_err();
        assert_eq!(err.to_string(), "sink closed");
    }
}
