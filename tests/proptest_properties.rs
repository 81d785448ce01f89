use std::collections::HashSet;

use pkgdiff::catalog::{self, Field};
use pkgdiff::diff::{self, EditOp};
use pkgdiff::lines::tokenize;
use proptest::prelude::*;

// Length of the longest common subsequence, by dynamic programming.
fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut prev = 0;
        for (j, y) in b.iter().enumerate() {
            let keep = row[j + 1];
            row[j + 1] = if x == y {
                prev + 1
            } else {
                row[j + 1].max(row[j])
            };
            prev = keep;
        }
    }
    row[b.len()]
}

// Small alphabet so that sequences share elements.
fn seq() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 0..40)
}

// Texts without a trailing newline; the tokenizer drops one.
fn text() -> impl Strategy<Value = String> {
    let part = prop_oneof![Just(""), Just("a"), Just("b"), Just("ab"), Just("ünï")];
    proptest::collection::vec(part, 0..12)
        .prop_map(|parts| parts.join("\n"))
        .prop_filter("trailing newline", |t| !t.ends_with('\n'))
}

proptest! {
    #[test]
    fn prop_script_reconstructs_both_sides(a in seq(), b in seq()) {
        let script = diff::diff(&a, &b).unwrap();
        if !script.is_empty() {
            prop_assert_eq!(script.left().copied().collect::<Vec<_>>(), a.clone());
            prop_assert_eq!(script.right().copied().collect::<Vec<_>>(), b.clone());
        } else {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_script_is_minimal(a in seq(), b in seq()) {
        let script = diff::diff(&a, &b).unwrap();
        prop_assert_eq!(script.distance(), a.len() + b.len() - 2 * lcs_len(&a, &b));
    }

    #[test]
    fn prop_groups_are_coalesced(a in seq(), b in seq()) {
        let script = diff::diff(&a, &b).unwrap();
        for pair in script.groups().windows(2) {
            prop_assert_ne!(pair[0].op, pair[1].op);
        }
        for group in script.groups() {
            prop_assert!(!group.items.is_empty());
        }
    }

    #[test]
    fn prop_diff_is_reflexive(a in seq()) {
        prop_assert!(diff::diff(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn prop_diff_is_deterministic(a in seq(), b in seq()) {
        let first: Vec<(EditOp, Vec<u8>)> = diff::diff(&a, &b)
            .unwrap()
            .iter()
            .map(|g| (g.op, g.items.to_vec()))
            .collect();
        let second: Vec<(EditOp, Vec<u8>)> = diff::diff(&a, &b)
            .unwrap()
            .iter()
            .map(|g| (g.op, g.items.to_vec()))
            .collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_tokenize_roundtrip(t in text()) {
        let joined = tokenize(&t)
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(joined, t);
    }

    #[test]
    fn prop_trailing_newline_is_ignored(t in text()) {
        let with_newline = format!("{t}\n");
        prop_assert_eq!(tokenize(&with_newline), tokenize(&t));
    }

    #[test]
    fn prop_line_diff_reconstructs_text(a in text(), b in text()) {
        let la = tokenize(&a);
        let lb = tokenize(&b);
        let script = diff::diff(&la, &lb).unwrap();
        if !script.is_empty() {
            let left: Vec<&str> = script.left().map(|l| l.as_str()).collect();
            prop_assert_eq!(left.join("\n"), a.as_str());
            let right: Vec<&str> = script.right().map(|l| l.as_str()).collect();
            prop_assert_eq!(right.join("\n"), b.as_str());
        }
    }

    #[test]
    fn prop_select_removes_exactly_catalog_members(
        picks in proptest::collection::vec(0usize..25, 0..10)
    ) {
        // Indices past the catalog stand for unknown names.
        let exclusions: HashSet<String> = picks
            .iter()
            .map(|&i| Field::ALL.get(i).map_or(format!("unknown{i}"), |f| f.as_str().to_string()))
            .collect();
        let selected = catalog::select(&exclusions);
        for field in Field::ALL {
            prop_assert_eq!(
                selected.contains(field),
                !exclusions.contains(field.as_str())
            );
        }
        // Catalog order is kept.
        prop_assert!(selected.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(catalog::select(&exclusions), selected);
    }
}
