// Edit scripts.
//
// An edit script is an ordered list of groups. Each group is a run of
// consecutive elements sharing one operation, borrowed as a slice of the side
// it came from: MATCH and DELETE slices come from the left sequence, INSERT
// slices from the right one.

use std::collections::TryReserveError;
use std::fmt;

/// One edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    Match,
    Delete,
    Insert,
}

impl EditOp {
    /// Prefix character used by unified-style output.
    pub const fn symbol(self) -> char {
        match self {
            Self::Match => ' ',
            Self::Delete => '-',
            Self::Insert => '+',
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Match => "match",
            Self::Delete => "delete",
            Self::Insert => "insert",
        };
        f.write_str(name)
    }
}

/// A run of elements sharing one operation.
#[derive(Debug, PartialEq, Eq)]
pub struct EditGroup<'a, T> {
    pub op: EditOp,
    pub items: &'a [T],
}

// Derives would require `T: Clone`.
impl<T> Clone for EditGroup<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EditGroup<'_, T> {}

/// Ordered list of coalesced edit groups.
///
/// An empty script means the two sequences are element-wise equal.
#[derive(Debug, PartialEq, Eq)]
pub struct EditScript<'a, T> {
    groups: Vec<EditGroup<'a, T>>,
}

impl<'a, T> EditScript<'a, T> {
    pub(crate) fn from_groups(groups: Vec<EditGroup<'a, T>>) -> Self {
        Self { groups }
    }

    /// The script for two equal sequences.
    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[EditGroup<'a, T>] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditGroup<'a, T>> {
        self.groups.iter()
    }

    /// Number of deleted plus inserted elements.
    pub fn distance(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.op != EditOp::Match)
            .map(|g| g.items.len())
            .sum()
    }

    /// Elements of the left sequence covered by the script, in order.
    ///
    /// For a non-empty script this is the whole left sequence.
    pub fn left(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.side(EditOp::Delete)
    }

    /// Elements of the right sequence covered by the script, in order.
    ///
    /// For a non-empty script this is the whole right sequence.
    pub fn right(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.side(EditOp::Insert)
    }

    fn side(&self, own: EditOp) -> impl Iterator<Item = &'a T> + '_ {
        self.groups
            .iter()
            .filter(move |g| g.op == EditOp::Match || g.op == own)
            .flat_map(|g| g.items.iter())
    }
}

impl<'s, 'a, T> IntoIterator for &'s EditScript<'a, T> {
    type Item = &'s EditGroup<'a, T>;
    type IntoIter = std::slice::Iter<'s, EditGroup<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Accumulates runs of steps into coalesced groups.
///
/// Deletions and insertions between two matches are held back and emitted
/// as one DELETE group followed by one INSERT group, whatever order the
/// search produced them in.
pub(crate) struct ScriptBuilder<'a, T> {
    left: &'a [T],
    right: &'a [T],
    // (op, start, len) with start indexing the op's own side.
    runs: Vec<(EditOp, usize, usize)>,
    // Pending (start, len) blocks since the last match.
    deleted: (usize, usize),
    inserted: (usize, usize),
}

impl<'a, T> ScriptBuilder<'a, T> {
    pub(crate) fn new(left: &'a [T], right: &'a [T]) -> Self {
        Self {
            left,
            right,
            runs: Vec::new(),
            deleted: (0, 0),
            inserted: (0, 0),
        }
    }

    /// Record `len` steps of `op` starting at `start`, which is on the left
    /// side for MATCH/DELETE and on the right side for INSERT. Steps must
    /// arrive in forward order.
    pub(crate) fn push(
        &mut self,
        op: EditOp,
        start: usize,
        len: usize,
    ) -> Result<(), TryReserveError> {
        if len == 0 {
            return Ok(());
        }
        match op {
            EditOp::Delete => extend(&mut self.deleted, start, len),
            EditOp::Insert => extend(&mut self.inserted, start, len),
            EditOp::Match => {
                self.flush()?;
                self.append(EditOp::Match, start, len)?;
            }
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<EditScript<'a, T>, TryReserveError> {
        self.flush()?;
        let mut groups = Vec::new();
        groups.try_reserve_exact(self.runs.len())?;
        for (op, start, len) in self.runs {
            let side = if op == EditOp::Insert {
                self.right
            } else {
                self.left
            };
            groups.push(EditGroup {
                op,
                items: &side[start..start + len],
            });
        }
        Ok(EditScript::from_groups(groups))
    }

    fn flush(&mut self) -> Result<(), TryReserveError> {
        let (start, len) = std::mem::take(&mut self.deleted);
        self.append(EditOp::Delete, start, len)?;
        let (start, len) = std::mem::take(&mut self.inserted);
        self.append(EditOp::Insert, start, len)
    }

    fn append(
        &mut self,
        op: EditOp,
        start: usize,
        len: usize,
    ) -> Result<(), TryReserveError> {
        if len == 0 {
            return Ok(());
        }
        if let Some(last) = self.runs.last_mut()
            && last.0 == op
            && last.1 + last.2 == start
        {
            last.2 += len;
            return Ok(());
        }
        self.runs.try_reserve(1)?;
        self.runs.push((op, start, len));
        Ok(())
    }
}

// Between two matches each side advances only through its own block.
fn extend(block: &mut (usize, usize), start: usize, len: usize) {
    if block.1 == 0 {
        *block = (start, len);
    } else {
        debug_assert_eq!(block.0 + block.1, start);
        block.1 += len;
    }
}
