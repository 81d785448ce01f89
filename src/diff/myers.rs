// Shortest-edit-script search (E. Myers, "An O(ND) Difference Algorithm and
// Its Variations", 1986), linear-space variant.
//
// Common prefix and suffix are matched off first. The remaining block is
// split at a "middle snake": forward and backward searches run towards each
// other, one edit at a time, and the first diagonal on which they overlap
// lies on a shortest path. Both halves are then solved the same way. Working
// memory is two frontier arrays sized by N + M, reused across the recursion;
// time stays O((N + M) * D).
//
// Ties: a DELETE step (from diagonal k - 1) is preferred over an INSERT step
// (from k + 1) when both reach equally far, and the builder emits the
// deletions of every changed block before its insertions. Output is
// therefore deterministic, and a changed line shows as DELETE then INSERT.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut, Range};

use log::trace;

use super::script::{EditOp, EditScript, ScriptBuilder};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Limits applied to one diff computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Give up once the edit distance is known to exceed this bound.
    /// `None` searches until the script is found.
    pub max_distance: Option<usize>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a diff computation. No partial script is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("out of working memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("edit distance exceeds limit of {limit}")]
    DistanceExceeded { limit: usize },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Shortest edit script between two sequences of comparable elements.
pub fn diff<'a, T: PartialEq>(
    left: &'a [T],
    right: &'a [T],
) -> Result<EditScript<'a, T>, DiffError> {
    diff_by(left, right, |a, b| a == b)
}

/// Shortest edit script using `eq` to compare elements.
pub fn diff_by<'a, T, F>(
    left: &'a [T],
    right: &'a [T],
    eq: F,
) -> Result<EditScript<'a, T>, DiffError>
where
    F: FnMut(&T, &T) -> bool,
{
    diff_with_options(left, right, eq, &DiffOptions::default())
}

/// Shortest edit script with explicit limits.
///
/// Returns an empty script when the sequences are element-wise equal.
pub fn diff_with_options<'a, T, F>(
    left: &'a [T],
    right: &'a [T],
    mut eq: F,
    opts: &DiffOptions,
) -> Result<EditScript<'a, T>, DiffError>
where
    F: FnMut(&T, &T) -> bool,
{
    let n = left.len();
    let m = right.len();
    let limit = opts.max_distance.unwrap_or(usize::MAX);

    let head = common_prefix(left, right, &mut eq);
    if head == n && head == m {
        trace!("shortest edit script: n={n} m={m} d=0");
        return Ok(EditScript::empty());
    }
    let tail = common_suffix(&left[head..], &right[head..], &mut eq);
    let a = head..n - tail;
    let b = head..m - tail;

    let mut search = Search::new(left, right, eq, a.len() + b.len())?;

    // The top-level split also yields the total distance, so the limit is
    // checked before any recursion.
    let split = if a.is_empty() || b.is_empty() {
        None
    } else {
        let rounds = limit.div_ceil(2).saturating_add(1);
        match search.middle_snake(a.clone(), b.clone(), rounds) {
            Some(snake) => Some(snake),
            None => return Err(DiffError::DistanceExceeded { limit }),
        }
    };
    let distance = split.map_or(a.len() + b.len(), |snake| snake.distance);
    if distance > limit {
        return Err(DiffError::DistanceExceeded { limit });
    }
    trace!("shortest edit script: n={n} m={m} d={distance}");

    search.out.push(EditOp::Match, 0, head)?;
    match split {
        Some(snake) => {
            search.conquer(a.start..snake.x, b.start..snake.y)?;
            search.conquer(snake.x..a.end, snake.y..b.end)?;
        }
        None => search.conquer(a, b)?,
    }
    search.out.push(EditOp::Match, n - tail, tail)?;
    Ok(search.out.finish()?)
}

// ---------------------------------------------------------------------------
// Search state
// ---------------------------------------------------------------------------

// Furthest-reaching x per diagonal, indexed by signed diagonal k.
struct Frontier {
    offset: isize,
    v: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Result<Self, TryReserveError> {
        let len = 2 * max_d + 2;
        let mut v = Vec::new();
        v.try_reserve_exact(len)?;
        v.resize(len, 0);
        Ok(Self {
            offset: max_d as isize,
            v,
        })
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

// Split point on a shortest path through a block, in absolute indices.
#[derive(Debug, Clone, Copy)]
struct Snake {
    x: usize,
    y: usize,
    distance: usize,
}

struct Search<'a, T, F> {
    left: &'a [T],
    right: &'a [T],
    eq: F,
    forward: Frontier,
    backward: Frontier,
    out: ScriptBuilder<'a, T>,
}

impl<'a, T, F> Search<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    // `span` bounds N + M of every block the search will see.
    fn new(
        left: &'a [T],
        right: &'a [T],
        eq: F,
        span: usize,
    ) -> Result<Self, TryReserveError> {
        let max_d = max_rounds(span);
        Ok(Self {
            left,
            right,
            eq,
            forward: Frontier::new(max_d)?,
            backward: Frontier::new(max_d)?,
            out: ScriptBuilder::new(left, right),
        })
    }

    // Emit a shortest script for left[a] against right[b].
    fn conquer(&mut self, a: Range<usize>, b: Range<usize>) -> Result<(), TryReserveError> {
        let head = common_prefix(&self.left[a.clone()], &self.right[b.clone()], &mut self.eq);
        self.out.push(EditOp::Match, a.start, head)?;
        let (a0, b0) = (a.start + head, b.start + head);
        let tail = common_suffix(&self.left[a0..a.end], &self.right[b0..b.end], &mut self.eq);
        let (a1, b1) = (a.end - tail, b.end - tail);

        if a0 == a1 {
            self.out.push(EditOp::Insert, b0, b1 - b0)?;
        } else if b0 == b1 {
            self.out.push(EditOp::Delete, a0, a1 - a0)?;
        } else if let Some(snake) = self.middle_snake(a0..a1, b0..b1, usize::MAX) {
            self.conquer(a0..snake.x, b0..snake.y)?;
            self.conquer(snake.x..a1, snake.y..b1)?;
        } else {
            self.out.push(EditOp::Delete, a0, a1 - a0)?;
            self.out.push(EditOp::Insert, b0, b1 - b0)?;
        }

        self.out.push(EditOp::Match, a1, tail)
    }

    // Find where a shortest path crosses the middle of a block whose ends
    // do not match. Gives up after `rounds` rounds (each round is one edit
    // on both sides).
    fn middle_snake(
        &mut self,
        a: Range<usize>,
        b: Range<usize>,
        rounds: usize,
    ) -> Option<Snake> {
        let n = a.len();
        let m = b.len();
        let delta = n as isize - m as isize;
        let odd = delta & 1 != 0;

        self.forward[1] = 0;
        self.backward[1] = 0;

        let rounds = max_rounds(n + m).min(rounds);
        for d in 0..rounds as isize {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let y = (x as isize - k) as usize;
                let (x0, y0) = (x, y);
                if x < n && y < m {
                    x += common_prefix(
                        &self.left[a.start + x..a.end],
                        &self.right[b.start + y..b.end],
                        &mut self.eq,
                    );
                }
                self.forward[k] = x;

                if odd && (k - delta).abs() < d && x + self.backward[delta - k] >= n {
                    return Some(Snake {
                        x: a.start + x0,
                        y: b.start + y0,
                        distance: 2 * d as usize - 1,
                    });
                }
            }

            // Same walk on the reversed block: x and y count from the end.
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1]) {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let mut y = (x as isize - k) as usize;
                if x < n && y < m {
                    let run = common_suffix(
                        &self.left[a.start..a.end - x],
                        &self.right[b.start..b.end - y],
                        &mut self.eq,
                    );
                    x += run;
                    y += run;
                }
                self.backward[k] = x;

                if !odd && (k - delta).abs() <= d && x + self.forward[delta - k] >= n {
                    return Some(Snake {
                        x: a.end - x,
                        y: b.end - y,
                        distance: 2 * d as usize,
                    });
                }
            }
        }

        None
    }
}

// Rounds needed to meet in the middle of a block with `span` = N + M.
fn max_rounds(span: usize) -> usize {
    span.div_ceil(2) + 1
}

fn common_prefix<T, F>(left: &[T], right: &[T], eq: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    left.iter().zip(right).take_while(|&(x, y)| eq(x, y)).count()
}

fn common_suffix<T, F>(left: &[T], right: &[T], eq: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    left.iter()
        .rev()
        .zip(right.iter().rev())
        .take_while(|&(x, y)| eq(x, y))
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
