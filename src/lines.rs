// Line tokenizer.
//
// Splits a text blob into borrowed line spans. Nothing is copied: every
// `LineRef` points back into the blob it was cut from.

use std::fmt;

/// A borrowed view of one line (without its `\n`) inside a text blob.
#[derive(Clone, Copy)]
pub struct LineRef<'a> {
    blob: &'a str,
    offset: usize,
    len: usize,
}

impl<'a> LineRef<'a> {
    /// Byte offset of the line inside its blob.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the line in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The line's text.
    pub fn as_str(&self) -> &'a str {
        &self.blob[self.offset..self.offset + self.len]
    }
}

// Lines are equal when their bytes are; lengths are compared first, so lines
// of different length never have their content inspected.
impl PartialEq for LineRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_str().as_bytes() == other.as_str().as_bytes()
    }
}

impl Eq for LineRef<'_> {}

impl fmt::Debug for LineRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for LineRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Iterator over the lines of a blob. See [`tokenize`] for the splitting rules.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    blob: &'a str,
    pos: usize,
    end: usize,
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rest = &self.blob.as_bytes()[self.pos..self.end];
        let len = match rest.iter().position(|&b| b == b'\n') {
            Some(n) => n,
            None => {
                self.done = true;
                rest.len()
            }
        };
        let line = LineRef {
            blob: self.blob,
            offset: self.pos,
            len,
        };
        self.pos += len + 1;
        Some(line)
    }
}

/// Iterate the lines of `text` lazily.
pub fn lines(text: &str) -> Lines<'_> {
    let end = text.strip_suffix('\n').map_or(text.len(), str::len);
    Lines {
        blob: text,
        pos: 0,
        end,
        done: false,
    }
}

/// Split `text` into lines on `\n`.
///
/// The newline is not part of any line, and one trailing newline does not
/// start an extra empty line. The empty string yields a single empty line,
/// so `""` and `"\n"` tokenize identically.
pub fn tokenize(text: &str) -> Vec<LineRef<'_>> {
    lines(text).collect()
}
