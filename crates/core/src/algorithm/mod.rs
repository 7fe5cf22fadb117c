//! Diff algorithms implementation
//!
//! Provides character-level diff algorithms and the cleanup passes that turn
//! a raw minimal edit script into readable variant runs. Algorithms work on
//! `char` slices so that positions never fall inside a multi-byte sequence.
pub mod cleanup;
pub mod lcs;
pub mod myers;

pub use lcs::LcsAlgorithm;
pub use myers::MyersAlgorithm;

use crate::diff::{DiffOp, EditType};

/// One run of a character-level edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub edit_type: EditType,
    pub text: Vec<char>,
}

impl Run {
    pub fn new(edit_type: EditType, text: &[char]) -> Self {
        Self {
            edit_type,
            text: text.to_vec(),
        }
    }

    pub fn equal(text: &[char]) -> Self {
        Self::new(EditType::Equal, text)
    }

    pub fn insert(text: &[char]) -> Self {
        Self::new(EditType::Insert, text)
    }

    pub fn delete(text: &[char]) -> Self {
        Self::new(EditType::Delete, text)
    }

    pub fn is_equal(&self) -> bool {
        self.edit_type == EditType::Equal
    }
}

impl From<Run> for DiffOp {
    fn from(run: Run) -> Self {
        DiffOp::new(run.edit_type, run.text.into_iter().collect::<String>())
    }
}

/// Trait for diff algorithms
pub trait DiffAlgorithm: Send + Sync {
    /// Compute an edit script turning `original` into `modified`
    ///
    /// The returned runs must reconstruct both inputs exactly; they need not
    /// be merged or cleaned up.
    fn compute(&self, original: &[char], modified: &[char]) -> Vec<Run>;
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Length of the common prefix of two sequences
pub(crate) fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of two sequences
pub(crate) fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is a prefix of `b`
pub(crate) fn common_overlap(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let length = a.len().min(b.len());
    let a = &a[a.len() - length..];
    let b = &b[..length];
    if a == b {
        return length;
    }

    // Grow a candidate suffix of `a`, jumping ahead to wherever it next
    // occurs in `b`.
    let mut best = 0;
    let mut size = 1;
    loop {
        if size > length {
            return best;
        }
        let pattern = &a[length - size..];
        let Some(found) = find(b, pattern) else {
            return best;
        };
        size += found;
        if size > length {
            return best;
        }
        if found == 0 || a[length - size..] == b[..size] {
            best = size;
            size += 1;
        }
    }
}

/// Position of the first occurrence of `needle` in `haystack`
pub(crate) fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::diff::{source_text, target_text};

    pub fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    pub fn to_ops(runs: Vec<Run>) -> Vec<DiffOp> {
        runs.into_iter().map(DiffOp::from).collect()
    }

    pub fn assert_reconstructs(runs: Vec<Run>, from: &str, to: &str) {
        let ops = to_ops(runs);
        assert_eq!(source_text(&ops), from);
        assert_eq!(target_text(&ops), to);
    }

    #[test]
    fn test_common_prefix_and_suffix() {
        assert_eq!(common_prefix(&chars("deus est"), &chars("deus non")), 5);
        assert_eq!(common_suffix(&chars("quick fox"), &chars("brown fox")), 4);
        assert_eq!(common_prefix(&chars(""), &chars("abc")), 0);
    }

    #[test]
    fn test_common_overlap() {
        assert_eq!(common_overlap(&chars(""), &chars("abcd")), 0);
        assert_eq!(common_overlap(&chars("abc"), &chars("abcd")), 3);
        assert_eq!(common_overlap(&chars("123456"), &chars("abcd")), 0);
        assert_eq!(common_overlap(&chars("123456xxx"), &chars("xxxabcd")), 3);
        // Ligature-like characters must not be treated as equal.
        assert_eq!(common_overlap(&chars("fi"), &chars("\u{fb01}i")), 0);
    }

    #[test]
    fn test_find() {
        assert_eq!(find(&chars("lorem ipsum"), &chars("ipsum")), Some(6));
        assert_eq!(find(&chars("lorem"), &chars("dolor")), None);
        assert_eq!(find(&chars("ab"), &chars("abc")), None);
    }
}
