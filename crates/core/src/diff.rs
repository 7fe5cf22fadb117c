//! Diff result types and structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    /// Content was inserted
    Insert,
    /// Content was deleted
    Delete,
    /// Content remained unchanged
    Equal,
}

/// A single diff operation: one run of equal, inserted or deleted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    /// Type of operation
    pub edit_type: EditType,

    /// Payload text of the run
    pub text: String,
}

impl DiffOp {
    pub fn new(edit_type: EditType, text: impl Into<String>) -> Self {
        Self {
            edit_type,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(EditType::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(EditType::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(EditType::Delete, text)
    }
}

/// Reconstruct the "from" side of a diff (equal + deleted runs).
pub fn source_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.edit_type != EditType::Insert)
        .map(|op| op.text.as_str())
        .collect()
}

/// Reconstruct the "to" side of a diff (equal + inserted runs).
pub fn target_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.edit_type != EditType::Delete)
        .map(|op| op.text.as_str())
        .collect()
}

/// The user-facing variants of one unit pair
///
/// Only insertions and deletions whose trimmed payload is non-empty survive;
/// equalities and whitespace-only edits are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitVariants {
    /// Text present in the other witness but not in the base
    pub additions: Vec<String>,
    /// Text present in the base but not in the other witness
    pub deletions: Vec<String>,
}

impl UnitVariants {
    /// Reduce a diff to its non-trivial insertions and deletions
    pub fn from_ops(ops: &[DiffOp]) -> Self {
        let mut variants = Self::default();

        for op in ops {
            let change = op.text.trim();
            if change.is_empty() {
                continue;
            }
            match op.edit_type {
                EditType::Insert => variants.additions.push(change.to_string()),
                EditType::Delete => variants.deletions.push(change.to_string()),
                EditType::Equal => {}
            }
        }

        variants
    }

    /// Check if the pair carries no variant at all
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

impl fmt::Display for UnitVariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} addition(s), {} deletion(s)",
            self.additions.len(),
            self.deletions.len()
        )
    }
}
