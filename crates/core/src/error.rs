//! Error types for the collation engine
//!
//! Every failure the engine can report is a variant of [`CollationError`].
//! Structural problems (unit count mismatches, unknown identifiers, malformed
//! markup) are fatal to the run; per-unit diff failures are collected by the
//! scheduler and surfaced together as [`CollationError::UnitFailures`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = CollationError> = std::result::Result<T, E>;

/// All errors produced while loading, collating or reporting witnesses.
#[derive(Debug, Error)]
pub enum CollationError {
    /// Witnesses disagree on their unit count.
    #[error("{0}")]
    StructuralMismatch(CardinalityMismatch),

    /// The same identifier occurs twice inside one witness.
    #[error("witness `{witness}` declares unit identifier `{id}` more than once")]
    DuplicateIdentifier { witness: String, id: String },

    /// An identifier has no counterpart in the given witness.
    #[error("unit identifier `{id}` not found in witness `{witness}`")]
    UnknownIdentifier { witness: String, id: String },

    /// A positional lookup past the end of a witness.
    #[error("ordinal {ordinal} is out of range for witness `{witness}` ({len} units)")]
    OrdinalOutOfRange {
        witness: String,
        ordinal: usize,
        len: usize,
    },

    /// Source markup could not be reduced to plain text.
    #[error("cannot normalize unit `{unit}`: {reason}")]
    Normalization { unit: String, reason: String },

    /// One or more per-unit diff jobs failed while collating a witness pair.
    #[error(
        "{} unit(s) failed while collating `{witness}` against `{base}`: {}",
        .failures.len(),
        join_failures(.failures)
    )]
    UnitFailures {
        base: String,
        witness: String,
        failures: Vec<UnitFailure>,
    },

    /// Discovery found nothing to collate.
    #[error("no witness documents with extension `.{extension}` found in {}", .dir.display())]
    NoWitnesses { dir: PathBuf, extension: String },

    /// The configured base witness is not among the loaded documents.
    #[error("base witness `{0}` is not among the loaded documents")]
    BaseWitnessNotFound(String),

    /// A source document lacks the `<witness xml:id="...">` declaration.
    #[error("{} does not declare a <witness xml:id=\"...\"> label", .path.display())]
    MissingWitnessLabel { path: PathBuf },

    /// A source document is not well-formed XML.
    #[error("failed to parse {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl CollationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One witness whose unit count differs from the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityDivergence {
    pub witness: String,
    pub expected: usize,
    pub actual: usize,
}

impl CardinalityDivergence {
    /// Signed difference `actual - expected`.
    pub fn delta(&self) -> i64 {
        self.actual as i64 - self.expected as i64
    }
}

/// Details for [`CollationError::StructuralMismatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityMismatch {
    /// Name of the witness every other count is compared against.
    pub base: String,
    /// Unit count of the base witness.
    pub base_len: usize,
    /// Every witness that diverges from the base count.
    pub divergent: Vec<CardinalityDivergence>,
}

impl fmt::Display for CardinalityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "witnesses do not have the same number of units: `{}` has {}",
            self.base, self.base_len
        )?;
        for d in &self.divergent {
            write!(f, "; `{}` has {} ({:+})", d.witness, d.actual, d.delta())?;
        }
        Ok(())
    }
}

/// A single failed unit inside a scheduled batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Identifier of the unit whose job failed.
    pub id: String,
    /// Position of the unit in the batch.
    pub ordinal: usize,
    /// Human-readable cause.
    pub reason: String,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (#{}): {}", self.id, self.ordinal, self.reason)
    }
}

fn join_failures(failures: &[UnitFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
