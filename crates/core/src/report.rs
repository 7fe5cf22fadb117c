//! Consolidated, paragraph-ordered collation report
//!
//! [`assemble`] folds the pairwise results of every non-base witness into one
//! [`CollationReport`]: a single entry per base unit, each listing what every
//! other witness adds or omits. Renderers consume this structure only.

use serde::Serialize;

use crate::collator::PairwiseCollation;
use crate::diff::DiffOp;
use crate::error::{CardinalityDivergence, CardinalityMismatch, CollationError, Result};
use crate::witness::Witness;

/// How one witness reads a base unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WitnessReading {
    /// Canonical label, e.g. `#sorb`
    pub label: String,
    /// Witness name (file stem)
    pub name: String,
    pub additions: Vec<String>,
    pub deletions: Vec<String>,
    /// Full edit script from the base text to this witness
    pub ops: Vec<DiffOp>,
}

impl WitnessReading {
    /// Check if this witness agrees with the base on the unit
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

/// One base unit and every reading of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub id: String,
    /// 1-based position in the base witness
    pub ordinal: usize,
    pub base_text: String,
    /// One reading per compared witness, in configured order
    pub readings: Vec<WitnessReading>,
}

/// The complete result of a collation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollationReport {
    pub base_name: String,
    pub base_label: String,
    pub entries: Vec<ReportEntry>,
}

impl CollationReport {
    /// Labels of the compared witnesses, in reading order
    pub fn witness_labels(&self) -> Vec<&str> {
        self.entries
            .first()
            .map(|e| e.readings.iter().map(|r| r.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Look up an entry by unit identifier
    pub fn entry(&self, id: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Merge pairwise collations into a report ordered by the base units.
///
/// Every collation must cover every base unit; otherwise this fails with
/// [`CollationError::StructuralMismatch`]. Witnesses without variants still
/// get a reading with empty lists.
pub fn assemble(base: &Witness, collations: &[PairwiseCollation]) -> Result<CollationReport> {
    let divergent: Vec<CardinalityDivergence> = collations
        .iter()
        .filter(|c| c.units.len() != base.len())
        .map(|c| CardinalityDivergence {
            witness: c.witness_name.clone(),
            expected: base.len(),
            actual: c.units.len(),
        })
        .collect();

    if !divergent.is_empty() {
        return Err(CollationError::StructuralMismatch(CardinalityMismatch {
            base: base.name().to_string(),
            base_len: base.len(),
            divergent,
        }));
    }

    let entries = base
        .units()
        .iter()
        .map(|unit| ReportEntry {
            id: unit.id.clone(),
            ordinal: unit.ordinal + 1,
            base_text: unit.text.clone(),
            readings: collations
                .iter()
                .map(|c| {
                    let collated = &c.units[unit.ordinal];
                    WitnessReading {
                        label: c.witness_label.clone(),
                        name: c.witness_name.clone(),
                        additions: collated.variants.additions.clone(),
                        deletions: collated.variants.deletions.clone(),
                        ops: collated.ops.clone(),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(CollationReport {
        base_name: base.name().to_string(),
        base_label: base.label().to_string(),
        entries,
    })
}
