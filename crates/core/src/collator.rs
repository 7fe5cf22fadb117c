//! Pairwise collation of one witness against the base

use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::config::Correspondence;
use crate::diff::{DiffOp, UnitVariants};
use crate::engine::DiffEngine;
use crate::error::{CollationError, Result};
use crate::scheduler::Scheduler;
use crate::witness::Witness;

/// The diff of one base unit against its counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitCollation {
    /// Identifier of the base unit
    pub id: String,
    /// 0-based position in the base
    pub ordinal: usize,
    /// Full edit script, base to other
    pub ops: Vec<DiffOp>,
    /// Non-trivial additions and deletions
    pub variants: UnitVariants,
}

/// Every unit of one non-base witness compared against the base
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairwiseCollation {
    pub base_name: String,
    pub base_label: String,
    pub witness_name: String,
    pub witness_label: String,
    /// One entry per base unit, in base order
    pub units: Vec<UnitCollation>,
}

impl PairwiseCollation {
    /// Number of units carrying at least one variant
    pub fn variant_count(&self) -> usize {
        self.units.iter().filter(|u| !u.variants.is_empty()).count()
    }
}

/// Compares witnesses against a base using a shared engine and worker pool
pub struct PairwiseCollator<'a> {
    engine: &'a DiffEngine,
    scheduler: &'a Scheduler,
    correspondence: Correspondence,
}

impl<'a> PairwiseCollator<'a> {
    pub fn new(engine: &'a DiffEngine, scheduler: &'a Scheduler) -> Self {
        Self {
            engine,
            scheduler,
            correspondence: Correspondence::default(),
        }
    }

    /// Set how units of the other witness are matched to base units
    pub fn with_correspondence(mut self, correspondence: Correspondence) -> Self {
        self.correspondence = correspondence;
        self
    }

    /// Diff every unit of `base` against the matching unit of `other`.
    ///
    /// Per-unit failures do not stop the batch; they are reported together
    /// as [`CollationError::UnitFailures`] once every unit has run.
    pub fn collate(&self, base: &Witness, other: &Witness) -> Result<PairwiseCollation> {
        let _span = info_span!("collate", base = base.name(), witness = other.name()).entered();

        let ids: Vec<&str> = base.ids().collect();
        let units = self
            .scheduler
            .run_all(&ids, |ordinal, id| {
                let from = base.lookup_by_ordinal(ordinal)?;
                let to = match self.correspondence {
                    Correspondence::Positional => other.lookup_by_ordinal(ordinal)?,
                    Correspondence::Identifier => other.lookup_by_id(id)?,
                };

                let ops = self.engine.diff(from, to);
                let variants = UnitVariants::from_ops(&ops);
                debug!(unit = id, %variants, "unit collated");

                Ok(UnitCollation {
                    id: id.to_string(),
                    ordinal,
                    ops,
                    variants,
                })
            })
            .map_err(|failures| CollationError::UnitFailures {
                base: base.name().to_string(),
                witness: other.name().to_string(),
                failures,
            })?;

        let collation = PairwiseCollation {
            base_name: base.name().to_string(),
            base_label: base.label().to_string(),
            witness_name: other.name().to_string(),
            witness_label: other.label().to_string(),
            units,
        };

        info!(
            units = collation.units.len(),
            with_variants = collation.variant_count(),
            "witness collated"
        );
        Ok(collation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(name: &str, units: &[(&str, &str)]) -> Witness {
        Witness::build(name, format!("#{name}"), units.iter().copied()).unwrap()
    }

    #[test]
    fn test_positional_collation() {
        let engine = DiffEngine::default();
        let scheduler = Scheduler::new(Some(2)).unwrap();
        let base = witness("a", &[("p1", "deus est bonus"), ("p2", "mundus")]);
        let other = witness("b", &[("x1", "deus non est bonus"), ("x2", "mundus")]);

        let collation = PairwiseCollator::new(&engine, &scheduler)
            .collate(&base, &other)
            .unwrap();

        assert_eq!(collation.witness_label, "#b");
        assert_eq!(collation.units.len(), 2);
        assert_eq!(collation.units[0].id, "p1");
        assert_eq!(collation.units[0].variants.additions, vec!["non"]);
        assert!(collation.units[1].variants.is_empty());
        assert_eq!(collation.variant_count(), 1);
    }

    #[test]
    fn test_identifier_collation_follows_ids() {
        let engine = DiffEngine::default();
        let scheduler = Scheduler::new(Some(2)).unwrap();
        let base = witness("a", &[("p1", "alpha"), ("p2", "beta")]);
        let other = witness("b", &[("p2", "beta"), ("p1", "alpha")]);

        let collation = PairwiseCollator::new(&engine, &scheduler)
            .with_correspondence(Correspondence::Identifier)
            .collate(&base, &other)
            .unwrap();

        assert!(collation.units.iter().all(|u| u.variants.is_empty()));
    }

    #[test]
    fn test_identifier_collation_reports_missing_ids() {
        let engine = DiffEngine::default();
        let scheduler = Scheduler::new(Some(2)).unwrap();
        let base = witness("a", &[("p1", "alpha"), ("p2", "beta"), ("p3", "gamma")]);
        let other = witness("b", &[("p1", "alpha"), ("q2", "beta"), ("q3", "gamma")]);

        let err = PairwiseCollator::new(&engine, &scheduler)
            .with_correspondence(Correspondence::Identifier)
            .collate(&base, &other)
            .unwrap_err();

        match err {
            CollationError::UnitFailures { witness, failures, .. } => {
                assert_eq!(witness, "b");
                let ids: Vec<&str> = failures.iter().map(|f| f.id.as_str()).collect();
                assert_eq!(ids, vec!["p2", "p3"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
