//! Semantic text differ
//!
//! [`DiffEngine`] orchestrates one unit comparison:
//! 1. Fold both texts to lower case
//! 2. Run the configured diff algorithm
//! 3. Merge the raw edit script
//! 4. Apply the semantic cleanup pass
//!
//! The engine holds no mutable state, so a single instance can be shared by
//! every worker of a batch.

use crate::algorithm::{cleanup, DiffAlgorithm as DiffAlgoTrait, LcsAlgorithm, MyersAlgorithm};
use crate::config::{CollationConfig, DiffAlgorithm};
use crate::diff::{DiffOp, UnitVariants};
use crate::pipeline::TextPipeline;

/// The main diff engine
pub struct DiffEngine {
    algorithm: Box<dyn DiffAlgoTrait>,
    pipeline: TextPipeline,
    semantic_cleanup: bool,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffAlgorithm::default())
    }
}

impl DiffEngine {
    /// Create a new diff engine using the given algorithm
    pub fn new(algorithm: DiffAlgorithm) -> Self {
        let algorithm: Box<dyn DiffAlgoTrait> = match algorithm {
            DiffAlgorithm::Myers => Box::new(MyersAlgorithm::new()),
            DiffAlgorithm::Lcs => Box::new(LcsAlgorithm::new()),
        };

        Self {
            algorithm,
            pipeline: TextPipeline::case_folding(),
            semantic_cleanup: true,
        }
    }

    /// Create a diff engine matching a run configuration
    pub fn from_config(config: &CollationConfig) -> Self {
        Self::new(config.algorithm).with_semantic_cleanup(config.semantic_cleanup)
    }

    /// Enable or disable the semantic cleanup pass
    pub fn with_semantic_cleanup(mut self, enable: bool) -> Self {
        self.semantic_cleanup = enable;
        self
    }

    /// Compute the diff between two strings
    ///
    /// Payloads are lower-cased: concatenating the equal and delete runs gives
    /// back the folded `from` text, equal and insert runs the folded `to` text.
    pub fn diff(&self, from: &str, to: &str) -> Vec<DiffOp> {
        let from: Vec<char> = self.pipeline.process(from).chars().collect();
        let to: Vec<char> = self.pipeline.process(to).chars().collect();

        let mut runs = self.algorithm.compute(&from, &to);
        cleanup::merge(&mut runs);
        if self.semantic_cleanup {
            cleanup::semantic(&mut runs);
        }

        runs.into_iter().map(DiffOp::from).collect()
    }

    /// Compute the diff and reduce it to user-facing variants
    pub fn variants(&self, from: &str, to: &str) -> UnitVariants {
        UnitVariants::from_ops(&self.diff(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{source_text, target_text, EditType};

    #[test]
    fn test_identical_texts_have_no_variants() {
        let engine = DiffEngine::default();
        assert!(engine.variants("Circa hoc quaeritur", "circa HOC quaeritur").is_empty());
        assert_eq!(
            engine.diff("Circa hoc", "circa hoc"),
            vec![DiffOp::equal("circa hoc")]
        );
    }

    #[test]
    fn test_inserted_word() {
        let variants = DiffEngine::default().variants("the quick fox", "the quick brown fox");
        assert_eq!(variants.additions, vec!["brown"]);
        assert!(variants.deletions.is_empty());
    }

    #[test]
    fn test_substitution_is_delete_plus_insert() {
        let ops = DiffEngine::default().diff("lorem ipsum", "lorem dolor");
        assert_eq!(
            ops,
            vec![
                DiffOp::equal("lorem "),
                DiffOp::delete("ipsum"),
                DiffOp::insert("dolor"),
            ]
        );
    }

    #[test]
    fn test_semantic_cleanup_reduces_fragmentation() {
        let engine = DiffEngine::default();
        let raw = DiffEngine::default().with_semantic_cleanup(false);

        let from = "utrum mundus sit aeternus";
        let to = "utrum motus fuerit aeternus";
        let cleaned = engine.diff(from, to);
        let fragmented = raw.diff(from, to);

        let edits = |ops: &[DiffOp]| ops.iter().filter(|op| op.edit_type != EditType::Equal).count();
        assert!(edits(&cleaned) < edits(&fragmented));
        assert_eq!(source_text(&cleaned), from);
        assert_eq!(target_text(&cleaned), to);
    }

    #[test]
    fn test_contiguous_insertion_is_one_variant() {
        let engine = DiffEngine::default();
        let ops = engine.diff("aabaa", "abaaab");

        assert!(ops.windows(2).all(|w| w[0].edit_type != w[1].edit_type));
        assert_eq!(source_text(&ops), "aabaa");
        assert_eq!(target_text(&ops), "abaaab");
        assert_eq!(engine.variants("aabaa", "abaaab").additions, vec!["ab"]);

        let ops = engine.diff("babaa", "abaaa ");
        assert!(ops.windows(2).all(|w| w[0].edit_type != w[1].edit_type));
    }

    #[test]
    fn test_round_trip_is_case_folded() {
        let ops = DiffEngine::default().diff("Deus Est", "DEUS non est");
        assert_eq!(source_text(&ops), "deus est");
        assert_eq!(target_text(&ops), "deus non est");
    }

    #[test]
    fn test_algorithms_agree_on_variants() {
        let myers = DiffEngine::new(DiffAlgorithm::Myers);
        let lcs = DiffEngine::new(DiffAlgorithm::Lcs);

        for (a, b) in [
            ("deus est bonus", "deus non est bonus"),
            ("lorem ipsum", "lorem dolor"),
        ] {
            assert_eq!(myers.variants(a, b), lcs.variants(a, b));
        }
    }

    #[test]
    fn test_deterministic() {
        let engine = DiffEngine::default();
        let a = "quod autem sit aliquid primum movens";
        let b = "quod enim sit aliquod primum mobile";
        assert_eq!(engine.diff(a, b), engine.diff(a, b));
    }
}
