//! Property tests for the semantic differ.
//!
//! Inputs are drawn from a small alphabet (with a few multi-byte letters) so
//! that generated pairs share plenty of common runs.

use collator_core::diff::{source_text, target_text};
use collator_core::{DiffAlgorithm, DiffEngine, EditType, UnitVariants};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', ' ', 'æ', 'Q', '.', '\n']), 0..40)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equal and deleted runs rebuild the folded source; equal and inserted
    /// runs rebuild the folded target.
    #[test]
    fn diff_round_trips(from in text(), to in text()) {
        let ops = DiffEngine::default().diff(&from, &to);
        prop_assert_eq!(source_text(&ops), from.to_lowercase());
        prop_assert_eq!(target_text(&ops), to.to_lowercase());
    }

    #[test]
    fn lcs_round_trips(from in text(), to in text()) {
        let ops = DiffEngine::new(DiffAlgorithm::Lcs).diff(&from, &to);
        prop_assert_eq!(source_text(&ops), from.to_lowercase());
        prop_assert_eq!(target_text(&ops), to.to_lowercase());
    }

    #[test]
    fn diff_is_deterministic(from in text(), to in text()) {
        let engine = DiffEngine::default();
        prop_assert_eq!(engine.diff(&from, &to), engine.diff(&from, &to));
    }

    #[test]
    fn identical_inputs_have_no_variants(text in text()) {
        let engine = DiffEngine::default();
        let ops = engine.diff(&text, &text.to_uppercase());
        prop_assert!(ops.iter().all(|op| op.edit_type == EditType::Equal));
        prop_assert!(engine.variants(&text, &text).is_empty());
    }

    #[test]
    fn diff_has_no_empty_runs(from in text(), to in text()) {
        let ops = DiffEngine::default().diff(&from, &to);
        prop_assert!(ops.iter().all(|op| !op.text.is_empty()));
    }

    #[test]
    fn diff_has_no_adjacent_same_kind_runs(from in text(), to in text()) {
        let ops = DiffEngine::default().diff(&from, &to);
        prop_assert!(ops.windows(2).all(|w| w[0].edit_type != w[1].edit_type));
    }

    #[test]
    fn variants_are_trimmed_and_non_empty(from in text(), to in text()) {
        let variants = UnitVariants::from_ops(&DiffEngine::default().diff(&from, &to));
        for change in variants.additions.iter().chain(&variants.deletions) {
            prop_assert!(!change.is_empty());
            prop_assert_eq!(change.trim(), change.as_str());
        }
    }
}
