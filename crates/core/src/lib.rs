//! # Collator Library
//!
//! Aligns parallel paragraphs across several transcriptions ("witnesses") of
//! the same text and reports, unit by unit, how each witness differs from a
//! designated base witness.
//!
//! ## Core Concepts
//!
//! - **Witness**: an ordered list of identified units, built by the loader
//!   from a TEI document
//! - **DiffEngine**: case-folded character diff with semantic cleanup
//! - **PairwiseCollator**: diffs every unit of one witness against the base on
//!   a bounded worker pool
//! - **CollationReport**: the per-unit merge of all pairwise results, rendered
//!   as text, HTML or JSON
//!
//! ## Example
//!
//! ```rust
//! use collator_core::{collate_witnesses, CollationConfig, Witness};
//!
//! let base = Witness::build("a", "#A", [("p1", "deus est bonus")]).unwrap();
//! let other = Witness::build("b", "#B", [("p1", "deus non est bonus")]).unwrap();
//!
//! let report = collate_witnesses(&[base, other], &CollationConfig::default()).unwrap();
//! assert_eq!(report.entries[0].readings[0].additions, vec!["non"]);
//! ```

pub mod algorithm;
pub mod collator;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod loader;
pub mod normalizers;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod scheduler;
pub mod tei;
pub mod witness;

use std::path::Path;

use tracing::{info, info_span};

// Re-export main types
pub use collator::{PairwiseCollation, PairwiseCollator, UnitCollation};
pub use config::{CollationConfig, Correspondence, DiffAlgorithm, OutputMode};
pub use diff::{DiffOp, EditType, UnitVariants};
pub use engine::DiffEngine;
pub use error::{CollationError, Result};
pub use loader::WitnessLoader;
pub use pipeline::TextPipeline;
pub use render::write_reports;
pub use report::{CollationReport, ReportEntry, WitnessReading};
pub use scheduler::Scheduler;
pub use tei::TeiNormalizer;
pub use witness::{validate_cardinality, Unit, Witness};

/// Diff two strings with the engine a configuration describes
///
/// ```rust
/// use collator_core::{compute_diff, DiffOp};
///
/// let ops = compute_diff("Lorem ipsum", "lorem dolor", None);
/// assert_eq!(ops[0], DiffOp::equal("lorem "));
/// ```
pub fn compute_diff(from: &str, to: &str, config: Option<&CollationConfig>) -> Vec<DiffOp> {
    let engine = match config {
        Some(config) => DiffEngine::from_config(config),
        None => DiffEngine::default(),
    };
    engine.diff(from, to)
}

/// Collate every witness against the first one.
///
/// Unit counts are validated before any diff runs. Witness pairs are
/// processed one after the other; the units of each pair run in parallel.
pub fn collate_witnesses(witnesses: &[Witness], config: &CollationConfig) -> Result<CollationReport> {
    let _span = info_span!("collation", witnesses = witnesses.len()).entered();

    validate_cardinality(witnesses)?;
    let Some((base, others)) = witnesses.split_first() else {
        return Ok(CollationReport {
            base_name: String::new(),
            base_label: String::new(),
            entries: Vec::new(),
        });
    };

    let engine = DiffEngine::from_config(config);
    let scheduler = Scheduler::new(config.workers)?;
    let collator = PairwiseCollator::new(&engine, &scheduler).with_correspondence(config.correspondence);

    info!(
        base = base.name(),
        units = base.len(),
        workers = scheduler.workers(),
        "collating {} witness(es) against the base",
        others.len()
    );

    let collations = others
        .iter()
        .map(|other| collator.collate(base, other))
        .collect::<Result<Vec<_>>>()?;

    report::assemble(base, &collations)
}

/// Load every witness document in `dir` and collate them.
pub fn collate_directory(dir: impl AsRef<Path>, config: &CollationConfig) -> Result<CollationReport> {
    let witnesses = WitnessLoader::new(config).load_all(dir.as_ref())?;
    collate_witnesses(&witnesses, config)
}
