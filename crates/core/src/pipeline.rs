//! Text normalization pipeline
//!
//! Chains normalizers so that markup-free text can be brought into the form
//! the differ compares.

use crate::normalizers::{Lowercase, Normalizer, RemovePunctuation, WhitespaceNormalizer};

/// A pipeline of text normalizers applied in order
#[derive(Default, Clone)]
pub struct TextPipeline {
    /// Ordered list of normalizers to apply
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// The cleanup applied to every unit after markup removal: optional
    /// sentence punctuation stripping, then whitespace collapsing and trimming.
    pub fn unit_cleanup(strip_punctuation: bool) -> Self {
        let pipeline = if strip_punctuation {
            Self::new().add_normalizer(Box::new(RemovePunctuation::sentence()))
        } else {
            Self::new()
        };
        pipeline.add_normalizer(Box::new(WhitespaceNormalizer::new().with_trim(true)))
    }

    /// Case folding used before comparison
    pub fn case_folding() -> Self {
        Self::new().add_normalizer(Box::new(Lowercase))
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Process text through the entire pipeline
    pub fn process(&self, input: &str) -> String {
        let mut current = input.to_string();
        for normalizer in &self.normalizers {
            current = normalizer.normalize(&current);
        }
        current
    }

    /// Get the number of normalizers in the pipeline
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}
