//! Configuration for a collation run
//!
//! Every setting the engine, loader and renderers consult lives in
//! [`CollationConfig`]. It is built in code with the `with_*` methods or read
//! from a TOML file; missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollationError, Result};

/// Diff algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers O(ND) algorithm (default)
    #[default]
    Myers,
    /// LCS-based algorithm; quadratic time, linear memory
    Lcs,
}

/// How units of a non-base witness are matched to base units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correspondence {
    /// Unit `i` of the base against unit `i` of the other witness
    #[default]
    Positional,
    /// Base unit identifier looked up in the other witness
    Identifier,
}

/// Report formats that can be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Plain-text report (`output.txt`)
    Text,
    /// HTML report with inline highlighting (`output.html`)
    Hypertext,
    /// Machine-readable report (`output.json`)
    Json,
}

impl OutputMode {
    /// File name the renderer for this mode writes to
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Text => "output.txt",
            Self::Hypertext => "output.html",
            Self::Json => "output.json",
        }
    }
}

/// Configuration for a collation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollationConfig {
    /// Name of the witness every other witness is compared against.
    /// `None` picks the first witness in sorted order.
    pub base_witness: Option<String>,

    /// Reports to produce
    pub output_modes: Vec<OutputMode>,

    /// Only elements whose `xml:id` starts with this prefix are units
    pub required_id_prefix: String,

    /// Extension (without the dot) of source documents during discovery
    pub file_extension: String,

    /// Replace `. , : ;` with spaces during normalization
    pub strip_punctuation: bool,

    /// Worker threads for per-unit diffing; `None` uses available parallelism
    pub workers: Option<usize>,

    /// Unit matching strategy
    pub correspondence: Correspondence,

    /// Algorithm to use for computing diffs
    pub algorithm: DiffAlgorithm,

    /// Run the semantic cleanup pass over each diff
    pub semantic_cleanup: bool,
}

impl Default for CollationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CollationConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            base_witness: None,
            output_modes: vec![OutputMode::Text, OutputMode::Hypertext],
            required_id_prefix: String::new(),
            file_extension: "xml".to_string(),
            strip_punctuation: true,
            workers: None,
            correspondence: Correspondence::default(),
            algorithm: DiffAlgorithm::default(),
            semantic_cleanup: true,
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| CollationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CollationError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Reject settings no run could satisfy
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(CollationError::Config("`workers` must be at least 1".to_string()));
        }
        if self.output_modes.is_empty() {
            return Err(CollationError::Config(
                "`output_modes` must name at least one mode".to_string(),
            ));
        }
        if self.file_extension.is_empty() {
            return Err(CollationError::Config("`file_extension` must not be empty".to_string()));
        }
        Ok(())
    }

    /// Set the base witness
    pub fn with_base_witness(mut self, name: impl Into<String>) -> Self {
        self.base_witness = Some(name.into());
        self
    }

    /// Set the report formats
    pub fn with_output_modes(mut self, modes: impl IntoIterator<Item = OutputMode>) -> Self {
        self.output_modes = modes.into_iter().collect();
        self
    }

    /// Set the required identifier prefix
    pub fn with_required_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.required_id_prefix = prefix.into();
        self
    }

    /// Set the source document extension
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set whether sentence punctuation is stripped
    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    /// Set the number of worker threads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the unit matching strategy
    pub fn with_correspondence(mut self, correspondence: Correspondence) -> Self {
        self.correspondence = correspondence;
        self
    }

    /// Set the diff algorithm
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Enable or disable the semantic cleanup pass
    pub fn with_semantic_cleanup(mut self, enable: bool) -> Self {
        self.semantic_cleanup = enable;
        self
    }
}
