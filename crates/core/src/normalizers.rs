//! Text normalizers
//!
//! Provides the `Normalizer` trait and the plain-text transformations applied
//! after markup has been reduced: case folding for comparison, punctuation
//! stripping, and whitespace collapsing.

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Get metadata about this normalizer (e.g., configuration)
    fn metadata(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

// Implement Clone for Box<dyn Normalizer>
impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Normalizers
// ============================================================================

/// Converts all text to lowercase
#[derive(Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Normalizes whitespace: converts tabs/newlines to spaces and collapses runs
#[derive(Clone)]
pub struct WhitespaceNormalizer {
    /// Whether to collapse multiple consecutive whitespaces into one
    pub collapse: bool,
    /// Whether to trim leading/trailing whitespace
    pub trim: bool,
}

impl Default for WhitespaceNormalizer {
    fn default() -> Self {
        Self {
            collapse: true,
            trim: false,
        }
    }
}

impl WhitespaceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, input: &str) -> String {
        let mut normalized = String::with_capacity(input.len());
        let mut in_whitespace = false;

        for ch in input.chars() {
            if ch.is_whitespace() {
                if !(self.collapse && in_whitespace) {
                    normalized.push(' ');
                }
                in_whitespace = true;
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }

        if self.trim {
            normalized.trim().to_string()
        } else {
            normalized
        }
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![
            ("collapse".to_string(), self.collapse.to_string()),
            ("trim".to_string(), self.trim.to_string()),
        ]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Replaces selected punctuation marks with a space
///
/// Run this before [`WhitespaceNormalizer`] so the inserted spaces collapse.
#[derive(Clone)]
pub struct RemovePunctuation {
    marks: Vec<char>,
}

impl RemovePunctuation {
    /// Sentence punctuation: `.`, `,`, `:` and `;`
    pub fn sentence() -> Self {
        Self::with_marks(['.', ',', ':', ';'])
    }

    pub fn with_marks(marks: impl IntoIterator<Item = char>) -> Self {
        Self {
            marks: marks.into_iter().collect(),
        }
    }
}

impl Default for RemovePunctuation {
    fn default() -> Self {
        Self::sentence()
    }
}

impl Normalizer for RemovePunctuation {
    fn normalize(&self, input: &str) -> String {
        input
            .chars()
            .map(|ch| if self.marks.contains(&ch) { ' ' } else { ch })
            .collect()
    }

    fn name(&self) -> &str {
        "remove_punctuation"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![("marks".to_string(), self.marks.iter().collect())]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}
