//! TEI markup normalizer
//!
//! Reduces the markup of one unit to plain text through a fixed rule table
//! keyed by element name, then runs the unit cleanup pipeline (punctuation,
//! whitespace). Comments and processing instructions never contribute text.

use roxmltree::{Document, Node};

use crate::error::{CollationError, Result};
use crate::pipeline::TextPipeline;

/// What happens to an element and its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupRule {
    /// Drop the tag, keep its text
    Unwrap,
    /// Drop the tag and everything inside it
    Delete,
    /// Replace the element with a fixed token
    Replace(&'static str),
    /// Keep the text between an opening and a closing mark
    Bracket(&'static str, &'static str),
    /// Keep exactly one branch of an alternative reading
    Choice,
}

/// Element name to rule; anything not listed is unwrapped.
pub const RULES: &[(&str, MarkupRule)] = &[
    ("choice", MarkupRule::Choice),
    ("note", MarkupRule::Delete),
    ("space", MarkupRule::Delete),
    ("bibl", MarkupRule::Delete),
    ("gap", MarkupRule::Replace("¿…¿")),
    ("quote", MarkupRule::Bracket("“", "”")),
    ("mentioned", MarkupRule::Bracket("‘", "’")),
    ("unclear", MarkupRule::Bracket("¿", "¿")),
    ("add", MarkupRule::Bracket("+", "+")),
    ("del", MarkupRule::Bracket("-", "-")),
    ("lb", MarkupRule::Unwrap),
    ("cb", MarkupRule::Unwrap),
    ("pb", MarkupRule::Unwrap),
    ("title", MarkupRule::Unwrap),
    ("name", MarkupRule::Unwrap),
    ("g", MarkupRule::Unwrap),
    ("c", MarkupRule::Unwrap),
    ("corr", MarkupRule::Unwrap),
    ("sic", MarkupRule::Unwrap),
    ("ref", MarkupRule::Unwrap),
    ("pc", MarkupRule::Unwrap),
    ("hi", MarkupRule::Unwrap),
    ("subst", MarkupRule::Unwrap),
    ("seg", MarkupRule::Unwrap),
    ("cit", MarkupRule::Unwrap),
];

/// Preferred and discarded branch of each accepted `choice` shape
const CHOICE_BRANCHES: &[(&str, &str)] = &[("reg", "orig"), ("expan", "abbr"), ("corr", "sic")];

/// Look up the rule for an element name
pub fn rule_for(name: &str) -> MarkupRule {
    RULES
        .iter()
        .find(|(tag, _)| *tag == name)
        .map(|(_, rule)| *rule)
        .unwrap_or(MarkupRule::Unwrap)
}

/// Turns unit markup into normalized plain text
#[derive(Clone)]
pub struct TeiNormalizer {
    cleanup: TextPipeline,
}

impl Default for TeiNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TeiNormalizer {
    /// Create a normalizer that strips sentence punctuation
    pub fn new() -> Self {
        Self::with_strip_punctuation(true)
    }

    pub fn with_strip_punctuation(strip: bool) -> Self {
        Self {
            cleanup: TextPipeline::unit_cleanup(strip),
        }
    }

    /// Normalize the content of a unit element
    pub fn normalize(&self, node: Node<'_, '_>, unit_id: &str) -> Result<String> {
        let mut raw = String::new();
        for child in node.children() {
            render(child, unit_id, &mut raw)?;
        }
        Ok(self.cleanup.process(&raw))
    }

    /// Parse a standalone XML fragment and normalize its root element
    pub fn normalize_fragment(&self, markup: &str, unit_id: &str) -> Result<String> {
        let doc = Document::parse(markup).map_err(|e| CollationError::Normalization {
            unit: unit_id.to_string(),
            reason: e.to_string(),
        })?;
        self.normalize(doc.root_element(), unit_id)
    }
}

fn render(node: Node<'_, '_>, unit_id: &str, out: &mut String) -> Result<()> {
    if node.is_text() {
        out.push_str(node.text().unwrap_or_default());
        return Ok(());
    }
    if !node.is_element() {
        // comments, processing instructions
        return Ok(());
    }

    match rule_for(node.tag_name().name()) {
        MarkupRule::Unwrap => render_children(node, unit_id, out)?,
        MarkupRule::Delete => {}
        MarkupRule::Replace(token) => out.push_str(token),
        MarkupRule::Bracket(open, close) => {
            out.push_str(open);
            render_children(node, unit_id, out)?;
            out.push_str(close);
        }
        MarkupRule::Choice => {
            let branch = choose_branch(node).ok_or_else(|| CollationError::Normalization {
                unit: unit_id.to_string(),
                reason: format!(
                    "<choice> has none of the expected branches ({})",
                    CHOICE_BRANCHES
                        .iter()
                        .map(|(keep, drop)| format!("{keep}/{drop}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })?;
            render_children(branch, unit_id, out)?;
        }
    }
    Ok(())
}

fn render_children(node: Node<'_, '_>, unit_id: &str, out: &mut String) -> Result<()> {
    for child in node.children() {
        render(child, unit_id, out)?;
    }
    Ok(())
}

fn choose_branch<'a, 'input>(choice: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    CHOICE_BRANCHES.iter().find_map(|(keep, _)| {
        choice
            .children()
            .find(|child| child.is_element() && child.tag_name().name() == *keep)
    })
}
