//! Source document discovery and loading
//!
//! A witness document is a TEI file. Its label comes from the first
//! `<witness xml:id="...">` declaration; its units are the outermost elements
//! outside `teiHeader` whose `xml:id` starts with the configured prefix.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info};

use crate::config::CollationConfig;
use crate::error::{CollationError, Result};
use crate::tei::TeiNormalizer;
use crate::witness::Witness;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

fn xml_id<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute((XML_NS, "id"))
}

/// Reads witness documents according to a run configuration
pub struct WitnessLoader {
    prefix: String,
    extension: String,
    base: Option<String>,
    normalizer: TeiNormalizer,
}

impl WitnessLoader {
    pub fn new(config: &CollationConfig) -> Self {
        Self {
            prefix: config.required_id_prefix.clone(),
            extension: config.file_extension.clone(),
            base: config.base_witness.clone(),
            normalizer: TeiNormalizer::with_strip_punctuation(config.strip_punctuation),
        }
    }

    /// List the documents in `dir` with the configured extension, sorted by
    /// file stem.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| CollationError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CollationError::io(dir, e))?.path();
            let matches = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == self.extension);
            if matches {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(CollationError::NoWitnesses {
                dir: dir.to_path_buf(),
                extension: self.extension.clone(),
            });
        }

        paths.sort_by(|a, b| a.file_stem().cmp(&b.file_stem()));
        debug!(count = paths.len(), dir = %dir.display(), "discovered witness documents");
        Ok(paths)
    }

    /// Load one document from disk
    pub fn load(&self, path: &Path) -> Result<Witness> {
        let text = fs::read_to_string(path).map_err(|e| CollationError::io(path, e))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.load_str(&name, path, &text)
    }

    /// Load a document already in memory; `path` is only used in errors.
    pub fn load_str(&self, name: &str, path: &Path, text: &str) -> Result<Witness> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options).map_err(|source| CollationError::Xml {
            path: path.to_path_buf(),
            source,
        })?;

        let label = doc
            .descendants()
            .filter(|n| n.has_tag_name("witness"))
            .find_map(xml_id)
            .map(|id| format!("#{id}"))
            .ok_or_else(|| CollationError::MissingWitnessLabel {
                path: path.to_path_buf(),
            })?;

        let mut nodes = Vec::new();
        self.collect_units(doc.root_element(), &mut nodes);

        let mut units = Vec::with_capacity(nodes.len());
        for (id, node) in nodes {
            units.push((id, self.normalizer.normalize(node, id)?));
        }

        let witness = Witness::build(name, label, units)?;
        debug!(witness = name, label = witness.label(), units = witness.len(), "witness loaded");
        Ok(witness)
    }

    fn collect_units<'a, 'input>(&self, node: Node<'a, 'input>, out: &mut Vec<(&'a str, Node<'a, 'input>)>) {
        for child in node.children().filter(Node::is_element) {
            if child.has_tag_name("teiHeader") {
                continue;
            }
            match xml_id(child) {
                Some(id) if id.starts_with(&self.prefix) => out.push((id, child)),
                _ => self.collect_units(child, out),
            }
        }
    }

    /// Discover and load every document in `dir`, base witness first.
    ///
    /// With no configured base the first document in sorted order is the
    /// base; the remaining documents keep their sorted order.
    pub fn load_all(&self, dir: &Path) -> Result<Vec<Witness>> {
        let mut witnesses = self
            .discover(dir)?
            .iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>>>()?;

        if let Some(base) = &self.base {
            let at = witnesses
                .iter()
                .position(|w| w.name() == base)
                .ok_or_else(|| CollationError::BaseWitnessNotFound(base.clone()))?;
            let base = witnesses.remove(at);
            witnesses.insert(0, base);
        }

        info!(
            count = witnesses.len(),
            base = witnesses.first().map(Witness::name).unwrap_or_default(),
            "witnesses loaded"
        );
        Ok(witnesses)
    }
}
