//! Witnesses and the unit identifier index
//!
//! A [`Witness`] is one transcribed source document reduced to an ordered list
//! of paragraph [`Unit`]s. Identifiers are unique within a witness and are the
//! key that makes units comparable across witnesses.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CardinalityDivergence, CardinalityMismatch, CollationError, Result};

/// One paragraph-equivalent block of normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Stable cross-witness identifier
    pub id: String,
    /// 0-based position in the witness
    pub ordinal: usize,
    /// Normalized plain text
    pub text: String,
}

/// A named source document and its units in source order
#[derive(Debug, Clone)]
pub struct Witness {
    name: String,
    label: String,
    units: Vec<Unit>,
    index: HashMap<String, usize>,
}

impl Witness {
    /// Build a witness from `(identifier, text)` pairs, preserving their order.
    ///
    /// Fails with [`CollationError::DuplicateIdentifier`] if an identifier
    /// occurs more than once.
    pub fn build<I, K, V>(name: impl Into<String>, label: impl Into<String>, raw_units: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let mut units = Vec::new();
        let mut index = HashMap::new();

        for (ordinal, (id, text)) in raw_units.into_iter().enumerate() {
            let id = id.into();
            if index.insert(id.clone(), ordinal).is_some() {
                return Err(CollationError::DuplicateIdentifier { witness: name, id });
            }
            units.push(Unit {
                id,
                ordinal,
                text: text.into(),
            });
        }

        Ok(Self {
            name,
            label: label.into(),
            units,
            index,
        })
    }

    /// File-level name of the witness
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical label declared by the document itself
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Identifiers in source order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.iter().map(|u| u.id.as_str())
    }

    /// Text of the unit carrying `id`
    pub fn lookup_by_id(&self, id: &str) -> Result<&str> {
        self.index
            .get(id)
            .map(|&ordinal| self.units[ordinal].text.as_str())
            .ok_or_else(|| CollationError::UnknownIdentifier {
                witness: self.name.clone(),
                id: id.to_string(),
            })
    }

    /// Text of the unit at `ordinal`
    pub fn lookup_by_ordinal(&self, ordinal: usize) -> Result<&str> {
        self.units
            .get(ordinal)
            .map(|u| u.text.as_str())
            .ok_or_else(|| CollationError::OrdinalOutOfRange {
                witness: self.name.clone(),
                ordinal,
                len: self.units.len(),
            })
    }
}

/// Check that every witness has as many units as the first one.
///
/// A single witness (or none) is trivially valid.
pub fn validate_cardinality(witnesses: &[Witness]) -> Result<()> {
    let Some(base) = witnesses.first() else {
        return Ok(());
    };

    let divergent: Vec<CardinalityDivergence> = witnesses[1..]
        .iter()
        .filter(|w| w.len() != base.len())
        .map(|w| CardinalityDivergence {
            witness: w.name().to_string(),
            expected: base.len(),
            actual: w.len(),
        })
        .collect();

    if divergent.is_empty() {
        Ok(())
    } else {
        Err(CollationError::StructuralMismatch(CardinalityMismatch {
            base: base.name().to_string(),
            base_len: base.len(),
            divergent,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(name: &str, count: usize) -> Witness {
        Witness::build(
            name,
            format!("#{name}"),
            (0..count).map(|i| (format!("p{i}"), format!("text {i}"))),
        )
        .unwrap()
    }

    #[test]
    fn test_build_preserves_order() {
        let w = Witness::build("a", "#a", vec![("p2", "two"), ("p1", "one")]).unwrap();

        assert_eq!(w.ids().collect::<Vec<_>>(), vec!["p2", "p1"]);
        assert_eq!(w.units()[1].ordinal, 1);
        assert_eq!(w.label(), "#a");
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = Witness::build("a", "#a", vec![("p1", "x"), ("p1", "y")]).unwrap_err();
        assert!(matches!(
            err,
            CollationError::DuplicateIdentifier { ref id, .. } if id == "p1"
        ));
    }

    #[test]
    fn test_lookups() {
        let w = witness("a", 3);

        assert_eq!(w.lookup_by_id("p1").unwrap(), "text 1");
        assert_eq!(w.lookup_by_ordinal(2).unwrap(), "text 2");
        assert!(matches!(
            w.lookup_by_id("missing"),
            Err(CollationError::UnknownIdentifier { .. })
        ));
        assert!(matches!(
            w.lookup_by_ordinal(3),
            Err(CollationError::OrdinalOutOfRange { len: 3, .. })
        ));
    }

    #[test]
    fn test_cardinality_single_witness() {
        assert!(validate_cardinality(&[witness("a", 4)]).is_ok());
        assert!(validate_cardinality(&[]).is_ok());
    }

    #[test]
    fn test_cardinality_equal_counts() {
        let ws = vec![witness("a", 2), witness("b", 2), witness("c", 2)];
        assert!(validate_cardinality(&ws).is_ok());
    }

    #[test]
    fn test_cardinality_mismatch_reports_divergent_witness() {
        let ws = vec![witness("a", 3), witness("b", 2), witness("c", 3)];

        match validate_cardinality(&ws) {
            Err(CollationError::StructuralMismatch(m)) => {
                assert_eq!(m.base, "a");
                assert_eq!(m.divergent.len(), 1);
                assert_eq!(m.divergent[0].witness, "b");
                assert_eq!(m.divergent[0].delta(), -1);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }
}
