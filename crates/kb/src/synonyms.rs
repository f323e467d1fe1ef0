//! Symptom synonym table.
//!
//! A YAML mapping from colloquial phrase to canonical symptom token. Phrases
//! are matched by literal substring containment against lowercased free text,
//! so entries are authored in lowercase.

use std::collections::BTreeMap;

use crate::KbResult;

const TABLE: &str = "symptom synonyms";

/// Colloquial phrase to canonical-symptom lookup table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: BTreeMap<String, String>,
}

impl SynonymTable {
    /// Parse the synonym table from YAML text.
    pub fn parse(yaml_text: &str) -> KbResult<Self> {
        let entries: BTreeMap<String, String> = crate::parse_strict(TABLE, yaml_text)?;
        Ok(Self { entries })
    }

    /// Build a table from `(phrase, canonical)` pairs.
    ///
    /// Later duplicates of the same phrase overwrite earlier ones.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Iterate all `(phrase, canonical)` pairs in phrase order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Number of synonym entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
