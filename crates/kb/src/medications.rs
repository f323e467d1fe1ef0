//! Medications table wire model and lookup.
//!
//! The on-disk form is a YAML sequence of `{disease, medications}` entries.
//! In memory the table is a disease-keyed map; lookups for diseases without
//! an entry return an empty list rather than an error, since the classifier's
//! class set and the medications table are curated independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{KbError, KbResult};

const TABLE: &str = "medications";

/// Wire representation of one medications entry.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct MedicationEntryWire {
    pub disease: String,

    #[serde(default)]
    pub medications: Vec<String>,
}

/// Disease to medication-names lookup table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MedicationsTable {
    by_disease: HashMap<String, Vec<String>>,
}

impl MedicationsTable {
    /// Parse the medications table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`KbError`] if:
    /// - the YAML does not match the wire schema (unknown keys included),
    /// - the same disease appears in more than one entry.
    pub fn parse(yaml_text: &str) -> KbResult<Self> {
        let entries: Vec<MedicationEntryWire> = crate::parse_strict(TABLE, yaml_text)?;

        Self::from_entries(entries.into_iter().map(|e| (e.disease, e.medications)))
    }

    /// Build a table from `(disease, medications)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DuplicateEntry`] if a disease appears twice.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> KbResult<Self> {
        let mut by_disease = HashMap::new();

        for (disease, medications) in entries {
            if by_disease.insert(disease.clone(), medications).is_some() {
                return Err(KbError::DuplicateEntry {
                    table: TABLE,
                    disease,
                });
            }
        }

        Ok(Self { by_disease })
    }

    /// Medication names for `disease`; empty if the disease has no entry.
    pub fn for_disease(&self, disease: &str) -> &[String] {
        self.by_disease
            .get(disease)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of diseases with an entry.
    pub fn len(&self) -> usize {
        self.by_disease.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_disease.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_table() {
        let input = r#"- disease: COVID-19
  medications:
    - Paracetamol
    - Remdesivir
- disease: Influenza
  medications:
    - Oseltamivir
"#;

        let table = MedicationsTable::parse(input).expect("parse table");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.for_disease("COVID-19"),
            ["Paracetamol", "Remdesivir"]
        );
    }

    #[test]
    fn unknown_disease_yields_empty_list() {
        let table = MedicationsTable::parse("- disease: Malaria\n  medications:\n    - Chloroquine\n")
            .expect("parse table");
        assert!(table.for_disease("Ebola").is_empty());
    }

    #[test]
    fn entry_without_medications_defaults_to_empty() {
        let table = MedicationsTable::parse("- disease: Anemia\n").expect("parse table");
        assert!(table.for_disease("Anemia").is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_unknown_keys_with_field_path() {
        let input = r#"- disease: Asthma
  medications:
    - Salbutamol
  dosage: unexpected
"#;

        let err = MedicationsTable::parse(input).expect_err("should reject unknown key");
        match err {
            KbError::SchemaMismatch { table, field, .. } => {
                assert_eq!(table, "medications");
                assert!(field.contains('0'), "field path should locate the entry: {field}");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_disease() {
        let input = r#"- disease: Migraine
  medications:
    - Sumatriptan
- disease: Migraine
  medications:
    - Ibuprofen
"#;

        let err = MedicationsTable::parse(input).expect_err("should reject duplicate");
        assert!(matches!(err, KbError::DuplicateEntry { disease, .. } if disease == "Migraine"));
    }
}
