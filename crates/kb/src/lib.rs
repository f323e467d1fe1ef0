//! Knowledge-base boundary support.
//!
//! This crate is responsible for translating the on-disk YAML knowledge bases
//! (medications table, disease symptom profiles, symptom synonyms) into the
//! read-only lookup tables the triage pipeline consumes.
//!
//! Triage meaning lives in `lifeguard-core`. This crate handles file formats
//! and strict schema validation only: every table is parsed through a wire
//! model with `deny_unknown_fields`, and schema mismatches report the failing
//! field path.

pub mod medications;
pub mod profiles;
pub mod synonyms;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use medications::MedicationsTable;
pub use profiles::DiseaseProfiles;
pub use synonyms::SynonymTable;

/// Filename of the medications table within a knowledge-base directory.
pub const MEDICATIONS_FILENAME: &str = "medications.yaml";

/// Filename of the disease symptom profile map within a knowledge-base directory.
pub const DISEASE_SYMPTOMS_FILENAME: &str = "disease_symptoms.yaml";

/// Filename of the symptom synonym table within a knowledge-base directory.
pub const SYNONYMS_FILENAME: &str = "synonyms.yaml";

/// Errors returned by the knowledge-base boundary crate.
#[derive(Debug, Error)]
pub enum KbError {
    #[error("failed to read knowledge-base file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} schema mismatch at {field}: {source}")]
    SchemaMismatch {
        table: &'static str,
        field: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate disease '{disease}' in {table}")]
    DuplicateEntry {
        table: &'static str,
        disease: String,
    },
}

pub type KbResult<T> = std::result::Result<T, KbError>;

/// The three static lookup tables, loaded once at process start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    /// Disease to medication names.
    pub medications: MedicationsTable,

    /// Disease to typical symptom profile. Drives follow-ups and similarity.
    pub profiles: DiseaseProfiles,

    /// Colloquial phrase to canonical symptom.
    pub synonyms: SynonymTable,
}

impl KnowledgeBase {
    /// Load all knowledge-base tables from `dir`.
    ///
    /// Expects `medications.yaml`, `disease_symptoms.yaml` and `synonyms.yaml`
    /// directly under `dir`. A missing or malformed file is an error: callers
    /// are expected to treat this as startup-fatal rather than serve with
    /// partial state.
    pub fn load(dir: &Path) -> KbResult<Self> {
        let medications = MedicationsTable::parse(&read_table(&dir.join(MEDICATIONS_FILENAME))?)?;
        let profiles = DiseaseProfiles::parse(&read_table(&dir.join(DISEASE_SYMPTOMS_FILENAME))?)?;
        let synonyms = SynonymTable::parse(&read_table(&dir.join(SYNONYMS_FILENAME))?)?;

        Ok(Self {
            medications,
            profiles,
            synonyms,
        })
    }
}

fn read_table(path: &Path) -> KbResult<String> {
    std::fs::read_to_string(path).map_err(|source| KbError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize a wire model from YAML, surfacing the failing field path.
pub(crate) fn parse_strict<T: DeserializeOwned>(
    table: &'static str,
    yaml_text: &str,
) -> KbResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let field = err.path().to_string();
        let field = if field.is_empty() {
            "<root>".to_string()
        } else {
            field
        };
        KbError::SchemaMismatch {
            table,
            field,
            source: err.into_inner(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_kb_files(dir: &Path) {
        std::fs::write(
            dir.join(MEDICATIONS_FILENAME),
            "- disease: COVID-19\n  medications:\n    - Paracetamol\n",
        )
        .expect("write medications");
        std::fs::write(
            dir.join(DISEASE_SYMPTOMS_FILENAME),
            "COVID-19:\n  - fever\n  - dry cough\n",
        )
        .expect("write profiles");
        std::fs::write(dir.join(SYNONYMS_FILENAME), "high temperature: fever\n")
            .expect("write synonyms");
    }

    #[test]
    fn loads_all_tables_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_kb_files(dir.path());

        let kb = KnowledgeBase::load(dir.path()).expect("load knowledge base");
        assert_eq!(kb.medications.for_disease("COVID-19"), ["Paracetamol"]);
        assert!(kb.profiles.profile("COVID-19").is_some());
        assert_eq!(kb.synonyms.len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = KnowledgeBase::load(dir.path()).expect_err("should fail on empty dir");
        assert!(matches!(err, KbError::FileRead { .. }));
    }

    #[test]
    fn malformed_table_names_the_failing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_kb_files(dir.path());
        std::fs::write(dir.path().join(MEDICATIONS_FILENAME), "not: a: valid: table\n")
            .expect("overwrite medications");

        let err = KnowledgeBase::load(dir.path()).expect_err("should reject malformed table");
        assert!(matches!(err, KbError::SchemaMismatch { table, .. } if table == "medications"));
    }
}
