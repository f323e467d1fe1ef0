//! Disease symptom-profile map.
//!
//! The on-disk form is a YAML mapping from disease label to a list of
//! canonical symptom tokens. Profiles drive both follow-up generation and
//! disease similarity grouping, so they are stored as sets to make the
//! pipeline's set algebra direct.

use std::collections::{BTreeMap, BTreeSet};

use crate::KbResult;

const TABLE: &str = "disease symptom profiles";

/// Disease to typical-symptoms lookup table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiseaseProfiles {
    profiles: BTreeMap<String, BTreeSet<String>>,
}

impl DiseaseProfiles {
    /// Parse the profile map from YAML text.
    pub fn parse(yaml_text: &str) -> KbResult<Self> {
        let wire: BTreeMap<String, Vec<String>> = crate::parse_strict(TABLE, yaml_text)?;
        Ok(Self::from_map(wire))
    }

    /// Build the profile map from disease → symptom-list pairs.
    ///
    /// Duplicate symptoms within one profile collapse silently.
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let profiles = map
            .into_iter()
            .map(|(disease, symptoms)| (disease, symptoms.into_iter().collect()))
            .collect();
        Self { profiles }
    }

    /// The symptom profile for `disease`, if the disease is in the map.
    pub fn profile(&self, disease: &str) -> Option<&BTreeSet<String>> {
        self.profiles.get(disease)
    }

    /// Iterate all `(disease, profile)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.profiles.iter()
    }

    /// Number of diseases in the map.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_map() {
        let input = r#"Tuberculosis:
  - fever
  - night sweats
  - weight loss
Pneumonia:
  - fever
  - chest pain
"#;

        let profiles = DiseaseProfiles::parse(input).expect("parse profiles");
        assert_eq!(profiles.len(), 2);

        let tb = profiles.profile("Tuberculosis").expect("tuberculosis profile");
        assert!(tb.contains("night sweats"));
        assert_eq!(tb.len(), 3);
    }

    #[test]
    fn unknown_disease_has_no_profile() {
        let profiles = DiseaseProfiles::parse("Asthma:\n  - wheezing\n").expect("parse profiles");
        assert!(profiles.profile("Ebola").is_none());
    }

    #[test]
    fn duplicate_symptoms_collapse() {
        let profiles =
            DiseaseProfiles::parse("Malaria:\n  - fever\n  - fever\n  - chills\n").expect("parse");
        assert_eq!(profiles.profile("Malaria").expect("profile").len(), 2);
    }

    #[test]
    fn rejects_non_list_profile() {
        let err = DiseaseProfiles::parse("Malaria: fever\n").expect_err("should reject scalar");
        assert!(matches!(err, crate::KbError::SchemaMismatch { field, .. } if field.contains("Malaria")));
    }
}
