use std::collections::{btree_map, BTreeMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::configuration::{
    document::{describe_json_kind, ConfigNode},
    errors::ConfigurationError,
    traits::LoadableSection,
    Configuration,
};


/// Feed, flow and retraction parameters for one material / speed combination.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ExtrusionProfile {
    pub feedrate: f64,

    pub retract_distance: f64,

    pub retract_rate: u32,

    pub restart_extra_distance: f64,

    pub flow: f64,

    pub lead_in: f64,

    pub lead_out: f64,

    pub snort_feedrate: f64,

    pub snort_flow: f64,

    pub squirt_feedrate: f64,

    pub squirt_flow: f64,
}

impl ExtrusionProfile {
    /// Reads one profile. Every field is required.
    fn load_from_node(node: &ConfigNode) -> Result<Self, ConfigurationError> {
        Ok(Self {
            feedrate: node.child("feedrate").required()?,
            retract_distance: node.child("retractDistance").required()?,
            retract_rate: node.child("retractRate").required()?,
            restart_extra_distance: node.child("restartExtraDistance").required()?,
            flow: node.child("flow").required()?,
            lead_in: node.child("leadIn").required()?,
            lead_out: node.child("leadOut").required()?,
            snort_feedrate: node.child("snortFeedrate").required()?,
            snort_flow: node.child("snortFlow").required()?,
            squirt_feedrate: node.child("squirtFeedrate").required()?,
            squirt_flow: node.child("squirtFlow").required()?,
        })
    }
}


/// All extrusion profiles, keyed by name.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ExtrusionProfiles {
    profiles: BTreeMap<String, ExtrusionProfile>,
}

impl ExtrusionProfiles {
    pub fn get(&self, name: &str) -> Option<&ExtrusionProfile> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ExtrusionProfile> {
        self.profiles.iter()
    }

    /// Inserts a profile. An existing profile with the same name is replaced
    /// (with a warning).
    ///
    /// Loading never replaces anything: the JSON parser already keeps only the
    /// last of several same-named members. The warning is for callers that
    /// build or merge profile sets themselves.
    pub fn insert<S: Into<String>>(&mut self, name: S, profile: ExtrusionProfile) {
        let name = name.into();

        if self.profiles.insert(name.clone(), profile).is_some() {
            warn!("Extrusion profile \"{}\" is defined more than once, the last definition wins.", name);
        }
    }
}

impl<'a> IntoIterator for &'a ExtrusionProfiles {
    type Item = (&'a String, &'a ExtrusionProfile);
    type IntoIter = btree_map::Iter<'a, String, ExtrusionProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl LoadableSection for ExtrusionProfiles {
    /// Reads the `extrusionProfiles` object. A missing object yields no profiles.
    fn load_from(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        let profiles_node = configuration.root().child("extrusionProfiles");

        if let Some(value) = profiles_node.value() {
            if !value.is_object() {
                return Err(ConfigurationError::TypeMismatch {
                    path: profiles_node.path().to_string(),
                    expected: "object",
                    found: describe_json_kind(value),
                });
            }
        }

        let mut profiles = ExtrusionProfiles::default();
        for (profile_name, profile_node) in profiles_node.entries() {
            let profile = ExtrusionProfile::load_from_node(&profile_node)?;
            profiles.insert(profile_name, profile);
        }

        debug!("Loaded {} extrusion profile(s).", profiles.len());
        Ok(profiles)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::configuration::errors::ErrorKind;

    fn abs_profile() -> serde_json::Value {
        json!({
            "feedrate": 50, "retractDistance": 1, "retractRate": 20,
            "restartExtraDistance": 0, "flow": 1, "leadIn": 0, "leadOut": 0,
            "snortFeedrate": 50, "snortFlow": 1, "squirtFeedrate": 50, "squirtFlow": 1
        })
    }

    #[test]
    fn loads_a_single_profile() {
        let configuration = Configuration::from_document(
            "inline",
            json!({ "extrusionProfiles": { "ABS": abs_profile() } }),
        );

        let profiles = ExtrusionProfiles::load_from(&configuration).unwrap();

        assert_eq!(profiles.len(), 1);
        let abs = profiles.get("ABS").unwrap();
        assert_eq!(abs.feedrate, 50.0);
        assert_eq!(abs.retract_rate, 20);
        assert_eq!(abs.squirt_flow, 1.0);
    }

    #[test]
    fn errors_are_prefixed_with_the_profile_name() {
        let mut incomplete = abs_profile();
        incomplete.as_object_mut().unwrap().remove("feedrate");

        let configuration = Configuration::from_document(
            "inline",
            json!({ "extrusionProfiles": { "ABS": abs_profile(), "PLA": incomplete } }),
        );

        let error = ExtrusionProfiles::load_from(&configuration).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.field_path(), Some("extrusionProfiles[\"PLA\"].feedrate"));
    }

    #[test]
    fn missing_section_means_no_profiles() {
        let configuration = Configuration::from_document("inline", json!({}));

        let profiles = ExtrusionProfiles::load_from(&configuration).unwrap();
        assert!(profiles.is_empty());
    }

    #[test]
    fn section_must_be_an_object() {
        let configuration =
            Configuration::from_document("inline", json!({ "extrusionProfiles": [abs_profile()] }));

        let error = ExtrusionProfiles::load_from(&configuration).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("extrusionProfiles"));
    }

    #[test]
    fn each_profile_must_be_an_object() {
        let configuration = Configuration::from_document(
            "inline",
            json!({ "extrusionProfiles": { "ABS": 5 } }),
        );

        let error = ExtrusionProfiles::load_from(&configuration).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("extrusionProfiles[\"ABS\"]"));
    }

    #[test]
    fn later_insertions_replace_earlier_ones() {
        let mut profiles = ExtrusionProfiles::default();
        let configuration =
            Configuration::from_document("inline", json!({ "ABS": abs_profile() }));
        let profile = ExtrusionProfile::load_from_node(&configuration.root().child("ABS")).unwrap();

        profiles.insert("ABS", profile.clone());
        profiles.insert(
            "ABS",
            ExtrusionProfile {
                feedrate: 80.0,
                ..profile
            },
        );

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles.get("ABS").unwrap().feedrate, 80.0);
    }
}
