use serde::Serialize;

use crate::configuration::{errors::ConfigurationError, traits::LoadableSection, Configuration};


/// The physical parameters every slice needs.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SlicerConfig {
    pub layer_height: f64,

    pub first_layer_z: f64,
}

impl LoadableSection for SlicerConfig {
    fn load_from(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        let slicer_node = configuration.root().child("slicer");

        Ok(Self {
            layer_height: slicer_node.child("layerH").required()?,
            first_layer_z: slicer_node.child("firstLayerZ").required()?,
        })
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::configuration::errors::ErrorKind;

    #[test]
    fn both_fields_are_required() {
        let configuration =
            Configuration::from_document("inline", json!({ "slicer": { "layerH": 0.2 } }));
        let error = SlicerConfig::load_from(&configuration).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.field_path(), Some("slicer.firstLayerZ"));
    }

    #[test]
    fn section_must_be_an_object() {
        let configuration = Configuration::from_document("inline", json!({ "slicer": "oops" }));
        let error = SlicerConfig::load_from(&configuration).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("slicer"));
    }

    #[test]
    fn loads_layer_heights() {
        let configuration = Configuration::from_document(
            "inline",
            json!({ "slicer": { "layerH": 0.2, "firstLayerZ": 0.11 } }),
        );

        assert_eq!(
            SlicerConfig::load_from(&configuration).unwrap(),
            SlicerConfig {
                layer_height: 0.2,
                first_layer_z: 0.11,
            }
        );
    }
}
