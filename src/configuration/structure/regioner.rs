use serde::Serialize;
use tracing::debug;

use crate::configuration::{
    errors::ConfigurationError,
    traits::OverlayableSection,
    Configuration,
};


/// Region, infill, support and raft computation settings.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RegionerConfig {
    /// Fraction of the interior to fill, between 0 and 1.
    pub infill_density: f64,

    pub number_of_shells: u32,

    /// Extrusion width as a multiple of the layer height.
    pub layer_width_ratio: f64,

    pub infill_shrinking_multiplier: f64,

    pub inset_distance_multiplier: f64,

    pub inset_cutoff_multiplier: f64,

    pub roof_layer_count: u32,

    pub floor_layer_count: u32,

    pub write_debug_scad_files: bool,

    pub raft_layers: u32,

    pub raft_base_thickness: f64,

    pub raft_interface_thickness: f64,

    pub raft_outset: f64,

    pub do_support: bool,

    pub support_margin: f64,
}

impl Default for RegionerConfig {
    fn default() -> Self {
        Self {
            infill_density: 0.2,
            number_of_shells: 2,
            layer_width_ratio: 1.7,
            infill_shrinking_multiplier: 0.25,
            inset_distance_multiplier: 0.9,
            inset_cutoff_multiplier: 0.01,
            roof_layer_count: 0,
            floor_layer_count: 0,
            write_debug_scad_files: false,
            raft_layers: 0,
            raft_base_thickness: 0.5,
            raft_interface_thickness: 0.27,
            raft_outset: 6.0,
            do_support: false,
            support_margin: 1.0,
        }
    }
}

impl OverlayableSection for RegionerConfig {
    /// The shell, infill and roof/floor fields are required.
    /// `writeDebugScadFiles` defaults to `false`, and the raft and support
    /// fields keep whatever value `self` already holds.
    fn overlay_from(&mut self, configuration: &Configuration) -> Result<(), ConfigurationError> {
        let regioner_node = configuration.root().child("regioner");

        self.infill_density = regioner_node.child("infillDensity").required()?;
        self.number_of_shells = regioner_node.child("nbOfShells").required()?;
        self.layer_width_ratio = regioner_node.child("layerWidthRatio").required()?;
        self.infill_shrinking_multiplier = regioner_node
            .child("infillShrinkingMultiplier")
            .required()?;
        self.inset_distance_multiplier = regioner_node
            .child("insetDistanceMultiplier")
            .required()?;
        self.inset_cutoff_multiplier = regioner_node
            .child("insetCuttOffMultiplier")
            .required()?;

        self.roof_layer_count = regioner_node.child("roofLayerCount").required()?;
        self.floor_layer_count = regioner_node.child("floorLayerCount").required()?;

        self.write_debug_scad_files = regioner_node
            .child("writeDebugScadFiles")
            .optional(false)?;

        // Raft.
        self.raft_layers = regioner_node
            .child("raftLayers")
            .optional(self.raft_layers)?;
        self.raft_base_thickness = regioner_node
            .child("raftBaseThickness")
            .optional(self.raft_base_thickness)?;
        self.raft_interface_thickness = regioner_node
            .child("raftInterfaceThickness")
            .optional(self.raft_interface_thickness)?;
        self.raft_outset = regioner_node
            .child("raftOutset")
            .optional(self.raft_outset)?;

        self.do_support = regioner_node
            .child("doSupport")
            .optional(self.do_support)?;
        self.support_margin = regioner_node
            .child("supportMargin")
            .optional(self.support_margin)?;

        debug!(
            "Loaded regioner configuration: {} shell(s), infill density {}.",
            self.number_of_shells, self.infill_density
        );

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::configuration::errors::ErrorKind;

    fn required_regioner_fields() -> Value {
        json!({
            "regioner": {
                "infillDensity": 0.1,
                "nbOfShells": 3,
                "layerWidthRatio": 1.45,
                "infillShrinkingMultiplier": 0.25,
                "insetDistanceMultiplier": 0.9,
                "insetCuttOffMultiplier": 0.01,
                "roofLayerCount": 5,
                "floorLayerCount": 4
            }
        })
    }

    #[test]
    fn unspecified_fields_keep_caller_defaults() {
        let configuration = Configuration::from_document("inline", required_regioner_fields());

        let mut regioner = RegionerConfig {
            raft_layers: 3,
            raft_base_thickness: 0.6,
            raft_interface_thickness: 0.3,
            raft_outset: 12.0,
            do_support: true,
            ..RegionerConfig::default()
        };
        regioner.overlay_from(&configuration).unwrap();

        assert_eq!(regioner.number_of_shells, 3);
        assert_eq!(regioner.roof_layer_count, 5);
        assert_eq!(regioner.floor_layer_count, 4);
        assert_eq!(regioner.raft_layers, 3);
        assert_eq!(regioner.raft_base_thickness, 0.6);
        assert_eq!(regioner.raft_interface_thickness, 0.3);
        assert_eq!(regioner.raft_outset, 12.0);
        assert!(regioner.do_support);
        assert!(!regioner.write_debug_scad_files);
        assert_eq!(
            regioner.support_margin,
            RegionerConfig::default().support_margin
        );
    }

    #[test]
    fn present_optional_fields_override_defaults() {
        let mut document = required_regioner_fields();
        document["regioner"]["raftLayers"] = json!(2);
        document["regioner"]["raftBaseThickness"] = json!(0.75);
        document["regioner"]["raftInterfaceThickness"] = json!(0.2);
        document["regioner"]["doSupport"] = json!(false);
        document["regioner"]["supportMargin"] = json!(2.5);
        let configuration = Configuration::from_document("inline", document);

        let mut regioner = RegionerConfig {
            do_support: true,
            ..RegionerConfig::default()
        };
        regioner.overlay_from(&configuration).unwrap();

        assert_eq!(regioner.raft_layers, 2);
        assert_eq!(regioner.raft_base_thickness, 0.75);
        assert_eq!(regioner.raft_interface_thickness, 0.2);
        assert!(!regioner.do_support);
        assert_eq!(regioner.support_margin, 2.5);
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut document = required_regioner_fields();
        document["regioner"]
            .as_object_mut()
            .unwrap()
            .remove("floorLayerCount");
        let configuration = Configuration::from_document("inline", document);

        let error = RegionerConfig::default()
            .overlay_from(&configuration)
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.field_path(), Some("regioner.floorLayerCount"));
    }
}
