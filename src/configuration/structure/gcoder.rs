use nalgebra::Point3;
use serde::Serialize;
use tracing::debug;

use super::{
    extruder::{Extruder, Extruders, ExtrusionRole},
    extrusion::{ExtrusionProfile, ExtrusionProfiles},
};
use crate::{
    configuration::{
        errors::ConfigurationError,
        resources::ResourceResolver,
        traits::{LoadableSection, LoadableSectionWithContext},
        Configuration,
    },
    platform::PlatformDirectories,
};


/// Motion system settings.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GantryConfig {
    pub xy_max_homing: bool,

    pub z_max_homing: bool,

    pub scaling_factor: f64,

    pub rapid_move_feed_rate_xy: f64,

    pub rapid_move_feed_rate_z: f64,

    pub homing_feed_rate_z: f64,

    /// Copied from `slicer.layerH`.
    pub layer_height: f64,

    /// Where the print head starts (`gantry.startX`, `gantry.startY`, `gantry.startZ`).
    pub start_position: Point3<f64>,

    /// Drive extrusion through the E axis instead of the A/B axes.
    pub use_e_axis: bool,
}


#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlatformConfig {
    pub temperature: f64,

    pub automated: bool,
}


#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OutlineConfig {
    pub enabled: bool,

    pub distance: f64,
}


/// Everything needed to emit machine code.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GCoderConfig {
    pub program_name: String,

    pub version_string: String,

    pub machine_name: String,

    pub firmware: String,

    pub gantry: GantryConfig,

    pub platform: PlatformConfig,

    pub outline: OutlineConfig,

    pub extrusion_profiles: ExtrusionProfiles,

    pub extruders: Extruders,

    /// Path of the file whose contents start every program. Empty if none.
    pub header: String,

    /// Path of the file whose contents end every program. Empty if none.
    pub footer: String,

    pub do_outlines: bool,

    pub do_insets: bool,

    pub do_infills_first: bool,

    pub do_infills: bool,

    pub do_support: bool,

    pub do_print_layer_messages: bool,
}

impl GCoderConfig {
    pub fn extrusion_profile(&self, name: &str) -> Option<&ExtrusionProfile> {
        self.extrusion_profiles.get(name)
    }

    /// Looks up the extrusion profile `extruder` uses for `role`.
    /// Returns `None` if the extruder refers to a profile that isn't defined.
    pub fn extrusion_profile_for(
        &self,
        extruder: &Extruder,
        role: ExtrusionRole,
    ) -> Option<&ExtrusionProfile> {
        self.extrusion_profile(extruder.profile_name(role))
    }
}

impl LoadableSectionWithContext for GCoderConfig {
    type Context = dyn PlatformDirectories;

    fn load_from(
        configuration: &Configuration,
        context: &Self::Context,
    ) -> Result<Self, ConfigurationError> {
        let resolver = ResourceResolver::new(context);
        let root = configuration.root();

        let program_name = root.child("programName").required()?;
        let version_string = root.child("versionStr").required()?;
        let machine_name = root.child("machineName").required()?;
        let firmware = root.child("firmware").required()?;


        let gantry_node = root.child("gantry");
        let xy_max_homing = gantry_node.child("xyMaxHoming").required()?;
        let z_max_homing = gantry_node.child("zMaxHoming").required()?;
        let scaling_factor = gantry_node.child("scalingFactor").required()?;
        let rapid_move_feed_rate_xy = gantry_node.child("rapidMoveFeedRateXY").required()?;
        let rapid_move_feed_rate_z = gantry_node.child("rapidMoveFeedRateZ").required()?;
        let homing_feed_rate_z = gantry_node.child("homingFeedRateZ").required()?;
        let layer_height = root.at_path("slicer.layerH").required()?;
        let start_position: Point3<f64> = Point3::new(
            gantry_node.child("startX").required()?,
            gantry_node.child("startY").required()?,
            gantry_node.child("startZ").required()?,
        );


        let platform_node = root.child("platform");
        let platform = PlatformConfig {
            temperature: platform_node.child("temperature").required()?,
            automated: platform_node.child("automated").required()?,
        };

        let outline_node = root.child("outline");
        let outline = OutlineConfig {
            enabled: outline_node.child("enabled").required()?,
            distance: outline_node.child("distance").required()?,
        };


        let extrusion_profiles = ExtrusionProfiles::load_from(configuration)?;
        let extruders = Extruders::load_from(configuration)?;


        let gcoder_node = root.child("gcoder");
        let header = gcoder_node.child("header").optional_path(&resolver, "")?;
        let footer = gcoder_node.child("footer").optional_path(&resolver, "")?;
        let do_outlines = gcoder_node.child("outline").required()?;
        let do_insets = gcoder_node.child("insets").required()?;
        let do_infills_first = gcoder_node.child("infillFirst").required()?;
        let do_infills = gcoder_node.child("infills").required()?;
        let do_support = gcoder_node.child("support").required()?;
        let do_print_layer_messages = gcoder_node.child("printLayerMessages").optional(false)?;
        let use_e_axis = gcoder_node.child("useEAxis").optional(false)?;


        debug!(
            "Loaded gcoder configuration for machine {} ({} extruder(s)).",
            machine_name,
            extruders.len()
        );

        Ok(Self {
            program_name,
            version_string,
            machine_name,
            firmware,
            gantry: GantryConfig {
                xy_max_homing,
                z_max_homing,
                scaling_factor,
                rapid_move_feed_rate_xy,
                rapid_move_feed_rate_z,
                homing_feed_rate_z,
                layer_height,
                start_position,
                use_e_axis,
            },
            platform,
            outline,
            extrusion_profiles,
            extruders,
            header,
            footer,
            do_outlines,
            do_insets,
            do_infills_first,
            do_infills,
            do_support,
            do_print_layer_messages,
        })
    }
}
