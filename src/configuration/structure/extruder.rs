use std::{ops::Deref, str::FromStr};

use serde::Serialize;
use tracing::debug;

use crate::configuration::{
    document::{describe_json_kind, ConfigNode},
    errors::ConfigurationError,
    traits::LoadableSection,
    Configuration,
};


/// Extruder codes run from `A` to `Z`, so this is also the maximum number of extruders.
pub const MAX_EXTRUDER_COUNT: usize = 26;


#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtrusionMode {
    Rpm,
    Volumetric,
}

impl ExtrusionMode {
    /// The spellings accepted in the configuration file.
    pub const ALLOWED_VALUES: &'static [&'static str] = &["rpm", "volumetric"];
}

impl FromStr for ExtrusionMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rpm" => Ok(Self::Rpm),
            "volumetric" => Ok(Self::Volumetric),
            _ => Err(()),
        }
    }
}


/// What an extruder is printing at the moment, which decides
/// the extrusion profile it uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtrusionRole {
    FirstLayer,
    Insets,
    Infills,
}


/// One physical extrusion head.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Extruder {
    /// Position of this extruder in the configuration file's list.
    pub id: u32,

    /// `A` for the first extruder, `B` for the second, and so on.
    pub code: char,

    pub coordinate_system_offset_x: f64,

    pub extrusion_temperature: f64,

    pub nozzle_z: f64,

    pub z_feed_rate: f64,

    pub first_layer_extrusion_profile: String,

    pub insets_extrusion_profile: String,

    pub infills_extrusion_profile: String,

    pub extrusion_mode: ExtrusionMode,

    pub feed_diameter: f64,
}

impl Extruder {
    fn load_from_node(node: &ConfigNode, index: usize) -> Result<Self, ConfigurationError> {
        let coordinate_system_offset_x = node.child("coordinateSystemOffsetX").required()?;
        let extrusion_temperature = node.child("extrusionTemperature").required()?;
        let nozzle_z = node.child("nozzleZ").required()?;
        let z_feed_rate = node.child("zFeedRate").required()?;

        let first_layer_extrusion_profile = node.child("firstLayerExtrusionProfile").required()?;
        let insets_extrusion_profile = node.child("insetsExtrusionProfile").required()?;
        let infills_extrusion_profile = node.child("infillsExtrusionProfile").required()?;

        let extrusion_mode_node = node.child("extrusionMode");
        let extrusion_mode_string = extrusion_mode_node.required::<String>()?;
        let extrusion_mode = extrusion_mode_string.parse::<ExtrusionMode>().map_err(|_| {
            ConfigurationError::InvalidEnumValue {
                path: extrusion_mode_node.path().to_string(),
                value: extrusion_mode_string.clone(),
                allowed: ExtrusionMode::ALLOWED_VALUES,
            }
        })?;

        let feed_diameter = node.child("feedDiameter").required()?;

        // `index` is below MAX_EXTRUDER_COUNT, checked by the caller.
        let code = char::from(b'A' + index as u8);

        Ok(Self {
            id: index as u32,
            code,
            coordinate_system_offset_x,
            extrusion_temperature,
            nozzle_z,
            z_feed_rate,
            first_layer_extrusion_profile,
            insets_extrusion_profile,
            infills_extrusion_profile,
            extrusion_mode,
            feed_diameter,
        })
    }

    /// Name of the extrusion profile this extruder uses for `role`.
    pub fn profile_name(&self, role: ExtrusionRole) -> &str {
        match role {
            ExtrusionRole::FirstLayer => &self.first_layer_extrusion_profile,
            ExtrusionRole::Insets => &self.insets_extrusion_profile,
            ExtrusionRole::Infills => &self.infills_extrusion_profile,
        }
    }
}


/// The configured extruders, in hardware slot order. Never empty.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct Extruders {
    extruders: Vec<Extruder>,
}

impl Extruders {
    pub fn into_vec(self) -> Vec<Extruder> {
        self.extruders
    }
}

impl Deref for Extruders {
    type Target = [Extruder];

    fn deref(&self) -> &Self::Target {
        &self.extruders
    }
}

impl LoadableSection for Extruders {
    /// Reads the `extruderProfiles` array.
    ///
    /// Errors inside an entry are reported as `extruders[<index>].<field>`.
    fn load_from(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        let extruders_node = configuration.root().child("extruderProfiles");

        if let Some(value) = extruders_node.value() {
            if !value.is_array() {
                return Err(ConfigurationError::TypeMismatch {
                    path: extruders_node.path().to_string(),
                    expected: "array",
                    found: describe_json_kind(value),
                });
            }
        }

        let extruder_count = extruders_node.len();
        if extruder_count == 0 {
            return Err(ConfigurationError::EmptyCollection {
                path: extruders_node.path().to_string(),
            });
        }

        if extruder_count > MAX_EXTRUDER_COUNT {
            return Err(ConfigurationError::TooManyEntries {
                path: extruders_node.path().to_string(),
                count: extruder_count,
                limit: MAX_EXTRUDER_COUNT,
            });
        }

        let extruders_node = extruders_node.relabeled("extruders");
        let extruders = extruders_node
            .elements()
            .enumerate()
            .map(|(index, extruder_node)| Extruder::load_from_node(&extruder_node, index))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} extruder(s).", extruders.len());
        Ok(Self { extruders })
    }
}


/// Which extruder is used when nothing else is specified.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtruderConfig {
    pub default_extruder: u32,
}

impl LoadableSection for ExtruderConfig {
    fn load_from(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        Ok(Self {
            default_extruder: configuration.node("extruder.defaultExtruder").required()?,
        })
    }
}
