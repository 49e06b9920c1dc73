use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;
use tracing::debug;

pub use self::extruder::{
    Extruder, ExtruderConfig, Extruders, ExtrusionMode, ExtrusionRole, MAX_EXTRUDER_COUNT,
};
pub use self::extrusion::{ExtrusionProfile, ExtrusionProfiles};
pub use self::gcoder::{GCoderConfig, GantryConfig, OutlineConfig, PlatformConfig};
pub use self::regioner::RegionerConfig;
pub use self::slicer::SlicerConfig;
use super::document::ConfigNode;
use super::errors::ConfigurationError;
use super::traits::{LoadableSection, LoadableSectionWithContext, OverlayableSection};
use super::utilities::get_default_configuration_file_path;
use crate::platform::PlatformDirectories;

mod extruder;
mod extrusion;
mod gcoder;
mod regioner;
mod slicer;



/// A loaded configuration document.
///
/// This owns the parsed (but otherwise unvalidated) document tree.
/// The typed sections are read out of it on demand by their loaders,
/// e.g. [`SlicerConfig::load_from`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    /// This is the file path this `Configuration` instance was loaded from.
    pub file_path: PathBuf,

    document: Value,
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationError> {
        let configuration_file_path = configuration_file_path.as_ref();
        let time_before_load = Instant::now();

        // Read the configuration file into memory.
        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationError::FileNotFound {
                path: configuration_file_path.to_path_buf(),
                source: error,
            }
        })?;

        let configuration_file_path = dunce::canonicalize(configuration_file_path).map_err(
            |error| ConfigurationError::FileNotFound {
                path: configuration_file_path.to_path_buf(),
                source: error,
            },
        )?;

        let configuration = Self::from_json_str(configuration_file_path, &configuration_string)?;

        debug!(
            "Loading configuration file {} took {} milliseconds.",
            configuration.file_path.display(),
            time_before_load.elapsed().as_secs_f64() * 1000f64
        );

        Ok(configuration)
    }

    /// Load the configuration from the default path
    /// (`miracle.config` in the platform configuration directory, or in the current directory).
    pub fn load_from_default_path(
        platform: &dyn PlatformDirectories,
    ) -> Result<Self, ConfigurationError> {
        Self::load_from_path(get_default_configuration_file_path(platform))
    }

    /// Parse a configuration document that has already been read into memory.
    /// `file_path` is only recorded, not read.
    pub fn from_json_str<P: Into<PathBuf>>(
        file_path: P,
        json: &str,
    ) -> Result<Self, ConfigurationError> {
        let file_path = file_path.into();

        match serde_json::from_str::<Value>(json) {
            Ok(document) => Ok(Self::from_document(file_path, document)),
            Err(error) => Err(ConfigurationError::MalformedDocument {
                path: file_path,
                source: error,
            }),
        }
    }

    pub fn from_document<P: Into<PathBuf>>(file_path: P, document: Value) -> Self {
        Self {
            file_path: file_path.into(),
            document,
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The root node of the document, the starting point of every section loader.
    pub fn root(&self) -> ConfigNode<'_> {
        ConfigNode::root(&self.document)
    }

    /// Shorthand for `self.root().at_path(dotted_path)`.
    pub fn node(&self, dotted_path: &str) -> ConfigNode<'_> {
        self.root().at_path(dotted_path)
    }

    /// Serializes the document back into (pretty-printed) JSON.
    pub fn as_json(&self) -> Result<String, ConfigurationError> {
        serde_json::to_string_pretty(&self.document)
            .map_err(|error| ConfigurationError::Serialization { source: error })
    }
}


/// Every section the toolpath pipeline needs, loaded in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfiguration {
    pub gcoder: GCoderConfig,
    pub extruder: ExtruderConfig,
    pub slicer: SlicerConfig,
    pub regioner: RegionerConfig,
}

impl LoadableSectionWithContext for PipelineConfiguration {
    type Context = dyn PlatformDirectories;

    fn load_from(
        configuration: &Configuration,
        context: &Self::Context,
    ) -> Result<Self, ConfigurationError> {
        let gcoder = GCoderConfig::load_from(configuration, context)?;
        let extruder = ExtruderConfig::load_from(configuration)?;
        let slicer = SlicerConfig::load_from(configuration)?;

        let mut regioner = RegionerConfig::default();
        regioner.overlay_from(configuration)?;

        Ok(Self {
            gcoder,
            extruder,
            slicer,
            regioner,
        })
    }
}
