use super::{errors::ConfigurationError, Configuration};

/// Represents a configuration section that can be read out of a loaded [`Configuration`].
pub trait LoadableSection: Sized {
    /// Read the section from the configuration document.
    /// If a required field is missing or invalid, the whole section fails
    /// with the first offending field.
    fn load_from(configuration: &Configuration) -> Result<Self, ConfigurationError>;
}


/// Represents a configuration section that can be read out of a loaded [`Configuration`],
/// but where that process requires some additional context.
pub trait LoadableSectionWithContext: Sized {
    type Context: ?Sized;

    /// Read the section from the configuration document.
    /// If a required field is missing or invalid, the whole section fails
    /// with the first offending field.
    fn load_from(
        configuration: &Configuration,
        context: &Self::Context,
    ) -> Result<Self, ConfigurationError>;
}


/// Represents a configuration section whose fields already hold
/// caller-chosen defaults, and which only overwrites the fields
/// that the configuration document specifies.
pub trait OverlayableSection {
    /// Overwrite fields with values from the configuration document.
    ///
    /// On error, `self` may have been partially updated and should be discarded.
    fn overlay_from(&mut self, configuration: &Configuration) -> Result<(), ConfigurationError>;
}
