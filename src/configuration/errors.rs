use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;


/// Coarse classification of a [`ConfigurationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    InvalidEnumValue,
    EmptyCollection,
    TooManyEntries,
    FileNotFound,
    MalformedDocument,
    Serialization,
}


/// Everything that can go wrong while loading a configuration file
/// or reading one of its sections.
///
/// Field-bound variants carry the fully qualified field path
/// (e.g. `extrusionProfiles["ABS"].feedrate`), so the message
/// is self-locating.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("Missing required {expected} field \"{path}\" in configuration file.")]
    #[diagnostic(code(miracle_config::missing_field))]
    MissingField { path: String, expected: &'static str },

    #[error("Field \"{path}\" should be {expected}, found {found}.")]
    #[diagnostic(code(miracle_config::type_mismatch))]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(
        "Invalid value \"{value}\" for field \"{path}\", expected one of: {}.",
        .allowed.join(", ")
    )]
    #[diagnostic(code(miracle_config::invalid_enum_value))]
    InvalidEnumValue {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("No entries defined for \"{path}\" in configuration file.")]
    #[diagnostic(code(miracle_config::empty_collection))]
    EmptyCollection { path: String },

    #[error("\"{path}\" has {count} entries, at most {limit} are supported.")]
    #[diagnostic(code(miracle_config::too_many_entries))]
    TooManyEntries {
        path: String,
        count: usize,
        limit: usize,
    },

    #[error("Configuration file \"{}\" can't be read.", .path.display())]
    #[diagnostic(code(miracle_config::file_not_found))]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file \"{}\" is not a valid JSON document.", .path.display())]
    #[diagnostic(code(miracle_config::malformed_document))]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize the configuration document.")]
    #[diagnostic(code(miracle_config::serialization))]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigurationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            Self::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            Self::TooManyEntries { .. } => ErrorKind::TooManyEntries,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            Self::Serialization { .. } => ErrorKind::Serialization,
        }
    }

    /// The qualified field path this error points at,
    /// or `None` for file-level errors.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::MissingField { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::InvalidEnumValue { path, .. }
            | Self::EmptyCollection { path }
            | Self::TooManyEntries { path, .. } => Some(path),
            Self::FileNotFound { .. }
            | Self::MalformedDocument { .. }
            | Self::Serialization { .. } => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_path() {
        let error = ConfigurationError::MissingField {
            path: "slicer.firstLayerZ".to_string(),
            expected: "floating point",
        };

        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.field_path(), Some("slicer.firstLayerZ"));
        assert_eq!(
            error.to_string(),
            "Missing required floating point field \"slicer.firstLayerZ\" in configuration file."
        );
    }

    #[test]
    fn file_errors_have_no_field_path() {
        let error = ConfigurationError::FileNotFound {
            path: PathBuf::from("nowhere.config"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(error.kind(), ErrorKind::FileNotFound);
        assert!(error.field_path().is_none());
    }
}
