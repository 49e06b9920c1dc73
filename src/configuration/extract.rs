//! Typed reads on top of [`ConfigNode`].
//!
//! Every section loader is written in terms of four primitives:
//! [`ConfigNode::required`], [`ConfigNode::optional`] and their path-resolving
//! counterparts [`ConfigNode::required_path`] / [`ConfigNode::optional_path`].

use serde_json::Value;

use super::{
    document::{describe_json_kind, ConfigNode},
    errors::ConfigurationError,
    resources::ResourceResolver,
};


/// A scalar type that can be read out of a configuration field.
pub trait FieldValue: Sized {
    /// How the type is described in error messages,
    /// e.g. "Missing required *floating point* field".
    const EXPECTED: &'static str;

    /// Converts a present, non-null JSON value.
    /// Returns `None` if the value has the wrong shape.
    fn coerce(value: &Value) -> Option<Self>;
}

impl FieldValue for f64 {
    const EXPECTED: &'static str = "floating point";

    fn coerce(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FieldValue for u32 {
    const EXPECTED: &'static str = "unsigned integer";

    fn coerce(value: &Value) -> Option<Self> {
        if let Some(integer) = value.as_u64() {
            return u32::try_from(integer).ok();
        }

        // Integral floats such as `3.0` are accepted as well.
        let float = value.as_f64()?;
        if float.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&float) {
            Some(float as u32)
        } else {
            None
        }
    }
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn coerce(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn coerce(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}


impl<'d> ConfigNode<'d> {
    /// Reads a field that must be present.
    ///
    /// Fails with [`ConfigurationError::MissingField`] if the field is absent (or `null`)
    /// and with [`ConfigurationError::TypeMismatch`] if it, or the section
    /// it should live in, has the wrong shape.
    pub fn required<T: FieldValue>(&self) -> Result<T, ConfigurationError> {
        let value = self.value().ok_or_else(|| {
            self.shape_mismatch()
                .unwrap_or_else(|| ConfigurationError::MissingField {
                    path: self.path().to_string(),
                    expected: T::EXPECTED,
                })
        })?;

        T::coerce(value).ok_or_else(|| ConfigurationError::TypeMismatch {
            path: self.path().to_string(),
            expected: T::EXPECTED,
            found: describe_json_kind(value),
        })
    }

    /// Reads a field that may be absent, in which case `default` is returned.
    /// A present but malformed value (or section) is still an error.
    pub fn optional<T: FieldValue>(&self, default: T) -> Result<T, ConfigurationError> {
        if self.exists() {
            self.required()
        } else if let Some(error) = self.shape_mismatch() {
            Err(error)
        } else {
            Ok(default)
        }
    }

    /// Reads a required string field and resolves `default://` resources in it.
    pub fn required_path(&self, resolver: &ResourceResolver) -> Result<String, ConfigurationError> {
        let raw_value = self.required::<String>()?;
        Ok(resolver.resolve(&raw_value))
    }

    /// Like [`ConfigNode::required_path`], but returns `default` if the field is absent.
    /// The default is returned as-is, without resolving it.
    pub fn optional_path(
        &self,
        resolver: &ResourceResolver,
        default: &str,
    ) -> Result<String, ConfigurationError> {
        if self.exists() {
            self.required_path(resolver)
        } else if let Some(error) = self.shape_mismatch() {
            Err(error)
        } else {
            Ok(default.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::{configuration::errors::ErrorKind, platform::FixedDirectories};

    #[test]
    fn required_fields_report_their_path_when_missing() {
        let document = json!({ "slicer": { "layerH": 0.2 } });
        let root = ConfigNode::root(&document);

        let error = root
            .at_path("slicer.firstLayerZ")
            .required::<f64>()
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.field_path(), Some("slicer.firstLayerZ"));
    }

    #[test]
    fn wrong_shapes_are_type_mismatches() {
        let document = json!({
            "gantry": { "xyMaxHoming": "yes", "scalingFactor": "big" },
            "regioner": { "nbOfShells": -2 }
        });
        let root = ConfigNode::root(&document);

        let error = root.at_path("gantry.xyMaxHoming").required::<bool>().unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::TypeMismatch { expected: "boolean", found: "a string", .. }
        ));

        let error = root.at_path("gantry.scalingFactor").optional(1.0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("gantry.scalingFactor"));

        let error = root.at_path("regioner.nbOfShells").required::<u32>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn fields_of_a_malformed_section_are_type_mismatches() {
        let document = json!({ "slicer": "oops", "regioner": [1, 2] });
        let root = ConfigNode::root(&document);

        let error = root.at_path("slicer.layerH").required::<f64>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("slicer"));

        let error = root.at_path("regioner.raftOutset").optional(6.0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.field_path(), Some("regioner"));
    }

    #[test]
    fn unsigned_integers_accept_integral_floats_only() {
        let document = json!({ "a": 3, "b": 3.0, "c": 3.5, "d": 5000000000u64 });
        let root = ConfigNode::root(&document);

        assert_eq!(root.child("a").required::<u32>().unwrap(), 3);
        assert_eq!(root.child("b").required::<u32>().unwrap(), 3);
        assert!(root.child("c").required::<u32>().is_err());
        assert!(root.child("d").required::<u32>().is_err());
    }

    #[test]
    fn optional_fields_fall_back_to_the_default() {
        let document = json!({ "gcoder": { "useEAxis": true, "printLayerMessages": null } });
        let root = ConfigNode::root(&document);

        assert!(root.at_path("gcoder.useEAxis").optional(false).unwrap());
        assert!(!root.at_path("gcoder.printLayerMessages").optional(false).unwrap());
        assert_eq!(
            root.at_path("regioner.raftOutset").optional(6.0).unwrap(),
            6.0
        );
        assert_eq!(
            root.child("programName")
                .optional("fallback".to_string())
                .unwrap(),
            "fallback"
        );
    }

    #[test]
    fn path_fields_resolve_the_default_scheme() {
        let platform = FixedDirectories::new("/etc/miracle", "/usr/share/miracle");
        let resolver = ResourceResolver::new(&platform);

        let document = json!({
            "gcoder": { "header": "default://start.gcode", "footer": "end.gcode" }
        });
        let root = ConfigNode::root(&document);

        let header = root.at_path("gcoder.header").required_path(&resolver).unwrap();
        assert_eq!(
            PathBuf::from(header),
            PathBuf::from("/usr/share/miracle").join("start.gcode")
        );

        let footer = root.at_path("gcoder.footer").optional_path(&resolver, "").unwrap();
        assert_eq!(footer, "end.gcode");

        let missing = root.at_path("gcoder.extra").optional_path(&resolver, "").unwrap();
        assert_eq!(missing, "");
    }
}
