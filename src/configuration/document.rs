use serde_json::Value;

use super::errors::ConfigurationError;


/// A (possibly missing) node of the configuration document,
/// together with the qualified path it was reached by.
///
/// Lookups never fail: asking for a key that isn't there simply yields a
/// missing node. Whether that is an error is decided later by the typed
/// extractors (see [`ConfigNode::required`]).
///
/// A lookup below a present value that can't have members (say, a key of
/// `"slicer": "oops"`) is missing as well, but remembers the offending
/// ancestor so it can be reported as a type mismatch instead.
#[derive(Debug, Clone)]
pub struct ConfigNode<'d> {
    value: Option<&'d Value>,
    path: String,
    blocked_by: Option<ShapeMismatch>,
}

/// The nearest ancestor that was present but had the wrong shape.
#[derive(Debug, Clone)]
struct ShapeMismatch {
    path: String,
    expected: &'static str,
    found: &'static str,
}

impl<'d> ConfigNode<'d> {
    /// The root of a document. Its path is empty.
    pub fn root(document: &'d Value) -> Self {
        Self {
            value: Some(document),
            path: String::new(),
            blocked_by: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying value, with JSON `null` reported as absent.
    pub fn value(&self) -> Option<&'d Value> {
        self.value.filter(|value| !value.is_null())
    }

    pub fn exists(&self) -> bool {
        self.value().is_some()
    }

    /// Looks up an object member. The resulting path is `parent.key`
    /// (or just `key` directly under the root).
    pub fn child(&self, key: &str) -> ConfigNode<'d> {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        };

        ConfigNode {
            value: self.value().and_then(|value| value.get(key)),
            path,
            blocked_by: self.blocked_below("object", Value::is_object),
        }
    }

    /// Follows a dotted path, e.g. `gantry.startX`.
    pub fn at_path(&self, dotted_path: &str) -> ConfigNode<'d> {
        dotted_path
            .split('.')
            .fold(self.clone(), |node, key| node.child(key))
    }

    /// Looks up an array element. The resulting path is `parent[index]`.
    pub fn element(&self, index: usize) -> ConfigNode<'d> {
        ConfigNode {
            value: self.value().and_then(|value| value.get(index)),
            path: format!("{}[{}]", self.path, index),
            blocked_by: self.blocked_below("array", Value::is_array),
        }
    }

    /// Looks up a named object member. The resulting path is `parent["name"]`,
    /// with `"` and `\` in the name escaped.
    pub fn entry(&self, name: &str) -> ConfigNode<'d> {
        let escaped_name = name.replace('\\', "\\\\").replace('"', "\\\"");

        ConfigNode {
            value: self.value().and_then(|value| value.get(name)),
            path: format!("{}[\"{}\"]", self.path, escaped_name),
            blocked_by: self.blocked_below("object", Value::is_object),
        }
    }

    /// Keeps the value but changes the path used in error messages.
    #[must_use = "function returns the relabeled node"]
    pub fn relabeled<S: Into<String>>(self, path: S) -> Self {
        Self {
            value: self.value,
            path: path.into(),
            blocked_by: self.blocked_by,
        }
    }

    /// What a node looked up below `self` inherits: the already known
    /// mismatch, or `self` if it is present but not of the `expected` shape.
    fn blocked_below(
        &self,
        expected: &'static str,
        has_expected_shape: fn(&Value) -> bool,
    ) -> Option<ShapeMismatch> {
        if self.blocked_by.is_some() {
            return self.blocked_by.clone();
        }

        self.value()
            .filter(|value| !has_expected_shape(value))
            .map(|value| ShapeMismatch {
                path: self.path.clone(),
                expected,
                found: describe_json_kind(value),
            })
    }

    /// If this node is missing because an ancestor has the wrong shape,
    /// the type mismatch at that ancestor.
    pub(crate) fn shape_mismatch(&self) -> Option<ConfigurationError> {
        if self.exists() {
            return None;
        }

        self.blocked_by
            .as_ref()
            .map(|mismatch| ConfigurationError::TypeMismatch {
                path: mismatch.path.clone(),
                expected: mismatch.expected,
                found: mismatch.found,
            })
    }

    /// Number of members of an object or elements of an array,
    /// zero for anything else (including a missing node).
    pub fn len(&self) -> usize {
        match self.value() {
            Some(Value::Array(elements)) => elements.len(),
            Some(Value::Object(members)) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the members of an object node, each labeled `parent["name"]`.
    /// Yields nothing if the node is not an object.
    pub fn entries(&self) -> impl Iterator<Item = (&'d str, ConfigNode<'d>)> + '_ {
        self.value()
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|members| members.keys())
            .map(move |name| (name.as_str(), self.entry(name)))
    }

    /// Iterates over the elements of an array node, each labeled `parent[index]`.
    /// Yields nothing if the node is not an array.
    pub fn elements(&self) -> impl Iterator<Item = ConfigNode<'d>> + '_ {
        let element_count = self
            .value()
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);

        (0..element_count).map(move |index| self.element(index))
    }
}


/// Human-readable name of a JSON value's shape, used in type mismatch errors.
pub(crate) fn describe_json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
