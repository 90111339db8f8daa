//! Method descriptors consumed from the reflection step.

use crate::result::DoubleResult;
use crate::value::{ReturnType, Value};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One declared parameter of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Declared type, if any
    #[serde(default)]
    pub type_hint: Option<String>,
    /// Whether the parameter has a default value
    #[serde(default)]
    pub optional: bool,
}

impl Parameter {
    /// Create a required, untyped parameter
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_hint: None,
            optional: false,
        }
    }

    /// Set the declared type
    #[must_use]
    pub fn with_type(mut self, type_hint: &str) -> Self {
        self.type_hint = Some(type_hint.to_string());
        self
    }

    /// Mark as optional
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A method that a test double can be configured for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableMethod {
    /// Method name as declared
    pub name: String,
    /// Parameter signature
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared return type
    #[serde(default)]
    pub return_type: ReturnType,
    /// Whether expectations may be registered for this method
    #[serde(default = "default_stubbable")]
    pub stubbable: bool,
}

const fn default_stubbable() -> bool {
    true
}

impl ConfigurableMethod {
    /// Create a stubbable method with no parameters and a `mixed` return type
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            return_type: ReturnType::Mixed,
            stubbable: true,
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the declared return type
    #[must_use]
    pub fn returning(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Exclude this method from configuration (final or static methods)
    #[must_use]
    pub const fn not_stubbable(mut self) -> Self {
        self.stubbable = false;
        self
    }

    /// Case-insensitive name comparison
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Check whether `value` is compatible with the declared return type
    #[must_use]
    pub fn may_return(&self, value: &Value) -> bool {
        self.return_type.accepts(value)
    }
}

/// Description of a type to double, as produced by reflection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescription {
    /// Name of the doubled type
    pub name: String,
    /// Methods in declaration order; duplicates are resolved by the builder
    #[serde(default)]
    pub methods: Vec<ConfigurableMethod>,
}

impl TypeDescription {
    /// Create an empty description
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            methods: Vec::new(),
        }
    }

    /// Append a method
    #[must_use]
    pub fn with_method(mut self, method: ConfigurableMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> DoubleResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> DoubleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_path(path: &Path) -> DoubleResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    const MAILER_YAML: &str = r"
name: Mailer
methods:
  - name: send
    parameters:
      - name: to
        type_hint: string
      - name: body
        optional: true
    return_type: bool
  - name: reset
    return_type: void
  - name: instance
    stubbable: false
";

    #[test]
    fn test_builder_defaults() {
        let method = ConfigurableMethod::new("send");
        assert!(method.stubbable);
        assert_eq!(method.return_type, ReturnType::Mixed);
        assert!(method.parameters.is_empty());
    }

    #[test]
    fn test_is_named_ignores_ascii_case() {
        let method = ConfigurableMethod::new("getName");
        assert!(method.is_named("GETNAME"));
        assert!(!method.is_named("get_name"));
    }

    #[test]
    fn test_may_return() {
        let method = ConfigurableMethod::new("count").returning(ReturnType::Int);
        assert!(method.may_return(&Value::Int(1)));
        assert!(!method.may_return(&Value::from("one")));
    }

    #[test]
    fn test_from_yaml() {
        let desc = TypeDescription::from_yaml(MAILER_YAML).unwrap();
        assert_eq!(desc.name, "Mailer");
        assert_eq!(desc.methods.len(), 3);
        assert_eq!(desc.methods[0].parameters.len(), 2);
        assert!(desc.methods[0].parameters[1].optional);
        assert_eq!(desc.methods[0].return_type, ReturnType::Bool);
        assert_eq!(desc.methods[1].return_type, ReturnType::Void);
        assert!(!desc.methods[2].stubbable);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"name":"Clock","methods":[{"name":"now","return_type":{"object":"DateTime"}}]}"#;
        let desc = TypeDescription::from_json(json).unwrap();
        assert_eq!(
            desc.methods[0].return_type,
            ReturnType::Object("DateTime".to_string())
        );
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("mailer.yaml");
        fs::File::create(&yaml_path)
            .unwrap()
            .write_all(MAILER_YAML.as_bytes())
            .unwrap();
        assert_eq!(TypeDescription::from_path(&yaml_path).unwrap().name, "Mailer");

        let json_path = dir.path().join("clock.json");
        fs::write(&json_path, r#"{"name":"Clock"}"#).unwrap();
        let desc = TypeDescription::from_path(&json_path).unwrap();
        assert_eq!(desc.name, "Clock");
        assert!(desc.methods.is_empty());
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = TypeDescription::from_path(Path::new("/nonexistent/type.yaml")).unwrap_err();
        assert!(matches!(err, crate::result::DoubleError::Io(_)));
    }
}
