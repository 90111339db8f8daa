//! Test double configuration.

use crate::result::DoubleResult;
use serde::{Deserialize, Serialize};

/// Options applied when building a test double
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoubleConfig {
    /// Synthesize default return values for unmatched calls
    pub generate_return_values: bool,
    /// Restrict configuration to these methods; others become non-stubbable
    pub only_methods: Option<Vec<String>>,
    /// Type name reported in diagnostics instead of the doubled type's name
    pub mock_class_name: Option<String>,
}

impl Default for DoubleConfig {
    fn default() -> Self {
        Self {
            generate_return_values: true,
            only_methods: None,
            mock_class_name: None,
        }
    }
}

impl DoubleConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unmatched calls synthesize default values
    #[must_use]
    pub const fn with_generate_return_values(mut self, enabled: bool) -> Self {
        self.generate_return_values = enabled;
        self
    }

    /// Restrict configuration to the named methods
    #[must_use]
    pub fn with_only_methods(mut self, names: &[&str]) -> Self {
        self.only_methods = Some(names.iter().map(ToString::to_string).collect());
        self
    }

    /// Override the type name used in diagnostics
    #[must_use]
    pub fn with_mock_class_name(mut self, name: &str) -> Self {
        self.mock_class_name = Some(name.to_string());
        self
    }

    /// Whether the named method may be configured under `only_methods`
    #[must_use]
    pub fn allows_method(&self, name: &str) -> bool {
        self.only_methods
            .as_ref()
            .is_none_or(|names| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> DoubleResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> DoubleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
