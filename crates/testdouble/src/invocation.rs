//! A realized call made against a test double.

use crate::value::{ReturnType, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One call: method identity plus arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Name of the doubled type
    pub class_name: String,
    /// Invoked method name, as spelled by the caller
    pub method_name: String,
    /// Arguments in call order
    pub arguments: Vec<Value>,
    /// Declared return type of the invoked method
    pub return_type: ReturnType,
}

impl Invocation {
    /// Create an invocation with a `mixed` return type
    #[must_use]
    pub fn new(class_name: &str, method_name: &str, arguments: Vec<Value>) -> Self {
        Self {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            arguments,
            return_type: ReturnType::Mixed,
        }
    }

    /// Set the declared return type
    #[must_use]
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Case-insensitive method name comparison
    #[must_use]
    pub fn is_method(&self, name: &str) -> bool {
        self.method_name.eq_ignore_ascii_case(name)
    }

    /// Argument at `index`, if passed
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }

    /// `Class::method` form used in diagnostics
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.class_name.is_empty() {
            self.method_name.clone()
        } else {
            format!("{}::{}", self.class_name, self.method_name)
        }
    }

    /// Arguments rendered as a comma-separated list
    #[must_use]
    pub fn rendered_arguments(&self) -> String {
        self.arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.qualified_name(),
            self.rendered_arguments()
        )?;
        if self.return_type != ReturnType::Mixed {
            write!(f, ": {}", self.return_type)?;
        }
        Ok(())
    }
}
