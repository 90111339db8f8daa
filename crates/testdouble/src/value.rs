//! Dynamic values passed into and returned from test doubles.
//!
//! A double has no static knowledge of the collaborator it replaces, so
//! arguments and return values travel as [`Value`]s. Declared return types
//! are described by [`ReturnType`], which also knows how to synthesize a
//! type-appropriate default when a call is not matched by any expectation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed argument or return value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value (`void`, `null`)
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
    /// Ordered list of values
    List(Vec<Value>),
    /// Placeholder for an object of the named type
    Object {
        /// Type name of the object
        class: String,
    },
}

impl Value {
    /// Create an object placeholder
    #[must_use]
    pub fn object(class: &str) -> Self {
        Self::Object {
            class: class.to_string(),
        }
    }

    /// Name of the value's kind, used in diagnostics
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "array",
            Self::Object { class } => class,
        }
    }

    /// Check if this is [`Value::Null`]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the integer payload, if any
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object { class } => write!(f, "{class} object"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

/// Declared return type of a configurable method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    /// No declaration; anything may be returned
    #[default]
    Mixed,
    /// Returns nothing
    Void,
    /// Never returns normally
    Never,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Floating point number
    Float,
    /// String
    String,
    /// List of values
    Array,
    /// Object of the named type
    Object(String),
    /// The wrapped type or null
    Nullable(Box<ReturnType>),
    /// Any one of the member types
    Union(Vec<ReturnType>),
}

impl ReturnType {
    /// Wrap this type as nullable
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) | Self::Mixed | Self::Void => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Synthesize the default value returned for unmatched calls.
    ///
    /// Returns `None` for [`ReturnType::Never`], which has no value.
    #[must_use]
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Self::Mixed | Self::Void | Self::Nullable(_) => Some(Value::Null),
            Self::Never => None,
            Self::Bool => Some(Value::Bool(false)),
            Self::Int => Some(Value::Int(0)),
            Self::Float => Some(Value::Float(0.0)),
            Self::String => Some(Value::Str(String::new())),
            Self::Array => Some(Value::List(Vec::new())),
            Self::Object(class) => Some(Value::object(class)),
            Self::Union(members) => {
                if members.iter().any(|m| matches!(m, Self::Void | Self::Mixed)) {
                    return Some(Value::Null);
                }
                members.iter().find_map(Self::default_value)
            }
        }
    }

    /// Check whether `value` may be returned from a method declaring this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Mixed, _) | (Self::Void, Value::Null) => true,
            (Self::Never | Self::Void, _) => false,
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_) | Value::Int(_))
            | (Self::String, Value::Str(_))
            | (Self::Array, Value::List(_)) => true,
            (Self::Object(expected), Value::Object { class }) => {
                expected.eq_ignore_ascii_case(class)
            }
            (Self::Nullable(inner), other) => other.is_null() || inner.accepts(other),
            (Self::Union(members), other) => members.iter().any(|m| m.accepts(other)),
            _ => false,
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixed => write!(f, "mixed"),
            Self::Void => write!(f, "void"),
            Self::Never => write!(f, "never"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object(class) => write!(f, "{class}"),
            Self::Nullable(inner) => write!(f, "?{inner}"),
            Self::Union(members) => {
                let names: Vec<String> = members.iter().map(ToString::to_string).collect();
                write!(f, "{}", names.join("|"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod default_value_tests {
        use super::*;

        #[test]
        fn test_scalar_defaults() {
            assert_eq!(ReturnType::Bool.default_value(), Some(Value::Bool(false)));
            assert_eq!(ReturnType::Int.default_value(), Some(Value::Int(0)));
            assert_eq!(ReturnType::Float.default_value(), Some(Value::Float(0.0)));
            assert_eq!(
                ReturnType::String.default_value(),
                Some(Value::Str(String::new()))
            );
            assert_eq!(ReturnType::Array.default_value(), Some(Value::List(vec![])));
        }

        #[test]
        fn test_void_mixed_nullable_default_to_null() {
            assert_eq!(ReturnType::Void.default_value(), Some(Value::Null));
            assert_eq!(ReturnType::Mixed.default_value(), Some(Value::Null));
            assert_eq!(
                ReturnType::Int.nullable().default_value(),
                Some(Value::Null)
            );
        }

        #[test]
        fn test_never_has_no_default() {
            assert_eq!(ReturnType::Never.default_value(), None);
        }

        #[test]
        fn test_object_default_is_placeholder() {
            assert_eq!(
                ReturnType::Object("Logger".into()).default_value(),
                Some(Value::object("Logger"))
            );
        }

        #[test]
        fn test_union_uses_first_member() {
            let ty = ReturnType::Union(vec![ReturnType::Int, ReturnType::String]);
            assert_eq!(ty.default_value(), Some(Value::Int(0)));

            let ty = ReturnType::Union(vec![ReturnType::Never, ReturnType::String]);
            assert_eq!(ty.default_value(), Some(Value::Str(String::new())));
        }
    }

    mod accepts_tests {
        use super::*;

        #[test]
        fn test_mixed_accepts_anything() {
            assert!(ReturnType::Mixed.accepts(&Value::Null));
            assert!(ReturnType::Mixed.accepts(&Value::from("x")));
        }

        #[test]
        fn test_scalar_mismatch_rejected() {
            assert!(ReturnType::Int.accepts(&Value::Int(3)));
            assert!(!ReturnType::Int.accepts(&Value::from("3")));
            assert!(ReturnType::Float.accepts(&Value::Int(3)));
            assert!(!ReturnType::Void.accepts(&Value::Int(3)));
        }

        #[test]
        fn test_nullable_accepts_null_and_inner() {
            let ty = ReturnType::String.nullable();
            assert!(ty.accepts(&Value::Null));
            assert!(ty.accepts(&Value::from("x")));
            assert!(!ty.accepts(&Value::Bool(true)));
        }

        #[test]
        fn test_object_class_is_case_insensitive() {
            let ty = ReturnType::Object("Logger".into());
            assert!(ty.accepts(&Value::object("logger")));
            assert!(!ty.accepts(&Value::object("Mailer")));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::from("a").to_string(), "'a'");
        assert_eq!(ReturnType::Int.nullable().to_string(), "?int");
        assert_eq!(
            ReturnType::Union(vec![ReturnType::Int, ReturnType::String]).to_string(),
            "int|string"
        );
    }

    #[test]
    fn test_value_json_is_untagged() {
        let v: Value = serde_json::from_str("[1, \"a\", null, true]").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(1),
                Value::from("a"),
                Value::Null,
                Value::Bool(true)
            ])
        );
    }
}
