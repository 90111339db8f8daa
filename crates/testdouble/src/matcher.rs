//! Argument constraints used by expectations.

use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Predicate over a single argument
pub type ArgumentPredicate = Rc<dyn Fn(&Value) -> bool>;

/// Constraint on one argument position
#[derive(Clone)]
pub enum ArgumentMatcher {
    /// Accept any value
    Anything,
    /// Accept values equal to the given one
    EqualTo(Value),
    /// Accept values of the given kind (`int`, `string`, a class name, ...)
    IsType(String),
    /// Accept values for which the predicate holds
    Callback(ArgumentPredicate),
}

impl ArgumentMatcher {
    /// Shorthand for [`ArgumentMatcher::EqualTo`]
    #[must_use]
    pub fn equal_to(value: impl Into<Value>) -> Self {
        Self::EqualTo(value.into())
    }

    /// Shorthand for [`ArgumentMatcher::IsType`]
    #[must_use]
    pub fn is_type(kind: &str) -> Self {
        Self::IsType(kind.to_string())
    }

    /// Shorthand for [`ArgumentMatcher::Callback`]
    #[must_use]
    pub fn callback<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Self::Callback(Rc::new(predicate))
    }

    /// Check a single argument
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Anything => true,
            Self::EqualTo(expected) => expected == value,
            Self::IsType(kind) => value.kind().eq_ignore_ascii_case(kind),
            Self::Callback(predicate) => predicate(value),
        }
    }

    const fn is_constrained(&self) -> bool {
        !matches!(self, Self::Anything)
    }
}

impl fmt::Debug for ArgumentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anything => write!(f, "Anything"),
            Self::EqualTo(value) => f.debug_tuple("EqualTo").field(value).finish(),
            Self::IsType(kind) => f.debug_tuple("IsType").field(kind).finish(),
            Self::Callback(_) => write!(f, "Callback(<fn>)"),
        }
    }
}

impl fmt::Display for ArgumentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anything => write!(f, "anything"),
            Self::EqualTo(value) => write!(f, "is equal to {value}"),
            Self::IsType(kind) => write!(f, "is of type {kind}"),
            Self::Callback(_) => write!(f, "is accepted by specified callback"),
        }
    }
}

/// Constraint on a whole argument list
#[derive(Debug, Clone, Default)]
pub enum ParametersMatcher {
    /// Accept any arguments
    #[default]
    AnyParameters,
    /// One matcher per position; arity must match
    Exact(Vec<ArgumentMatcher>),
}

impl ParametersMatcher {
    /// Check an argument list
    #[must_use]
    pub fn matches(&self, arguments: &[Value]) -> bool {
        match self {
            Self::AnyParameters => true,
            Self::Exact(matchers) => {
                matchers.len() == arguments.len()
                    && matchers.iter().zip(arguments).all(|(m, a)| m.matches(a))
            }
        }
    }

    /// Ranking used to break ties between expectations.
    ///
    /// `AnyParameters` ranks lowest; an exact list ranks above it and gains
    /// one point per constrained position.
    #[must_use]
    pub fn specificity(&self) -> usize {
        match self {
            Self::AnyParameters => 0,
            Self::Exact(matchers) => 1 + matchers.iter().filter(|m| m.is_constrained()).count(),
        }
    }
}
