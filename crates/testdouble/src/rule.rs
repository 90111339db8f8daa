//! Invocation count rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many times an expectation is allowed and required to be invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationCount {
    /// Any number of calls, including none (a plain stub)
    #[default]
    Any,
    /// Must not be called
    Never,
    /// Exactly one call
    Once,
    /// Exactly `n` calls
    Exactly(usize),
    /// At least one call
    AtLeastOnce,
    /// At least `n` calls
    AtLeast(usize),
    /// At most `n` calls
    AtMost(usize),
}

impl InvocationCount {
    /// Upper bound on calls, if any
    #[must_use]
    pub const fn max(&self) -> Option<usize> {
        match self {
            Self::Never => Some(0),
            Self::Once => Some(1),
            Self::Exactly(n) | Self::AtMost(n) => Some(*n),
            Self::Any | Self::AtLeastOnce | Self::AtLeast(_) => None,
        }
    }

    /// Lower bound on calls
    #[must_use]
    pub const fn min(&self) -> usize {
        match self {
            Self::Any | Self::Never | Self::AtMost(_) => 0,
            Self::Once | Self::AtLeastOnce => 1,
            Self::Exactly(n) | Self::AtLeast(n) => *n,
        }
    }

    /// Whether one more call is allowed after `count` calls
    #[must_use]
    pub fn admits_another(&self, count: usize) -> bool {
        self.max().is_none_or(|max| count < max)
    }

    /// Whether `count` calls satisfy this rule
    #[must_use]
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        count >= self.min() && self.max().is_none_or(|max| count <= max)
    }

    /// Whether this rule imposes any verification (plain stubs do not)
    #[must_use]
    pub const fn is_verifiable(&self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl fmt::Display for InvocationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "invoked zero or more times"),
            Self::Never => write!(f, "invoked 0 times"),
            Self::Once => write!(f, "invoked 1 time"),
            Self::Exactly(n) => write!(f, "invoked {n} time(s)"),
            Self::AtLeastOnce => write!(f, "invoked at least once"),
            Self::AtLeast(n) => write!(f, "invoked at least {n} times"),
            Self::AtMost(n) => write!(f, "invoked at most {n} times"),
        }
    }
}
