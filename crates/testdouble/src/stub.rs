//! Return behaviour attached to an expectation.

use crate::invocation::Invocation;
use crate::result::{DoubleError, DoubleResult};
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Computes a return value from an invocation
pub type ReturnCallback = Rc<dyn Fn(&Invocation) -> Value>;

/// What a matched call produces
#[derive(Clone)]
pub enum ReturnStub {
    /// Return the same value every time
    Value(Value),
    /// Return values in order, one per call
    ConsecutiveCalls {
        /// Values to hand out
        values: Vec<Value>,
        /// Index of the next value
        next: usize,
    },
    /// Return the argument at the given position
    Argument(usize),
    /// Return the value paired with the first equal argument list; other
    /// argument lists get the method's default value
    ValueMap(Vec<(Vec<Value>, Value)>),
    /// Compute the value from the invocation
    Callback(ReturnCallback),
    /// Fail the call with the given message
    Exception(String),
}

/// A resolved stub result, possibly waiting on a callback.
///
/// Callbacks are handed back instead of being run so the caller can release
/// the handler before user code executes. That user code may call back into
/// the same double.
#[derive(Clone)]
pub enum Dispatch {
    /// Value ready to return
    Ready(Value),
    /// Callback still to run against the invocation
    Deferred(ReturnCallback),
}

impl Dispatch {
    /// Produce the final value, running a deferred callback
    #[must_use]
    pub fn resolve(self, invocation: &Invocation) -> Value {
        match self {
            Self::Ready(value) => value,
            Self::Deferred(callback) => callback(invocation),
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Deferred(_) => write!(f, "Deferred(<fn>)"),
        }
    }
}

impl ReturnStub {
    /// Create a consecutive-calls stub
    #[must_use]
    pub fn consecutive(values: Vec<Value>) -> Self {
        Self::ConsecutiveCalls { values, next: 0 }
    }

    /// Create a callback stub
    #[must_use]
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&Invocation) -> Value + 'static,
    {
        Self::Callback(Rc::new(callback))
    }

    /// Produce the return value for a matched invocation.
    ///
    /// Returns `Ok(None)` when a value map has no entry for the arguments.
    pub fn invoke(&mut self, invocation: &Invocation) -> DoubleResult<Option<Dispatch>> {
        let value = match self {
            Self::Value(value) => value.clone(),
            Self::ConsecutiveCalls { values, next } => {
                let value = values
                    .get(*next)
                    .cloned()
                    .ok_or_else(|| DoubleError::NoMoreReturnValues {
                        method: invocation.qualified_name(),
                        calls: values.len(),
                    })?;
                *next += 1;
                value
            }
            Self::Argument(index) => invocation.argument(*index).cloned().ok_or_else(|| {
                DoubleError::ArgumentIndexOutOfRange {
                    method: invocation.qualified_name(),
                    index: *index,
                    count: invocation.arguments.len(),
                }
            })?,
            Self::ValueMap(map) => {
                let Some((_, value)) = map
                    .iter()
                    .find(|(arguments, _)| *arguments == invocation.arguments)
                else {
                    return Ok(None);
                };
                value.clone()
            }
            Self::Callback(callback) => return Ok(Some(Dispatch::Deferred(Rc::clone(callback)))),
            Self::Exception(message) => {
                return Err(DoubleError::ExceptionThrown {
                    method: invocation.qualified_name(),
                    message: message.clone(),
                })
            }
        };
        Ok(Some(Dispatch::Ready(value)))
    }

    /// Fixed values this stub may return, for return type validation
    #[must_use]
    pub fn fixed_values(&self) -> Vec<&Value> {
        match self {
            Self::Value(value) => vec![value],
            Self::ConsecutiveCalls { values, .. } => values.iter().collect(),
            Self::ValueMap(map) => map.iter().map(|(_, value)| value).collect(),
            Self::Argument(_) | Self::Callback(_) | Self::Exception(_) => Vec::new(),
        }
    }
}

impl fmt::Debug for ReturnStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::ConsecutiveCalls { values, next } => f
                .debug_struct("ConsecutiveCalls")
                .field("values", values)
                .field("next", next)
                .finish(),
            Self::Argument(index) => f.debug_tuple("Argument").field(index).finish(),
            Self::ValueMap(map) => f.debug_tuple("ValueMap").field(map).finish(),
            Self::Callback(_) => write!(f, "Callback(<fn>)"),
            Self::Exception(message) => f.debug_tuple("Exception").field(message).finish(),
        }
    }
}
