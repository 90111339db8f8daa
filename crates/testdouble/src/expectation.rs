//! Configured expectations and stubs.
//!
//! An [`Expectation`] combines a method constraint, argument matchers, an
//! invocation count rule and a return stub. Expectations are built by value
//! and then registered with an invocation handler:
//!
//! ```rust,ignore
//! double.expect(
//!     Expectation::method("send")
//!         .expects(InvocationCount::Once)
//!         .with_args(vec!["bob".into()])
//!         .will_return(true),
//! )?;
//! ```

use crate::invocation::Invocation;
use crate::matcher::{ArgumentMatcher, ParametersMatcher};
use crate::result::{DoubleError, DoubleResult};
use crate::rule::InvocationCount;
use crate::stub::{Dispatch, ReturnStub};
use crate::value::Value;
use std::fmt;

/// Position of an expectation within its handler, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpectationId(pub usize);

impl fmt::Display for ExpectationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rule describing anticipated calls and what they return
#[derive(Debug, Clone, Default)]
pub struct Expectation {
    /// Method constraint; `None` matches every method
    pub method: Option<String>,
    /// Argument constraint
    pub parameters: ParametersMatcher,
    /// Allowed and required number of calls
    pub count: InvocationCount,
    /// Return behaviour; `None` falls back to return value generation
    pub stub: Option<ReturnStub>,
    /// Calls matched so far
    pub invocation_count: usize,
}

impl Expectation {
    /// Expect calls to the named method
    #[must_use]
    pub fn method(name: &str) -> Self {
        Self {
            method: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Expect calls to any method
    #[must_use]
    pub fn any_method() -> Self {
        Self::default()
    }

    /// Set the invocation count rule
    #[must_use]
    pub const fn expects(mut self, count: InvocationCount) -> Self {
        self.count = count;
        self
    }

    /// Constrain arguments position by position
    #[must_use]
    pub fn with(mut self, matchers: Vec<ArgumentMatcher>) -> Self {
        self.parameters = ParametersMatcher::Exact(matchers);
        self
    }

    /// Constrain arguments to equal the given values
    #[must_use]
    pub fn with_args(self, arguments: Vec<Value>) -> Self {
        self.with(arguments.into_iter().map(ArgumentMatcher::EqualTo).collect())
    }

    /// Accept any arguments
    #[must_use]
    pub fn with_any_parameters(mut self) -> Self {
        self.parameters = ParametersMatcher::AnyParameters;
        self
    }

    /// Set the return stub
    #[must_use]
    pub fn will(mut self, stub: ReturnStub) -> Self {
        self.stub = Some(stub);
        self
    }

    /// Return the given value on every matched call
    #[must_use]
    pub fn will_return(self, value: impl Into<Value>) -> Self {
        self.will(ReturnStub::Value(value.into()))
    }

    /// Return the given values on consecutive calls
    #[must_use]
    pub fn will_return_consecutively(self, values: Vec<Value>) -> Self {
        self.will(ReturnStub::consecutive(values))
    }

    /// Return the argument at `index`
    #[must_use]
    pub fn will_return_argument(self, index: usize) -> Self {
        self.will(ReturnStub::Argument(index))
    }

    /// Return values looked up by argument list
    #[must_use]
    pub fn will_return_map(self, map: Vec<(Vec<Value>, Value)>) -> Self {
        self.will(ReturnStub::ValueMap(map))
    }

    /// Compute the return value from the invocation
    #[must_use]
    pub fn will_return_callback<F>(self, callback: F) -> Self
    where
        F: Fn(&Invocation) -> Value + 'static,
    {
        self.will(ReturnStub::callback(callback))
    }

    /// Fail matched calls with the given message
    #[must_use]
    pub fn will_throw(self, message: &str) -> Self {
        self.will(ReturnStub::Exception(message.to_string()))
    }

    /// Whether the method constraint and argument matchers accept the call
    #[must_use]
    pub fn matches(&self, invocation: &Invocation) -> bool {
        accepts(self.method.as_deref(), &self.parameters, invocation)
    }

    /// Whether the count rule allows another matched call
    #[must_use]
    pub fn admits_another(&self) -> bool {
        self.count.admits_another(self.invocation_count)
    }

    /// Record a matched call and run the stub.
    ///
    /// Returns `Ok(None)` when no stub is configured or the stub has no
    /// value for these arguments.
    pub fn invoke(&mut self, invocation: &Invocation) -> DoubleResult<Option<Dispatch>> {
        self.invocation_count += 1;
        match self.stub.as_mut() {
            Some(stub) => stub.invoke(invocation),
            None => Ok(None),
        }
    }

    /// Check the final call count against the count rule
    pub fn verify(&self) -> DoubleResult<()> {
        if !self.count.is_verifiable() || self.count.is_satisfied_by(self.invocation_count) {
            return Ok(());
        }
        Err(DoubleError::ExpectationFailed {
            method: self.describe_method(),
            message: format!(
                "Method was expected to be {} but was invoked {} time(s)",
                self.count, self.invocation_count
            ),
        })
    }

    /// Method constraint rendered for diagnostics
    #[must_use]
    pub fn describe_method(&self) -> String {
        self.method.clone().unwrap_or_else(|| "<any>".to_string())
    }
}

/// Method constraint and argument matchers evaluated against a call
pub(crate) fn accepts(
    method: Option<&str>,
    parameters: &ParametersMatcher,
    invocation: &Invocation,
) -> bool {
    method.is_none_or(|name| invocation.is_method(name)) && parameters.matches(&invocation.arguments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn call(method: &str, args: Vec<Value>) -> Invocation {
        Invocation::new("Repo", method, args)
    }

    mod matching_tests {
        use super::*;

        #[test]
        fn test_method_name_case_insensitive() {
            let e = Expectation::method("findAll");
            assert!(e.matches(&call("FINDALL", vec![])));
            assert!(!e.matches(&call("find", vec![])));
        }

        #[test]
        fn test_any_method() {
            let e = Expectation::any_method();
            assert!(e.matches(&call("whatever", vec![1.into()])));
        }

        #[test]
        fn test_with_args() {
            let e = Expectation::method("find").with_args(vec![1.into()]);
            assert!(e.matches(&call("find", vec![1.into()])));
            assert!(!e.matches(&call("find", vec![2.into()])));
            assert!(!e.matches(&call("find", vec![])));
        }

        #[test]
        fn test_with_any_parameters_resets_constraint() {
            let e = Expectation::method("find")
                .with_args(vec![1.into()])
                .with_any_parameters();
            assert!(e.matches(&call("find", vec![2.into(), 3.into()])));
        }
    }

    mod invoke_tests {
        use super::*;

        #[test]
        fn test_invoke_counts_and_returns() {
            let mut e = Expectation::method("find").will_return("x");
            let inv = call("find", vec![]);
            let value = e.invoke(&inv).unwrap().map(|d| d.resolve(&inv));
            assert_eq!(value, Some(Value::from("x")));
            assert_eq!(e.invocation_count, 1);
        }

        #[test]
        fn test_invoke_without_stub() {
            let mut e = Expectation::method("find");
            assert!(e.invoke(&call("find", vec![])).unwrap().is_none());
            assert_eq!(e.invocation_count, 1);
        }

        #[test]
        fn test_admits_another_respects_bound() {
            let mut e = Expectation::method("find").expects(InvocationCount::Once);
            assert!(e.admits_another());
            e.invoke(&call("find", vec![])).unwrap();
            assert!(!e.admits_another());
        }
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_unmet_once_fails() {
            let e = Expectation::method("save").expects(InvocationCount::Once);
            let err = e.verify().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Expectation failed for method name is \"save\": \
                 Method was expected to be invoked 1 time but was invoked 0 time(s)"
            );
        }

        #[test]
        fn test_plain_stub_always_verifies() {
            assert!(Expectation::method("save").verify().is_ok());
        }

        #[test]
        fn test_satisfied_exactly() {
            let mut e = Expectation::method("save").expects(InvocationCount::Exactly(2));
            e.invoke(&call("save", vec![])).unwrap();
            assert!(e.verify().is_err());
            e.invoke(&call("save", vec![])).unwrap();
            assert!(e.verify().is_ok());
        }
    }
}
