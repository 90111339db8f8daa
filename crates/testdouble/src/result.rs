//! Result and error types for test doubles.

use thiserror::Error;

/// Result type for test double operations
pub type DoubleResult<T> = Result<T, DoubleError>;

/// Errors that can occur while configuring or invoking a test double
#[derive(Debug, Error)]
pub enum DoubleError {
    /// A call matched no expectation and default values are disabled
    #[error("No expectation matches {method}({arguments}) and return value generation is disabled")]
    UnmatchedInvocation {
        /// Method that was invoked
        method: String,
        /// Rendered argument list
        arguments: String,
    },

    /// Expectation targets a method the double does not expose for configuration
    #[error("Method {method} cannot be configured because it does not exist, has not been specified, is final, or is static")]
    MethodCannotBeConfigured {
        /// Requested method name
        method: String,
    },

    /// Configured return value does not fit the declared return type
    #[error("Method {method} may not return value of type {actual}, its declared return type is \"{expected}\"")]
    IncompatibleReturnValue {
        /// Method name
        method: String,
        /// Declared return type
        expected: String,
        /// Kind of the configured value
        actual: String,
    },

    /// An invocation count rule was violated
    #[error("Expectation failed for method name is \"{method}\": {message}")]
    ExpectationFailed {
        /// Method the expectation was configured for
        method: String,
        /// What went wrong
        message: String,
    },

    /// A stub was configured to fail the call
    #[error("{method} threw: {message}")]
    ExceptionThrown {
        /// Invoked method
        method: String,
        /// Configured failure message
        message: String,
    },

    /// Consecutive return values were used up
    #[error("No more return values are configured for {method} after {calls} calls")]
    NoMoreReturnValues {
        /// Invoked method
        method: String,
        /// Number of values that were configured
        calls: usize,
    },

    /// Stub returns an argument that was not passed
    #[error("{method} was configured to return argument #{index} but received {count} arguments")]
    ArgumentIndexOutOfRange {
        /// Invoked method
        method: String,
        /// Requested argument index
        index: usize,
        /// Arguments actually passed
        count: usize,
    },

    /// Matched expectation has no stub and return value generation is disabled
    #[error("Return value for {method} cannot be generated because no return value was configured")]
    ReturnValueNotConfigured {
        /// Invoked method
        method: String,
    },

    /// Unmatched call to a method whose declared return type is `never`
    #[error("{method} is declared to never return and no expectation handles the call")]
    NeverReturns {
        /// Invoked method
        method: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl DoubleError {
    /// Check if this error reports an unmatched invocation
    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        matches!(self, Self::UnmatchedInvocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_message() {
        let err = DoubleError::UnmatchedInvocation {
            method: "Mailer::send".to_string(),
            arguments: "'a', 1".to_string(),
        };
        assert!(err.is_unmatched());
        assert_eq!(
            err.to_string(),
            "No expectation matches Mailer::send('a', 1) and return value generation is disabled"
        );
    }

    #[test]
    fn test_incompatible_return_value_message() {
        let err = DoubleError::IncompatibleReturnValue {
            method: "Mailer::count".to_string(),
            expected: "int".to_string(),
            actual: "string".to_string(),
        };
        assert!(!err.is_unmatched());
        assert!(err.to_string().contains("declared return type is \"int\""));
    }
}
