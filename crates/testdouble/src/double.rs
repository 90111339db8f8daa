//! The in-process stand-in for a generated test double.
//!
//! Generated doubles route every intercepted call through
//! [`TestDouble::call`]. Cloning a double copies it and immediately gives the
//! copy its own invocation handler, so expectations and recorded calls on
//! the original and the clone evolve independently.
//!
//! ## Example
//!
//! ```rust,ignore
//! let double = TestDouble::builder("Mailer")
//!     .method(ConfigurableMethod::new("send").returning(ReturnType::Bool))
//!     .generate_return_values(false)
//!     .build();
//!
//! double.expect(Expectation::method("send").will_return(true))?;
//! assert_eq!(double.call("send", vec!["bob".into()])?, Value::Bool(true));
//! double.verify()?;
//! ```

use crate::config::DoubleConfig;
use crate::expectation::{Expectation, ExpectationId};
use crate::invocation::Invocation;
use crate::method::{ConfigurableMethod, TypeDescription};
use crate::method_set::MockMethodSet;
use crate::result::DoubleResult;
use crate::state::{SharedInvocationHandler, TestDoubleState};
use crate::value::{ReturnType, Value};
use tracing::debug;

/// A configured test double
#[derive(Debug)]
pub struct TestDouble {
    type_name: String,
    state: TestDoubleState,
}

impl TestDouble {
    /// Start building a double for the named type
    #[must_use]
    pub fn builder(type_name: &str) -> TestDoubleBuilder {
        TestDoubleBuilder::new(type_name)
    }

    /// Start building a double from a reflected type description
    #[must_use]
    pub fn from_description(description: TypeDescription) -> TestDoubleBuilder {
        TestDoubleBuilder::new(&description.name).methods(description.methods)
    }

    /// Name of the doubled type
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Per-instance state
    #[must_use]
    pub const fn state(&self) -> &TestDoubleState {
        &self.state
    }

    /// Handler that all calls route through
    pub fn invocation_handler(&self) -> SharedInvocationHandler {
        self.state.invocation_handler()
    }

    /// Register an expectation
    pub fn expect(&self, expectation: Expectation) -> DoubleResult<ExpectationId> {
        self.invocation_handler().borrow_mut().register(expectation)
    }

    /// Invoke a method on the double.
    ///
    /// Argument predicates and return callbacks run without the handler
    /// borrowed, so they may inspect, configure or call this double.
    pub fn call(&self, method: &str, arguments: Vec<Value>) -> DoubleResult<Value> {
        let return_type = self
            .state
            .configurable_methods()
            .iter()
            .find(|m| m.is_named(method))
            .map_or(ReturnType::Mixed, |m| m.return_type.clone());
        let invocation =
            Invocation::new(&self.type_name, method, arguments).with_return_type(return_type);
        let handler = self.invocation_handler();
        let plan = handler.borrow().match_plan();
        let accepted = plan.evaluate(&invocation);
        let dispatch = handler.borrow_mut().dispatch(&invocation, &accepted)?;
        Ok(dispatch.resolve(&invocation))
    }

    /// Check all expectations' invocation counts
    pub fn verify(&self) -> DoubleResult<()> {
        if !self.state.has_invocation_handler() {
            return Ok(());
        }
        self.invocation_handler().borrow().verify()
    }

    /// Recorded calls so far
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        if !self.state.has_invocation_handler() {
            return Vec::new();
        }
        self.invocation_handler().borrow().invocations().to_vec()
    }

    /// Drop all expectations and recorded calls
    pub fn reset(&self) {
        debug!(double = %self.type_name, "reset");
        self.state.unset_invocation_handler();
    }
}

impl Clone for TestDouble {
    fn clone(&self) -> Self {
        let state = self.state.clone();
        state.clone_invocation_handler();
        Self {
            type_name: self.type_name.clone(),
            state,
        }
    }
}

/// Builder assembling a double's method surface
#[derive(Debug, Clone)]
pub struct TestDoubleBuilder {
    type_name: String,
    methods: MockMethodSet,
    config: DoubleConfig,
}

impl TestDoubleBuilder {
    /// Create a builder with default configuration
    #[must_use]
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            methods: MockMethodSet::new(),
            config: DoubleConfig::default(),
        }
    }

    /// Add a method; a same-named method added later replaces it
    #[must_use]
    pub fn method(mut self, method: ConfigurableMethod) -> Self {
        self.methods.add_methods([method]);
        self
    }

    /// Add several methods
    #[must_use]
    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = ConfigurableMethod>,
    {
        self.methods.add_methods(methods);
        self
    }

    /// Set whether unmatched calls synthesize default values
    #[must_use]
    pub const fn generate_return_values(mut self, enabled: bool) -> Self {
        self.config.generate_return_values = enabled;
        self
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: DoubleConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the double
    #[must_use]
    pub fn build(self) -> TestDouble {
        let config = self.config;
        let methods: Vec<ConfigurableMethod> = self
            .methods
            .as_vec()
            .into_iter()
            .map(|m| {
                if config.allows_method(&m.name) {
                    m
                } else {
                    m.not_stubbable()
                }
            })
            .collect();
        let type_name = config.mock_class_name.unwrap_or(self.type_name);

        debug!(
            double = %type_name,
            methods = methods.len(),
            generate_return_values = config.generate_return_values,
            "built test double"
        );
        TestDouble {
            type_name,
            state: TestDoubleState::new(methods, config.generate_return_values),
        }
    }
}
