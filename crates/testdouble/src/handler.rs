//! The matching engine behind a test double.
//!
//! An [`InvocationHandler`] owns the expectations configured for one double
//! and the log of calls it received. Each call is matched against the
//! expectations in registration order:
//!
//! 1. Candidates are expectations whose method constraint and argument
//!    matchers accept the call and whose count rule admits another call.
//! 2. The candidate with the most specific argument matchers wins; among
//!    equally specific candidates the earliest registered wins.
//! 3. Without a candidate the call fails if an expectation matched but had
//!    used up its allowed calls. Otherwise a default value is synthesized
//!    from the declared return type, or the call is rejected when return
//!    value generation is disabled.
//!
//! A double drives these steps through a detached `MatchPlan` so argument
//! predicates and return callbacks run while the handler is not borrowed.

use crate::expectation::{self, Expectation, ExpectationId};
use crate::invocation::Invocation;
use crate::matcher::ParametersMatcher;
use crate::method::ConfigurableMethod;
use crate::result::{DoubleError, DoubleResult};
use crate::stub::Dispatch;
use crate::value::{ReturnType, Value};
use std::rc::Rc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Expectations and recorded calls for one test double instance
#[derive(Debug)]
pub struct InvocationHandler {
    id: Uuid,
    configurable_methods: Rc<[ConfigurableMethod]>,
    generate_return_values: bool,
    expectations: Vec<Expectation>,
    invocations: Vec<Invocation>,
}

impl InvocationHandler {
    /// Create an empty handler
    #[must_use]
    pub fn new(
        configurable_methods: impl Into<Rc<[ConfigurableMethod]>>,
        generate_return_values: bool,
    ) -> Self {
        let handler = Self {
            id: Uuid::new_v4(),
            configurable_methods: configurable_methods.into(),
            generate_return_values,
            expectations: Vec::new(),
            invocations: Vec::new(),
        };
        debug!(
            handler = %handler.id,
            methods = handler.configurable_methods.len(),
            generate_return_values,
            "created invocation handler"
        );
        handler
    }

    /// Identity of this handler; forks receive a fresh one
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Methods that may be configured
    #[must_use]
    pub fn configurable_methods(&self) -> &[ConfigurableMethod] {
        &self.configurable_methods
    }

    /// Whether unmatched calls synthesize default values
    #[must_use]
    pub const fn generate_return_values(&self) -> bool {
        self.generate_return_values
    }

    /// Look up a configurable method, ignoring ASCII case
    #[must_use]
    pub fn configurable_method(&self, name: &str) -> Option<&ConfigurableMethod> {
        self.configurable_methods.iter().find(|m| m.is_named(name))
    }

    /// Register an expectation.
    ///
    /// # Errors
    ///
    /// Fails if the named method is unknown or not stubbable, or if a fixed
    /// return value does not fit the method's declared return type.
    pub fn register(&mut self, expectation: Expectation) -> DoubleResult<ExpectationId> {
        if let Some(name) = expectation.method.as_deref() {
            let method = self
                .configurable_method(name)
                .filter(|m| m.stubbable)
                .ok_or_else(|| DoubleError::MethodCannotBeConfigured {
                    method: name.to_string(),
                })?;

            if let Some(stub) = &expectation.stub {
                if let Some(value) = stub.fixed_values().into_iter().find(|v| !method.may_return(v)) {
                    return Err(DoubleError::IncompatibleReturnValue {
                        method: method.name.clone(),
                        expected: method.return_type.to_string(),
                        actual: value.kind().to_string(),
                    });
                }
            }
        }

        let id = ExpectationId(self.expectations.len());
        debug!(
            handler = %self.id,
            expectation = %id,
            method = %expectation.describe_method(),
            count = %expectation.count,
            "registered expectation"
        );
        self.expectations.push(expectation);
        Ok(id)
    }

    /// Record a call and resolve its return value.
    ///
    /// Stub callbacks run before this returns, while `self` is still
    /// borrowed. Doubles go through a `MatchPlan` and `dispatch` instead so
    /// callbacks may call back into them.
    ///
    /// # Errors
    ///
    /// Returns [`DoubleError::UnmatchedInvocation`] when nothing matches and
    /// return value generation is disabled, [`DoubleError::ExpectationFailed`]
    /// when the only matching expectations are used up, and any error
    /// produced by the selected stub.
    pub fn invoke(&mut self, invocation: Invocation) -> DoubleResult<Value> {
        let accepted: Vec<bool> = self
            .expectations
            .iter()
            .map(|e| e.matches(&invocation))
            .collect();
        Ok(self.dispatch(&invocation, &accepted)?.resolve(&invocation))
    }

    /// Snapshot of every expectation's method and argument constraints
    pub(crate) fn match_plan(&self) -> MatchPlan {
        MatchPlan(
            self.expectations
                .iter()
                .map(|e| (e.method.clone(), e.parameters.clone()))
                .collect(),
        )
    }

    /// Record a call and select its return behaviour.
    ///
    /// `accepted[i]` tells whether expectation `i` matched the call.
    /// Expectations registered after the plan was taken are not candidates.
    pub(crate) fn dispatch(
        &mut self,
        invocation: &Invocation,
        accepted: &[bool],
    ) -> DoubleResult<Dispatch> {
        trace!(handler = %self.id, invocation = %invocation, "invoked");
        self.invocations.push(invocation.clone());

        let mut selected: Option<usize> = None;
        let mut exhausted: Option<usize> = None;
        for (index, expectation) in self.expectations.iter().enumerate() {
            if !accepted.get(index).copied().unwrap_or(false) {
                continue;
            }
            if !expectation.admits_another() {
                exhausted.get_or_insert(index);
                continue;
            }
            let more_specific = selected.is_none_or(|best| {
                expectation.parameters.specificity()
                    > self.expectations[best].parameters.specificity()
            });
            if more_specific {
                selected = Some(index);
            }
        }

        if let Some(index) = selected {
            let stubbed = self.expectations[index].invoke(invocation)?;
            return match stubbed {
                Some(dispatch) => Ok(dispatch),
                None if self.generate_return_values => {
                    self.default_return_value(invocation).map(Dispatch::Ready)
                }
                None => Err(DoubleError::ReturnValueNotConfigured {
                    method: invocation.qualified_name(),
                }),
            };
        }

        if let Some(index) = exhausted {
            let expectation = &self.expectations[index];
            return Err(DoubleError::ExpectationFailed {
                method: expectation.describe_method(),
                message: format!(
                    "{invocation} was not expected to be called more than {} time(s)",
                    expectation.count.max().unwrap_or_default()
                ),
            });
        }

        if self.generate_return_values {
            return self.default_return_value(invocation).map(Dispatch::Ready);
        }

        warn!(handler = %self.id, invocation = %invocation, "unmatched invocation");
        Err(DoubleError::UnmatchedInvocation {
            method: invocation.qualified_name(),
            arguments: invocation.rendered_arguments(),
        })
    }

    fn default_return_value(&self, invocation: &Invocation) -> DoubleResult<Value> {
        let return_type = self.declared_return_type(invocation);
        return_type
            .default_value()
            .ok_or_else(|| DoubleError::NeverReturns {
                method: invocation.qualified_name(),
            })
    }

    fn declared_return_type<'a>(&'a self, invocation: &'a Invocation) -> &'a ReturnType {
        self.configurable_method(&invocation.method_name)
            .map_or(&invocation.return_type, |m| &m.return_type)
    }

    /// Check every expectation's count rule.
    ///
    /// # Errors
    ///
    /// Reports the first expectation, in registration order, whose call
    /// count does not satisfy its rule.
    pub fn verify(&self) -> DoubleResult<()> {
        self.expectations.iter().try_for_each(Expectation::verify)
    }

    /// Independent deep copy with a fresh identity.
    ///
    /// Expectations, their call counts and stub progress, and the call log
    /// are copied; nothing mutable is shared with `self`.
    #[must_use]
    pub fn fork(&self) -> Self {
        let forked = Self {
            id: Uuid::new_v4(),
            configurable_methods: Rc::clone(&self.configurable_methods),
            generate_return_values: self.generate_return_values,
            expectations: self.expectations.clone(),
            invocations: self.invocations.clone(),
        };
        debug!(from = %self.id, to = %forked.id, "forked invocation handler");
        forked
    }

    /// Registered expectations in registration order
    #[must_use]
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Expectation by id
    #[must_use]
    pub fn expectation(&self, id: ExpectationId) -> Option<&Expectation> {
        self.expectations.get(id.0)
    }

    /// Number of registered expectations
    #[must_use]
    pub fn expectation_count(&self) -> usize {
        self.expectations.len()
    }

    /// Check if any expectation is registered
    #[must_use]
    pub fn has_expectations(&self) -> bool {
        !self.expectations.is_empty()
    }

    /// All recorded calls in order
    #[must_use]
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Recorded calls to the named method, ignoring ASCII case
    #[must_use]
    pub fn invocations_of(&self, method: &str) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|i| i.is_method(method))
            .collect()
    }
}

/// Expectation constraints detached from their handler.
///
/// Evaluating a plan runs argument predicates without holding the handler,
/// so a predicate may inspect or call the double it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct MatchPlan(Vec<(Option<String>, ParametersMatcher)>);

impl MatchPlan {
    /// Which expectations accept the call, in registration order
    pub(crate) fn evaluate(&self, invocation: &Invocation) -> Vec<bool> {
        self.0
            .iter()
            .map(|(method, parameters)| {
                expectation::accepts(method.as_deref(), parameters, invocation)
            })
            .collect()
    }
}
