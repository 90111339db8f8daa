//! Per-instance state attached to every test double.
//!
//! The [`InvocationHandler`] is built lazily from the immutable method list
//! and return value flag, then memoized. Copying a [`TestDoubleState`] is
//! shallow: both copies point at the same handler until
//! [`TestDoubleState::clone_invocation_handler`] gives the copy its own.

use crate::handler::InvocationHandler;
use crate::method::ConfigurableMethod;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Shared handle to a memoized invocation handler
pub type SharedInvocationHandler = Rc<RefCell<InvocationHandler>>;

/// Lazily created, resettable owner of one invocation handler
#[derive(Debug, Clone)]
pub struct TestDoubleState {
    configurable_methods: Rc<[ConfigurableMethod]>,
    generate_return_values: bool,
    invocation_handler: RefCell<Option<SharedInvocationHandler>>,
}

impl TestDoubleState {
    /// Create state with no handler yet
    #[must_use]
    pub fn new(configurable_methods: Vec<ConfigurableMethod>, generate_return_values: bool) -> Self {
        Self {
            configurable_methods: configurable_methods.into(),
            generate_return_values,
            invocation_handler: RefCell::new(None),
        }
    }

    /// Methods the handler will accept expectations for
    #[must_use]
    pub fn configurable_methods(&self) -> &[ConfigurableMethod] {
        &self.configurable_methods
    }

    /// Whether unmatched calls synthesize default values
    #[must_use]
    pub const fn generate_return_values(&self) -> bool {
        self.generate_return_values
    }

    /// Return the handler, creating it on first access
    pub fn invocation_handler(&self) -> SharedInvocationHandler {
        let mut slot = self.invocation_handler.borrow_mut();
        let handler = slot.get_or_insert_with(|| {
            Rc::new(RefCell::new(InvocationHandler::new(
                Rc::clone(&self.configurable_methods),
                self.generate_return_values,
            )))
        });
        Rc::clone(handler)
    }

    /// Check if a handler has been created
    #[must_use]
    pub fn has_invocation_handler(&self) -> bool {
        self.invocation_handler.borrow().is_some()
    }

    /// Replace the handler with an independent copy; no-op without one
    pub fn clone_invocation_handler(&self) {
        let mut slot = self.invocation_handler.borrow_mut();
        if let Some(handler) = slot.as_mut() {
            let forked = handler.borrow().fork();
            *handler = Rc::new(RefCell::new(forked));
        }
    }

    /// Discard the handler; the next access rebuilds a pristine one
    pub fn unset_invocation_handler(&self) {
        if self.invocation_handler.borrow_mut().take().is_some() {
            debug!("discarded invocation handler");
        }
    }
}
