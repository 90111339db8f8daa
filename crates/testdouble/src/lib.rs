//! testdouble: Mock Object Runtime
//!
//! Configure expected calls on a synthetic object, record the calls it
//! receives, match each call to an expectation and produce (or refuse) a
//! return value.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐
//! │ TestDouble   │───►│ TestDoubleState  │───►│ InvocationHandler    │
//! │ call/expect  │    │ lazy, memoized,  │    │ expectations, call   │
//! │ clone/reset  │    │ clonable handler │    │ log, matching engine │
//! └──────────────┘    └──────────────────┘    └──────────────────────┘
//!        ▲
//!        │ MockMethodSet (case-insensitive, last write wins)
//! ┌──────────────┐
//! │ Type         │
//! │ description  │
//! └──────────────┘
//! ```
//!
//! Doubles are single-threaded: handlers live behind `Rc<RefCell<_>>`.
//!
//! # Features
//!
//! - `proptest`: exports `strategies` for property tests. The crate's
//!   integration property tests need it: `cargo test --features proptest`.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod double;
mod expectation;
mod handler;
mod invocation;
mod matcher;
mod method;
mod method_set;
mod result;
mod rule;
mod state;
mod stub;
mod value;

/// Proptest strategies for method surfaces and values
#[cfg(any(test, feature = "proptest"))]
pub mod strategies;

pub use config::DoubleConfig;
pub use double::{TestDouble, TestDoubleBuilder};
pub use expectation::{Expectation, ExpectationId};
pub use handler::InvocationHandler;
pub use invocation::Invocation;
pub use matcher::{ArgumentMatcher, ArgumentPredicate, ParametersMatcher};
pub use method::{ConfigurableMethod, Parameter, TypeDescription};
pub use method_set::MockMethodSet;
pub use result::{DoubleError, DoubleResult};
pub use rule::InvocationCount;
pub use state::{SharedInvocationHandler, TestDoubleState};
pub use stub::{Dispatch, ReturnCallback, ReturnStub};
pub use value::{ReturnType, Value};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        ArgumentMatcher, ConfigurableMethod, DoubleConfig, DoubleError, DoubleResult, Expectation,
        InvocationCount, ReturnType, TestDouble, Value,
    };
}
