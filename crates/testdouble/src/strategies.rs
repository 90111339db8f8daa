//! Proptest strategies for test double inputs.
//!
//! ```rust,ignore
//! proptest! {
//!     #[test]
//!     fn prop_one_entry_per_name(methods in colliding_methods()) {
//!         let mut set = MockMethodSet::new();
//!         set.add_methods(methods);
//!         // ...
//!     }
//! }
//! ```

use crate::method::ConfigurableMethod;
use crate::value::{ReturnType, Value};
use proptest::prelude::*;

/// Method names drawn from a small alphabet so that case collisions are common
pub fn method_name() -> impl Strategy<Value = String> {
    "[a-cA-C]{1,3}"
}

/// Any scalar return type
pub fn scalar_return_type() -> impl Strategy<Value = ReturnType> {
    prop_oneof![
        Just(ReturnType::Mixed),
        Just(ReturnType::Void),
        Just(ReturnType::Bool),
        Just(ReturnType::Int),
        Just(ReturnType::Float),
        Just(ReturnType::String),
        Just(ReturnType::Array),
    ]
}

/// A stubbable method with a random name and return type
pub fn configurable_method() -> impl Strategy<Value = ConfigurableMethod> {
    (method_name(), scalar_return_type())
        .prop_map(|(name, return_type)| ConfigurableMethod::new(&name).returning(return_type))
}

/// Sequences of methods whose names frequently collide case-insensitively
pub fn colliding_methods() -> impl Strategy<Value = Vec<ConfigurableMethod>> {
    prop::collection::vec(configurable_method(), 0..24)
}

/// Scalar or shallow list values
pub fn any_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,8}".prop_map(Value::Str),
    ];
    prop_oneof![
        4 => scalar.clone(),
        1 => prop::collection::vec(scalar, 0..4).prop_map(Value::List),
    ]
}
