//! Case-insensitive method registry used while assembling a double's surface.

use crate::method::ConfigurableMethod;
use indexmap::IndexMap;

/// Deduplicates method descriptors by ASCII-case-insensitive name.
///
/// Adding a method whose name is already present replaces the earlier
/// descriptor and moves it to the end, so [`MockMethodSet::as_vec`] lists
/// each method at the position of its most recent registration.
#[derive(Debug, Clone, Default)]
pub struct MockMethodSet {
    methods: IndexMap<String, ConfigurableMethod>,
}

impl MockMethodSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add methods, overwriting same-named entries
    pub fn add_methods<I>(&mut self, methods: I)
    where
        I: IntoIterator<Item = ConfigurableMethod>,
    {
        for method in methods {
            let key = normalize(&method.name);
            self.methods.shift_remove(&key);
            self.methods.insert(key, method);
        }
    }

    /// Look up a method by name, ignoring ASCII case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigurableMethod> {
        self.methods.get(&normalize(name))
    }

    /// Number of distinct methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if no methods were added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Snapshot of the surviving descriptors in registration order
    #[must_use]
    pub fn as_vec(&self) -> Vec<ConfigurableMethod> {
        self.methods.values().cloned().collect()
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::value::ReturnType;

    fn names(set: &MockMethodSet) -> Vec<String> {
        set.as_vec().into_iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_add_nothing_is_noop() {
        let mut set = MockMethodSet::new();
        set.add_methods(Vec::new());
        assert!(set.is_empty());
        assert!(set.as_vec().is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut set = MockMethodSet::new();
        set.add_methods(["foo", "bar", "baz"].map(ConfigurableMethod::new));
        assert_eq!(names(&set), ["foo", "bar", "baz"]);
    }

    #[test]
    fn test_readd_moves_to_end() {
        let mut set = MockMethodSet::new();
        set.add_methods(["A", "B", "A"].map(ConfigurableMethod::new));
        assert_eq!(names(&set), ["B", "A"]);
    }

    #[test]
    fn test_case_insensitive_last_write_wins() {
        let mut set = MockMethodSet::new();
        set.add_methods([ConfigurableMethod::new("getName").returning(ReturnType::String)]);
        set.add_methods([
            ConfigurableMethod::new("other"),
            ConfigurableMethod::new("GETNAME").returning(ReturnType::Int),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(names(&set), ["other", "GETNAME"]);
        assert_eq!(set.get("getname").unwrap().return_type, ReturnType::Int);
    }

    #[test]
    fn test_only_ascii_is_folded() {
        let mut set = MockMethodSet::new();
        set.add_methods(["straße", "STRASSE", "ÄRGER", "ärger"].map(ConfigurableMethod::new));
        assert_eq!(set.len(), 4);
    }

    mod property_tests {
        use super::*;
        use crate::strategies::colliding_methods;
        use proptest::prelude::*;

        proptest! {
            /// One entry per case-insensitive name, equal to the last one added.
            #[test]
            fn prop_dedup_by_name(methods in colliding_methods()) {
                let mut set = MockMethodSet::new();
                set.add_methods(methods.clone());
                let listed = set.as_vec();

                let mut keys: Vec<String> = listed.iter().map(|m| normalize(&m.name)).collect();
                keys.sort();
                keys.dedup();
                prop_assert_eq!(keys.len(), listed.len());

                for method in &listed {
                    let last = methods
                        .iter()
                        .rev()
                        .find(|m| m.name.eq_ignore_ascii_case(&method.name))
                        .unwrap();
                    prop_assert_eq!(method, last);
                }
            }

            /// Order follows each name's most recent registration.
            #[test]
            fn prop_order_follows_last_registration(methods in colliding_methods()) {
                let mut survivors: Vec<ConfigurableMethod> = Vec::new();
                for method in &methods {
                    survivors.retain(|m| !m.name.eq_ignore_ascii_case(&method.name));
                    survivors.push(method.clone());
                }

                let mut set = MockMethodSet::new();
                set.add_methods(methods);
                prop_assert_eq!(set.as_vec(), survivors);
            }
        }
    }
}
