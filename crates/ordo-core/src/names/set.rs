//! Deduplicated, ordered collection of property names.

use std::collections::BTreeMap;

use super::PropertyName;

/// A set of names deduplicated by [`PropertyName`] equality.
///
/// The first spelling inserted for a canonical name is the one returned.
/// Iteration order is the canonical order, so enumeration output is stable.
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    names: BTreeMap<PropertyName, String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name`, returning `false` if an equivalent name was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let key = PropertyName::new(name.clone());
        if self.names.contains_key(&key) {
            return false;
        }
        self.names.insert(key, name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&PropertyName::new(name))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.names.retain(|_, name| keep(name));
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names.into_values().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for NameSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
