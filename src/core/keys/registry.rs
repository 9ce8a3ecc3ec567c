use std::collections::{HashMap, HashSet};

use crate::core::catalog::Catalog;

/// Every piece of mutable key state for one run: the keys already taken,
/// the source text→key reverse index, and the run-global counter.
///
/// Key generation threads one registry through a sequential loop.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: HashSet<String>,
    by_text: HashMap<String, String>,
    counter: usize,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the previously written source-language catalog. When a text
    /// appears under several keys, the first one wins.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut registry = Self::new();
        for (key, text) in catalog.iter() {
            registry.keys.insert(key.to_string());
            registry
                .by_text
                .entry(text.to_string())
                .or_insert_with(|| key.to_string());
        }
        registry
    }

    /// Existing key for a source text.
    pub fn key_for(&self, text: &str) -> Option<&str> {
        self.by_text.get(text).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Mark `key` as taken for `text`.
    pub fn register(&mut self, text: &str, key: &str) {
        self.keys.insert(key.to_string());
        self.by_text
            .entry(text.to_string())
            .or_insert_with(|| key.to_string());
    }

    /// Advance the run-global counter and return its new value (starts at 1).
    pub fn next_counter(&mut self) -> usize {
        self.counter += 1;
        self.counter
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_catalog() {
        let mut catalog = Catalog::default();
        catalog.insert("app.home.welcome", "欢迎回来");
        catalog.insert("app.home.welcome2", "欢迎回来");

        let registry = KeyRegistry::from_catalog(&catalog);

        assert_eq!(registry.key_for("欢迎回来"), Some("app.home.welcome"));
        assert!(registry.contains("app.home.welcome2"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_and_counter() {
        let mut registry = KeyRegistry::new();
        assert!(registry.is_empty());

        registry.register("你好", "home.hello");
        assert_eq!(registry.key_for("你好"), Some("home.hello"));
        assert_eq!(registry.key_for("再见"), None);

        assert_eq!(registry.next_counter(), 1);
        assert_eq!(registry.next_counter(), 2);
    }
}
