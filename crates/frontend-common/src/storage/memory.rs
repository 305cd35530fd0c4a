use super::{CredentialStore, StoreError};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Process-local credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get("access"), None);

        store.set("access", "one").unwrap();
        store.set("access", "two").unwrap();
        assert_eq!(store.get("access").as_deref(), Some("two"));

        store.remove("access").unwrap();
        store.remove("access").unwrap();
        assert_eq!(store.get("access"), None);
    }

    #[test]
    fn test_clear() {
        let store = MemoryCredentialStore::with_entries([("access", "a"), ("refresh", "r")]);
        store.clear().unwrap();
        assert_eq!(store.get("access"), None);
        assert_eq!(store.get("refresh"), None);
    }
}
