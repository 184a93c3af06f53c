//! In-memory [`Storage`] implementation.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use super::{Error, Key, Storage};

/// In-process [`Storage`], durable only for the lifetime of the process.
///
/// Default backend when no persistence is configured, and the backend of
/// choice in tests.
#[derive(Debug, Default)]
pub struct Memory {
    /// Stored key-value pairs.
    map: RwLock<HashMap<Key, String>>,
}

impl Storage for Memory {
    fn select(&self, key: Key) -> Result<Option<String>, Error> {
        Ok(self
            .map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned())
    }

    fn insert(&self, key: Key, value: &str) -> Result<(), Error> {
        drop(
            self.map
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, value.to_owned()),
        );
        Ok(())
    }

    fn delete(&self, key: Key) -> Result<(), Error> {
        drop(
            self.map
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key),
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use super::{Key, Memory, Storage as _};

    #[test]
    fn overwrites_and_clears() {
        let storage = Memory::default();

        storage.insert(Key::Token, "abc").unwrap();
        storage.insert(Key::Token, "def").unwrap();
        assert_eq!(storage.select(Key::Token).unwrap().as_deref(), Some("def"));

        storage.clear().unwrap();
        assert_eq!(storage.select(Key::Token).unwrap(), None);
        assert_eq!(storage.select(Key::User).unwrap(), None);
    }
}
