//! File-backed [`Storage`] implementation.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use super::{Error, Key, Storage};

/// Single JSON document on disk.
type Document = BTreeMap<String, String>;

/// [`Storage`] persisting the key space as one JSON document on disk.
///
/// A missing file reads as an empty key space; every mutation writes the
/// whole document back.
#[derive(Clone, Debug)]
pub struct File {
    /// Path of the backing document.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] storage backed by the given `path`.
    ///
    /// The file itself is created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the backing [`Document`], treating a missing file as empty.
    fn load(&self) -> Result<Document, Error> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Document::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Document::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the whole `document` back to disk.
    fn persist(&self, document: &Document) -> Result<(), Error> {
        fs::write(&self.path, serde_json::to_string(document)?)
            .map_err(Into::into)
    }
}

impl Storage for File {
    fn select(&self, key: Key) -> Result<Option<String>, Error> {
        Ok(self.load()?.get(&key.to_string()).cloned())
    }

    fn insert(&self, key: Key, value: &str) -> Result<(), Error> {
        let mut document = self.load()?;
        drop(document.insert(key.to_string(), value.to_owned()));
        self.persist(&document)
    }

    fn delete(&self, key: Key) -> Result<(), Error> {
        let mut document = self.load()?;
        if document.remove(&key.to_string()).is_none() {
            return Ok(());
        }
        self.persist(&document)
    }

    fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{File, Key, Storage as _};

    fn storage() -> (tempfile::TempDir, File) {
        let dir = tempfile::tempdir().unwrap();
        let file = File::new(dir.path().join("session.json"));
        (dir, file)
    }

    #[test]
    fn survives_reopening() {
        let (_dir, file) = storage();

        file.insert(Key::Token, "opaque").unwrap();
        file.insert(Key::User, r#"{"id":1}"#).unwrap();

        let reopened = File::new(file.path.clone());
        assert_eq!(
            reopened.select(Key::Token).unwrap().as_deref(),
            Some("opaque"),
        );
    }

    #[test]
    fn missing_file_reads_empty() {
        let (_dir, file) = storage();

        assert_eq!(file.select(Key::User).unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, file) = storage();

        file.insert(Key::Token, "t").unwrap();
        file.clear().unwrap();
        file.clear().unwrap();

        assert_eq!(file.select(Key::Token).unwrap(), None);
    }
}
