//! Durable client-side [`Storage`] implementations.
//!
//! The key space mirrors the browser's local storage of the booking
//! screens: a `user` key holding the serialized [`Seller`] profile and a
//! `token` key holding the opaque credential.
//!
//! [`Seller`]: crate::domain::Seller

pub mod file;
pub mod memory;

use common::define_kind;
use derive_more::{Display, Error as StdError, From};

pub use self::{file::File, memory::Memory};

define_kind! {
    #[doc = "Key of the durable [`Storage`] key space."]
    enum Key {
        #[doc = "Serialized profile of the signed-in seller."]
        User = 1,

        #[doc = "Opaque credential token."]
        Token = 2,
    }
}

/// Durable key-value storage.
///
/// Synchronous by contract: the session gate reads it on every navigation
/// without a suspension point.
pub trait Storage {
    /// Selects the value stored under the given `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn select(&self, key: Key) -> Result<Option<String>, Error>;

    /// Inserts the `value` under the given `key`, overwriting any
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn insert(&self, key: Key, value: &str) -> Result<(), Error>;

    /// Deletes the value stored under the given `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn delete(&self, key: Key) -> Result<(), Error>;

    /// Clears the whole key space.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn clear(&self) -> Result<(), Error>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn select(&self, key: Key) -> Result<Option<String>, Error> {
        (**self).select(key)
    }

    fn insert(&self, key: Key, value: &str) -> Result<(), Error> {
        (**self).insert(key, value)
    }

    fn delete(&self, key: Key) -> Result<(), Error> {
        (**self).delete(key)
    }

    fn clear(&self) -> Result<(), Error> {
        (**self).clear()
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error of the underlying medium.
    #[display("I/O operation failed: {_0}")]
    Io(std::io::Error),

    /// Stored document is malformed.
    #[display("stored document is malformed: {_0}")]
    Json(serde_json::Error),
}
