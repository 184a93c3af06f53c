//! [`Gateway`]-related implementations.
//!
//! The [`Gateway`] is the remote REST backend as the client sees it: a
//! set of [`Handler`] operations over the abstract vocabulary of
//! [`common::operations`].
//!
//! [`Handler`]: common::Handler

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote backend operation.
pub use common::Handler as Gateway;

/// [`Gateway`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Backend answered, but reported an application-level failure.
    ///
    /// Carries the human-readable message of the failure indicator; a
    /// transport-level success with a failure indicator is still this
    /// error, never a silent success.
    #[display("rejected by the backend: {message}")]
    Rejected {
        /// Message carried by the failure indicator.
        message: String,
    },

    /// Transport failed before any application-level answer.
    #[display("transport failed: {_0}")]
    Transport(#[error(not(source))] String),

    /// Backend answered something unintelligible.
    #[display("malformed response: {_0}")]
    Decode(#[error(not(source))] String),
}
