//! Service contains the business logic of the booking administration
//! client: the session store, the commands and queries driving the remote
//! REST backend, and the booking form synchronization.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod form;
pub mod infra;
pub mod query;
pub mod read;
pub mod session;

pub use self::{command::Command, query::Query};

/// Domain service: the single entry point the screens talk to.
///
/// `Api` is the gateway to the remote REST backend, `S` is the durable
/// client-side [`Storage`] backing the [`session::Store`].
#[derive(Debug)]
pub struct Service<Api, S> {
    /// Gateway of this [`Service`].
    api: Api,

    /// [`session::Store`] of this [`Service`].
    session: session::Store<S>,
}

impl<Api, S> Service<Api, S> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(api: Api, session: session::Store<S>) -> Self {
        Self { api, session }
    }

    /// Returns the gateway of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Returns the [`session::Store`] of this [`Service`].
    #[must_use]
    pub fn session(&self) -> &session::Store<S> {
        &self.session
    }
}

impl<Api: Clone, S> Clone for Service<Api, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
        }
    }
}
