//! Application provides the console shell around the [`Service`]:
//! configuration, route resolution, stale-fetch guarding and the
//! notification boundary.
//!
//! [`Service`]: service::Service

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

pub mod args;
pub mod config;
pub mod notify;
pub mod route;
pub mod screen;

// Used in binary.
use secrecy as _;
use tokio as _;
use tracing as _;
use tracing_subscriber as _;

pub use self::{args::Args, config::Config};

/// HTTP gateway of the [`App`], replaying the stored session token.
pub type Api =
    service::infra::Http<service::session::Store<service::infra::storage::File>>;

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type App = service::Service<Api, service::infra::storage::File>;
