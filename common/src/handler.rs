//! [`Handler`] abstractions.

use std::future::Future;

/// Executor of a single operation.
///
/// Commands, queries and infrastructure operations are all expressed as
/// [`Handler`] implementations over their argument types.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
