//! Infrastructure layer.

pub mod gateway;
pub mod storage;

pub use self::gateway::Gateway;
#[cfg(feature = "http")]
pub use self::gateway::Http;
pub use self::storage::Storage;
