//! Adapter contract shared by all bridge providers

pub mod errors;
pub mod traits;

pub use errors::AdapterError;
pub use traits::BridgeAdapter;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
