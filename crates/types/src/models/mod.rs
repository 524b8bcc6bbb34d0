//! Shared domain models used across adapters, the aggregator, and other components

pub mod amount;
pub mod secret_string;

pub use amount::Amount;
pub use secret_string::SecretString;
