//! Bridge Types
//!
//! Shared models and traits for the bridge route aggregator.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod chains;
pub mod fees;
pub mod models;
pub mod requests;
pub mod routes;
pub mod validation;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use routes::{
	AggregatedRoutes, BridgeError, BridgeRoute, Hop, NormalizedRoute, RouteMetadata, NATIVE_ASSET,
};

pub use adapters::{AdapterError, AdapterResult, BridgeAdapter};

pub use chains::ChainId;

pub use requests::{ExecutionRequest, RouteRequest};

// Re-export shared domain models
pub use models::{Amount, SecretString};

pub use validation::ValidationResult;
