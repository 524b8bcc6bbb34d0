//! Bridge Service
//!
//! Core logic for route aggregation, normalization, ranking and validation.

pub mod aggregator;
pub mod normalizer;
pub mod sorter;
pub mod validator;

pub use aggregator::{AggregatorConfig, AggregatorStats, RouteAggregator, DEFAULT_TIMEOUT_MS};
pub use normalizer::normalize_routes;
pub use sorter::sort_routes;
pub use validator::BridgeValidator;
