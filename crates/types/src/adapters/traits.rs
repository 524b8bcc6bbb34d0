//! Core adapter trait for provider implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::AdapterResult;
use crate::chains::ChainId;
use crate::requests::RouteRequest;
use crate::routes::BridgeRoute;

/// Core trait for bridge provider adapter implementations
///
/// This trait defines the interface that all provider adapters must
/// implement. Users can plug in custom providers by implementing this
/// trait and registering the adapter with the aggregator.
///
/// `fetch_routes` takes `&self`: adapters are queried concurrently and
/// must not require exclusive access per call.
#[async_trait]
pub trait BridgeAdapter: Send + Sync + Debug {
	/// Stable provider identifier (for registration, failure records, logs)
	fn provider(&self) -> &str;

	/// Whether this provider can bridge from `source` to `target`
	fn supports_chain_pair(&self, source: &ChainId, target: &ChainId) -> bool;

	/// Fetch candidate routes for the given request
	///
	/// Implementations return an empty vector when the provider is
	/// reachable but has no viable route, and an error only for actual
	/// failures.
	async fn fetch_routes(&self, request: &RouteRequest) -> AdapterResult<Vec<BridgeRoute>>;
}
