//! Core aggregation service logic

use crate::normalizer::normalize_routes;
use crate::sorter::sort_routes;
use crate::validator::BridgeValidator;
use bridge_adapters::{default_adapters, ProviderToggles};
use bridge_types::{
	AdapterError, AdapterResult, AggregatedRoutes, BridgeAdapter, BridgeError, BridgeRoute,
	ChainId, ExecutionRequest, NormalizedRoute, RouteRequest, SecretString, ValidationResult,
};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Default per-provider timeout for a single route query
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Configuration for building a [`RouteAggregator`]
#[derive(Debug)]
pub struct AggregatorConfig {
	/// Which built-in providers to register
	pub providers: ProviderToggles,
	/// API key for the LayerZero provider, if available
	pub layerzero_api_key: Option<SecretString>,
	/// Per-provider timeout in milliseconds
	pub timeout_ms: u64,
	/// Explicit adapter set; overrides the built-in providers when set
	pub adapters: Option<Vec<Arc<dyn BridgeAdapter>>>,
}

impl Default for AggregatorConfig {
	fn default() -> Self {
		Self {
			providers: ProviderToggles::default(),
			layerzero_api_key: None,
			timeout_ms: DEFAULT_TIMEOUT_MS,
			adapters: None,
		}
	}
}

/// Service for aggregating bridge routes from multiple providers
///
/// Every registered provider that supports the requested chain pair is
/// queried concurrently under its own timeout. One provider failing or
/// stalling never prevents the others from contributing routes.
pub struct RouteAggregator {
	adapters: Vec<Arc<dyn BridgeAdapter>>,
	timeout: Duration,
	validator: BridgeValidator,
}

impl RouteAggregator {
	/// Create an aggregator from configuration
	pub fn new(config: AggregatorConfig) -> AdapterResult<Self> {
		let AggregatorConfig {
			providers,
			layerzero_api_key,
			timeout_ms,
			adapters,
		} = config;

		let adapters = match adapters {
			Some(adapters) => adapters,
			None => default_adapters(&providers, layerzero_api_key)?,
		};

		Ok(Self::with_adapters(
			adapters,
			Duration::from_millis(timeout_ms),
		))
	}

	/// Create an aggregator with an explicit adapter set
	pub fn with_adapters(adapters: Vec<Arc<dyn BridgeAdapter>>, timeout: Duration) -> Self {
		Self {
			adapters,
			timeout,
			validator: BridgeValidator::new(),
		}
	}

	/// Register an additional provider adapter
	pub fn add_adapter(&mut self, adapter: Arc<dyn BridgeAdapter>) {
		info!("Registered provider adapter {}", adapter.provider());
		self.adapters.push(adapter);
	}

	/// Remove a provider adapter by name, returning whether one was removed
	pub fn remove_adapter(&mut self, provider: &str) -> bool {
		let before = self.adapters.len();
		self.adapters.retain(|adapter| adapter.provider() != provider);
		let removed = self.adapters.len() < before;
		if removed {
			info!("Removed provider adapter {}", provider);
		}
		removed
	}

	/// Snapshot of the registered adapters
	pub fn adapters(&self) -> Vec<Arc<dyn BridgeAdapter>> {
		self.adapters.clone()
	}

	/// Fetch routes concurrently from every provider supporting the chain pair
	///
	/// Failures are embedded in the response envelope rather than
	/// propagated, so a partial result is still a result.
	pub async fn get_routes(&self, request: &RouteRequest) -> AggregatedRoutes {
		let eligible: Vec<Arc<dyn BridgeAdapter>> = self
			.adapters
			.iter()
			.filter(|adapter| {
				adapter.supports_chain_pair(&request.source_chain, &request.target_chain)
			})
			.cloned()
			.collect();

		if eligible.is_empty() {
			debug!(
				"No providers support {} -> {}",
				request.source_chain, request.target_chain
			);
			return AggregatedRoutes::empty();
		}

		info!(
			"Fetching routes for {} -> {} from {} of {} providers",
			request.source_chain,
			request.target_chain,
			eligible.len(),
			self.adapters.len()
		);

		let fetches = eligible
			.iter()
			.map(|adapter| self.fetch_with_timeout(adapter.as_ref(), request));
		let results = join_all(fetches).await;

		let mut raw_routes = Vec::new();
		let mut errors = Vec::new();
		let mut providers_responded = 0;

		for (adapter, result) in eligible.iter().zip(results) {
			match result {
				// A provider that succeeds with zero routes was reachable but
				// had nothing viable to offer; it does not count as responded.
				Ok(routes) if routes.is_empty() => {
					debug!("Provider {} returned no routes", adapter.provider());
				},
				Ok(routes) => {
					providers_responded += 1;
					raw_routes.extend(routes);
				},
				Err(error) => {
					errors.push(error);
				},
			}
		}

		let routes = sort_routes(normalize_routes(raw_routes));

		info!(
			"Route aggregation completed: {} routes from {} of {} providers ({} errors)",
			routes.len(),
			providers_responded,
			eligible.len(),
			errors.len()
		);

		AggregatedRoutes {
			routes,
			timestamp: Utc::now(),
			providers_queried: eligible.len(),
			providers_responded,
			errors,
		}
	}

	/// Query a single provider under the per-provider timeout
	async fn fetch_with_timeout(
		&self,
		adapter: &dyn BridgeAdapter,
		request: &RouteRequest,
	) -> Result<Vec<BridgeRoute>, BridgeError> {
		let provider = adapter.provider();
		debug!("Starting route fetch from provider {}", provider);

		match timeout(self.timeout, adapter.fetch_routes(request)).await {
			Ok(Ok(routes)) => Ok(routes),
			Ok(Err(error)) => {
				warn!("Provider {} returned error: {}", provider, error);
				Err(BridgeError::from_adapter_error(provider, &error))
			},
			Err(_) => {
				let timeout_ms = self.timeout.as_millis() as u64;
				warn!("Provider {} timed out after {}ms", provider, timeout_ms);
				Err(BridgeError::from_adapter_error(
					provider,
					&AdapterError::Timeout { timeout_ms },
				))
			},
		}
	}

	/// Chains reachable from the given source chain
	pub fn compatible_chains(&self, source: &ChainId) -> Vec<ChainId> {
		self.validator.compatible_chains(source)
	}

	/// Validate an execution request before any provider is contacted
	pub fn validate_request(&self, request: &ExecutionRequest) -> ValidationResult {
		self.validator.validate_execution_request(request)
	}

	/// Validate a selected route against the execution request it should serve
	pub fn validate_route(
		&self,
		route: &NormalizedRoute,
		request: &ExecutionRequest,
	) -> ValidationResult {
		self.validator.validate_route(route, request)
	}

	/// Get aggregation statistics
	pub fn stats(&self) -> AggregatorStats {
		AggregatorStats {
			registered_adapters: self.adapters.len(),
			timeout_ms: self.timeout.as_millis() as u64,
		}
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorStats {
	pub registered_adapters: usize,
	pub timeout_ms: u64,
}

impl From<&bridge_config::Settings> for AggregatorConfig {
	fn from(settings: &bridge_config::Settings) -> Self {
		let layerzero_api_key = match settings.layerzero_api_key() {
			Ok(key) => key,
			Err(error) => {
				warn!("LayerZero API key unavailable: {}", error);
				None
			},
		};

		Self {
			providers: ProviderToggles {
				hop: settings.providers.hop,
				layerzero: settings.providers.layerzero,
				stellar: settings.providers.stellar,
			},
			layerzero_api_key,
			timeout_ms: settings.timeouts.per_provider_ms,
			adapters: None,
		}
	}
}
