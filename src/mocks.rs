//! Mock adapters for examples and testing
//!
//! This module provides simple, configurable mock adapters that can be
//! used in tests without any network dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_types::{
	AdapterError, AdapterResult, BridgeAdapter, BridgeRoute, ChainId, RouteRequest,
};

/// Mock bridge adapter with configurable behavior
///
/// Supports call tracking, canned routes, response delays for timeout
/// testing and failure simulation. Unless restricted with
/// [`with_chain_pair`](Self::with_chain_pair), every chain pair is
/// supported.
#[derive(Debug, Clone)]
pub struct MockBridgeAdapter {
	pub provider: String,
	pub routes: Vec<BridgeRoute>,
	pub should_fail: bool,
	pub response_delay_ms: u64,
	pub supported_pair: Option<(ChainId, ChainId)>,
	call_tracker: Arc<AtomicUsize>,
}

impl MockBridgeAdapter {
	/// Create a mock adapter that succeeds with no routes
	pub fn new(provider: &str) -> Self {
		Self {
			provider: provider.to_string(),
			routes: Vec::new(),
			should_fail: false,
			response_delay_ms: 0,
			supported_pair: None,
			call_tracker: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Create a mock adapter that returns the given routes
	pub fn returning(provider: &str, routes: Vec<BridgeRoute>) -> Self {
		Self {
			routes,
			..Self::new(provider)
		}
	}

	/// Create a mock adapter that always fails
	pub fn failing(provider: &str) -> Self {
		Self {
			should_fail: true,
			..Self::new(provider)
		}
	}

	/// Create a mock adapter that sleeps before returning the given routes
	pub fn sleeping(provider: &str, response_delay_ms: u64, routes: Vec<BridgeRoute>) -> Self {
		Self {
			routes,
			response_delay_ms,
			..Self::new(provider)
		}
	}

	/// Restrict the adapter to a single chain pair
	pub fn with_chain_pair(mut self, source: ChainId, target: ChainId) -> Self {
		self.supported_pair = Some((source, target));
		self
	}

	/// Number of times `fetch_routes` has been called
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	/// Reset the call counter
	pub fn reset_calls(&self) {
		self.call_tracker.store(0, Ordering::Relaxed);
	}
}

#[async_trait]
impl BridgeAdapter for MockBridgeAdapter {
	fn provider(&self) -> &str {
		&self.provider
	}

	fn supports_chain_pair(&self, source: &ChainId, target: &ChainId) -> bool {
		match &self.supported_pair {
			Some((s, t)) => s == source && t == target,
			None => true,
		}
	}

	async fn fetch_routes(&self, _request: &RouteRequest) -> AdapterResult<Vec<BridgeRoute>> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
		}

		if self.should_fail {
			return Err(AdapterError::ProviderError {
				code: "MOCK_FAILURE".to_string(),
				message: format!("Adapter {} configured to fail", self.provider),
			});
		}

		Ok(self.routes.clone())
	}
}

/// Build a simple single-hop raw route for tests
pub fn mock_route(provider: &str, fee: &str, estimated_time_secs: u64) -> BridgeRoute {
	BridgeRoute::new(
		provider,
		ChainId::ethereum(),
		ChainId::polygon(),
		fee,
		estimated_time_secs,
	)
}
