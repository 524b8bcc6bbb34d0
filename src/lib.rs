//! Bridge Aggregator Library
//!
//! A multi-provider bridge route aggregator: queries bridge providers
//! concurrently, normalizes their heterogeneous route shapes into one
//! schema, and returns a deterministically ranked route list with
//! partial-failure tolerance.

// Core domain types - the most commonly used types
pub use bridge_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Core types
	AdapterError,
	AdapterResult,
	AggregatedRoutes,
	Amount,
	BridgeAdapter,
	BridgeError,
	BridgeRoute,
	ChainId,
	ExecutionRequest,
	Hop,
	NormalizedRoute,
	RouteMetadata,
	RouteRequest,
	SecretString,
	ValidationResult,
	NATIVE_ASSET,
};

// Service layer
pub use bridge_service::{
	normalize_routes, sort_routes, AggregatorConfig, AggregatorStats, BridgeValidator,
	RouteAggregator, DEFAULT_TIMEOUT_MS,
};

// Adapters
pub use bridge_adapters::{
	default_adapters, HopAdapter, LayerZeroAdapter, ProviderToggles, StellarAdapter,
};

// Config
pub use bridge_config::{load_config, LogFormat, LoggingSettings, Settings};

// Module aliases for qualified access
pub mod types {
	pub use bridge_types::*;
}

pub mod adapters {
	pub use bridge_adapters::*;
}

pub mod config {
	pub use bridge_config::*;
}

pub mod service {
	pub use bridge_service::*;
}

pub mod mocks;

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// Re-export external dependencies for downstream tests and examples
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the aggregator
///
/// ```no_run
/// # use bridge_aggregator::AggregatorBuilder;
/// # use std::time::Duration;
/// let aggregator = AggregatorBuilder::new()
/// 	.with_timeout(Duration::from_secs(5))
/// 	.build()
/// 	.unwrap();
/// ```
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	timeout: Option<Duration>,
	extra_adapters: Vec<Arc<dyn BridgeAdapter>>,
	use_default_adapters: bool,
}

impl AggregatorBuilder {
	/// Create a builder with the default provider set
	pub fn new() -> Self {
		Self {
			settings: None,
			timeout: None,
			extra_adapters: Vec::new(),
			use_default_adapters: true,
		}
	}

	/// Use the given settings instead of defaults
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Override the per-provider timeout
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Register an additional provider adapter
	pub fn with_adapter(mut self, adapter: Arc<dyn BridgeAdapter>) -> Self {
		self.extra_adapters.push(adapter);
		self
	}

	/// Skip the built-in providers; only adapters added through
	/// [`with_adapter`](Self::with_adapter) are registered
	pub fn without_default_adapters(mut self) -> Self {
		self.use_default_adapters = false;
		self
	}

	/// Build the aggregator
	pub fn build(self) -> AdapterResult<RouteAggregator> {
		let settings = self.settings.unwrap_or_default();
		let mut config = AggregatorConfig::from(&settings);
		if let Some(timeout) = self.timeout {
			config.timeout_ms = timeout.as_millis() as u64;
		}

		let mut adapters = if self.use_default_adapters {
			default_adapters(&config.providers, config.layerzero_api_key.take())?
		} else {
			Vec::new()
		};
		adapters.extend(self.extra_adapters);

		info!(
			"Aggregator configured with {} provider adapter(s), {}ms per-provider timeout",
			adapters.len(),
			config.timeout_ms
		);

		Ok(RouteAggregator::with_adapters(
			adapters,
			Duration::from_millis(config.timeout_ms),
		))
	}
}

impl Default for AggregatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Initialize tracing with configuration-based settings
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(logging: &LoggingSettings) {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::fmt()
				.json()
				.with_env_filter(env_filter)
				.init();
		},
		LogFormat::Pretty => {
			tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter)
				.init();
		},
		LogFormat::Compact => {
			tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter)
				.init();
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}",
		logging.level, logging.format
	);
}
