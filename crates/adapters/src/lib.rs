//! Bridge Adapters
//!
//! Provider-specific adapters for the bridge route aggregator, plus the
//! shared HTTP client they are built on.

pub mod client;
pub mod hop;
pub mod layerzero;
pub mod stellar;

pub use bridge_types::{AdapterError, AdapterResult, BridgeAdapter};
pub use client::{BreakerPolicy, CircuitBreaker, CircuitState, ProviderClient, RetryPolicy};
pub use hop::HopAdapter;
pub use layerzero::LayerZeroAdapter;
pub use stellar::StellarAdapter;

use bridge_types::SecretString;
use std::sync::Arc;

/// Which built-in providers to enable when building the default set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderToggles {
	pub hop: bool,
	pub layerzero: bool,
	pub stellar: bool,
}

impl Default for ProviderToggles {
	fn default() -> Self {
		Self {
			hop: true,
			layerzero: true,
			stellar: true,
		}
	}
}

/// Build the default provider set in registration order.
///
/// LayerZero picks up the API key when one is supplied; the other
/// providers need no credentials.
pub fn default_adapters(
	toggles: &ProviderToggles,
	layerzero_api_key: Option<SecretString>,
) -> AdapterResult<Vec<Arc<dyn BridgeAdapter>>> {
	let mut adapters: Vec<Arc<dyn BridgeAdapter>> = Vec::new();

	if toggles.hop {
		adapters.push(Arc::new(HopAdapter::new()?));
	}

	if toggles.layerzero {
		let adapter = match layerzero_api_key {
			Some(key) => LayerZeroAdapter::with_api_key(key)?,
			None => LayerZeroAdapter::new()?,
		};
		adapters.push(Arc::new(adapter));
	}

	if toggles.stellar {
		adapters.push(Arc::new(StellarAdapter::new()?));
	}

	Ok(adapters)
}
