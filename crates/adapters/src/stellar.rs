//! Stellar anchor adapter implementation
//!
//! Bridges between Stellar and a small set of EVM chains through anchor
//! paths. Paths come back flat, so routes stay implicit single hops with
//! the asset pair recorded in metadata.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use tracing::debug;

use bridge_types::{
	AdapterError, AdapterResult, BridgeAdapter, BridgeRoute, ChainId, RouteRequest,
};

use crate::client::{build_url, ProviderClient};

const PROVIDER: &str = "stellar";
const DEFAULT_API_URL: &str = "https://bridge.stellar.exchange/v1";

/// Stellar paths response models
#[derive(Debug, Clone, Deserialize)]
struct StellarPathsResponse {
	paths: Vec<StellarPath>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StellarPath {
	source_asset: String,
	destination_asset: String,
	fee: String,
	estimated_time_secs: u64,
}

/// Stellar anchor adapter
#[derive(Debug)]
pub struct StellarAdapter {
	api_url: String,
	client: ProviderClient,
	counterparties: HashSet<ChainId>,
}

impl StellarAdapter {
	pub fn new() -> AdapterResult<Self> {
		Self::with_api_url(DEFAULT_API_URL)
	}

	/// Create an adapter pointed at a custom endpoint (staging, tests)
	pub fn with_api_url(api_url: impl Into<String>) -> AdapterResult<Self> {
		let counterparties = [ChainId::ethereum(), ChainId::polygon(), ChainId::base()]
			.into_iter()
			.collect();

		Ok(Self {
			api_url: api_url.into(),
			client: ProviderClient::new(PROVIDER)?,
			counterparties,
		})
	}

	fn map_path(&self, path: StellarPath, request: &RouteRequest) -> BridgeRoute {
		let mut mapped = BridgeRoute::new(
			PROVIDER,
			request.source_chain.clone(),
			request.target_chain.clone(),
			path.fee,
			path.estimated_time_secs,
		)
		.with_metadata("tokenIn", json!(path.source_asset))
		.with_metadata("tokenOut", json!(path.destination_asset));

		if let Some(amount) = &request.amount {
			mapped = mapped.with_metadata("inputAmount", json!(amount.as_str()));
		}

		mapped
	}
}

#[async_trait]
impl BridgeAdapter for StellarAdapter {
	fn provider(&self) -> &str {
		PROVIDER
	}

	fn supports_chain_pair(&self, source: &ChainId, target: &ChainId) -> bool {
		let stellar = ChainId::stellar();

		(*source == stellar && self.counterparties.contains(target))
			|| (*target == stellar && self.counterparties.contains(source))
	}

	async fn fetch_routes(&self, request: &RouteRequest) -> AdapterResult<Vec<BridgeRoute>> {
		if !self.supports_chain_pair(&request.source_chain, &request.target_chain) {
			return Err(AdapterError::ChainPairNotSupported {
				provider: PROVIDER.to_string(),
				source_chain: request.source_chain.clone(),
				target_chain: request.target_chain.clone(),
			});
		}

		debug!(
			"Stellar adapter fetching paths for {} -> {}",
			request.source_chain, request.target_chain
		);

		let url = build_url(&self.api_url, "paths")?;
		let query = [
			("sourceChain", request.source_chain.to_string()),
			("destinationChain", request.target_chain.to_string()),
			(
				"asset",
				request.token.clone().unwrap_or_else(|| "XLM".to_string()),
			),
			(
				"amount",
				request
					.amount
					.as_ref()
					.map(|a| a.as_str().to_string())
					.unwrap_or_else(|| "0".to_string()),
			),
		];

		let response: StellarPathsResponse = self.client.get_json(&url, &query).await?;

		Ok(response
			.paths
			.into_iter()
			.map(|path| self.map_path(path, request))
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_adapter() -> StellarAdapter {
		StellarAdapter::new().unwrap()
	}

	#[test]
	fn test_supported_pairs_require_stellar_leg() {
		let adapter = create_test_adapter();

		assert!(adapter.supports_chain_pair(&ChainId::stellar(), &ChainId::ethereum()));
		assert!(adapter.supports_chain_pair(&ChainId::base(), &ChainId::stellar()));
		assert!(!adapter.supports_chain_pair(&ChainId::stellar(), &ChainId::stellar()));
		assert!(!adapter.supports_chain_pair(&ChainId::ethereum(), &ChainId::polygon()));
		assert!(!adapter.supports_chain_pair(&ChainId::stellar(), &ChainId::arbitrum()));
	}

	#[test]
	fn test_map_path_records_asset_pair_in_metadata() {
		let adapter = create_test_adapter();
		let path: StellarPath = serde_json::from_value(json!({
			"sourceAsset": "XLM",
			"destinationAsset": "WXLM",
			"fee": "150000",
			"estimatedTimeSecs": 45
		}))
		.unwrap();

		let request = RouteRequest::new(ChainId::stellar(), ChainId::ethereum())
			.with_amount("20000000");
		let route = adapter.map_path(path, &request);

		assert_eq!(route.provider, "stellar");
		assert_eq!(route.hops, None);
		assert_eq!(route.metadata["tokenIn"], json!("XLM"));
		assert_eq!(route.metadata["tokenOut"], json!("WXLM"));
		assert_eq!(route.metadata["inputAmount"], json!("20000000"));
	}

	#[tokio::test]
	async fn test_fetch_routes_rejects_evm_only_pair() {
		let adapter = create_test_adapter();
		let request = RouteRequest::new(ChainId::ethereum(), ChainId::polygon());

		let err = adapter.fetch_routes(&request).await.unwrap_err();
		assert!(matches!(err, AdapterError::ChainPairNotSupported { .. }));
	}
}
