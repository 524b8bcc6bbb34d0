//! Hop Protocol adapter implementation
//!
//! Hop quotes one transfer at a time and reports no hop breakdown, so
//! every route it produces is an implicit single hop.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use tracing::debug;

use bridge_types::{
	AdapterError, AdapterResult, BridgeAdapter, BridgeRoute, ChainId, RouteRequest,
};

use crate::client::{build_url, ProviderClient};

const PROVIDER: &str = "hop";
const DEFAULT_API_URL: &str = "https://api.hop.exchange/v1";
const DEFAULT_TOKEN: &str = "USDC";

/// Hop quote response model
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HopQuoteResponse {
	amount_in: String,
	amount_out_min: String,
	bonder_fee: String,
	#[serde(default)]
	destination_tx_fee: Option<String>,
	estimated_received: String,
}

/// Hop Protocol adapter for EVM rollup transfers
#[derive(Debug)]
pub struct HopAdapter {
	api_url: String,
	client: ProviderClient,
	supported: HashSet<ChainId>,
}

impl HopAdapter {
	pub fn new() -> AdapterResult<Self> {
		Self::with_api_url(DEFAULT_API_URL)
	}

	/// Create an adapter pointed at a custom endpoint (staging, tests)
	pub fn with_api_url(api_url: impl Into<String>) -> AdapterResult<Self> {
		let supported = [
			ChainId::ethereum(),
			ChainId::polygon(),
			ChainId::arbitrum(),
			ChainId::optimism(),
			ChainId::gnosis(),
			ChainId::base(),
		]
		.into_iter()
		.collect();

		Ok(Self {
			api_url: api_url.into(),
			client: ProviderClient::new(PROVIDER)?,
			supported,
		})
	}

	fn map_quote(&self, quote: HopQuoteResponse, request: &RouteRequest) -> BridgeRoute {
		let token = request.token.as_deref().unwrap_or(DEFAULT_TOKEN);

		// Bonder fee plus destination tx fee when Hop reports one.
		let (total_fee, _) = bridge_types::fees::sum_fees(
			[
				Some(quote.bonder_fee.as_str()),
				quote.destination_tx_fee.as_deref(),
			]
			.into_iter()
			.flatten(),
		);

		BridgeRoute::new(
			PROVIDER,
			request.source_chain.clone(),
			request.target_chain.clone(),
			total_fee.to_string(),
			estimate_time(&request.source_chain, &request.target_chain),
		)
		.with_metadata("tokenIn", json!(token))
		.with_metadata("tokenOut", json!(token))
		.with_metadata("inputAmount", json!(quote.amount_in))
		.with_metadata("amountOutMin", json!(quote.amount_out_min))
		.with_metadata("estimatedReceived", json!(quote.estimated_received))
	}
}

/// Rough transfer time: exits to or from L1 wait on the bonder longer
/// than rollup-to-rollup moves.
fn estimate_time(source: &ChainId, target: &ChainId) -> u64 {
	let ethereum = ChainId::ethereum();
	if *source == ethereum || *target == ethereum {
		600
	} else {
		300
	}
}

#[async_trait]
impl BridgeAdapter for HopAdapter {
	fn provider(&self) -> &str {
		PROVIDER
	}

	fn supports_chain_pair(&self, source: &ChainId, target: &ChainId) -> bool {
		source != target && self.supported.contains(source) && self.supported.contains(target)
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
			"Hop adapter fetching quote for {} -> {}",
			request.source_chain, request.target_chain
		);

		let url = build_url(&self.api_url, "quote")?;
		let query = [
			(
				"amount",
				request
					.amount
					.as_ref()
					.map(|a| a.as_str().to_string())
					.unwrap_or_else(|| "0".to_string()),
			),
			(
				"token",
				request
					.token
					.clone()
					.unwrap_or_else(|| DEFAULT_TOKEN.to_string()),
			),
			("fromChain", request.source_chain.to_string()),
			("toChain", request.target_chain.to_string()),
			(
				"slippage",
				request.slippage_bps.unwrap_or(50).to_string(),
			),
		];

		let quote: HopQuoteResponse = self.client.get_json(&url, &query).await?;

		Ok(vec![self.map_quote(quote, request)])
	}
}
