//! LayerZero adapter implementation
//!
//! LayerZero quotes can span several messaging legs, so responses carry
//! an explicit step breakdown that maps onto route hops.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use tracing::debug;

use bridge_types::{
	AdapterError, AdapterResult, BridgeAdapter, BridgeRoute, ChainId, Hop, RouteRequest,
	SecretString,
};

use crate::client::{build_url, ProviderClient};

const PROVIDER: &str = "layerzero";
const DEFAULT_API_URL: &str = "https://api.layerzero.exchange/v2";
const API_KEY_HEADER: &str = "x-layerzero-api-key";

/// LayerZero quote request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerZeroQuoteRequest {
	src_chain: String,
	dst_chain: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	token: Option<String>,
	amount: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	slippage_bps: Option<u32>,
}

/// LayerZero quote response models
#[derive(Debug, Clone, Deserialize)]
struct LayerZeroQuoteResponse {
	routes: Vec<LayerZeroRoute>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerZeroRoute {
	#[serde(default)]
	route_id: Option<String>,
	fee: String,
	eta_secs: u64,
	#[serde(default)]
	steps: Vec<LayerZeroStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerZeroStep {
	src_chain: String,
	dst_chain: String,
	token_in: String,
	token_out: String,
	fee: String,
	eta_secs: u64,
}

/// LayerZero adapter for EVM message-passing transfers
#[derive(Debug)]
pub struct LayerZeroAdapter {
	api_url: String,
	api_key: Option<SecretString>,
	client: ProviderClient,
	supported: HashSet<ChainId>,
}

impl LayerZeroAdapter {
	pub fn new() -> AdapterResult<Self> {
		Self::with_config(DEFAULT_API_URL, None)
	}

	/// Create an adapter that authenticates with the given API key
	pub fn with_api_key(api_key: SecretString) -> AdapterResult<Self> {
		Self::with_config(DEFAULT_API_URL, Some(api_key))
	}

	/// Create an adapter with a custom endpoint and optional API key
	pub fn with_config(
		api_url: impl Into<String>,
		api_key: Option<SecretString>,
	) -> AdapterResult<Self> {
		Ok(Self {
			api_url: api_url.into(),
			api_key,
			client: ProviderClient::new(PROVIDER)?,
			supported: ChainId::evm_mainnets().into_iter().collect(),
		})
	}

	fn map_route(&self, route: LayerZeroRoute, request: &RouteRequest) -> BridgeRoute {
		let LayerZeroRoute {
			route_id,
			fee,
			eta_secs,
			steps,
		} = route;

		let hops: Vec<Hop> = steps
			.into_iter()
			.map(|step| {
				Hop::new(
					ChainId::new(step.src_chain),
					ChainId::new(step.dst_chain),
					step.token_in,
					step.token_out,
					step.fee,
					step.eta_secs,
					PROVIDER,
				)
			})
			.collect();

		let mut mapped = BridgeRoute::new(
			PROVIDER,
			request.source_chain.clone(),
			request.target_chain.clone(),
			fee,
			eta_secs,
		);

		if let Some(id) = route_id {
			mapped = mapped.with_id(id);
		}
		if !hops.is_empty() {
			mapped = mapped.with_hops(hops);
		}
		if let Some(amount) = &request.amount {
			mapped = mapped.with_metadata("inputAmount", json!(amount.as_str()));
		}
		if let Some(token) = &request.token {
			mapped = mapped
				.with_metadata("tokenIn", json!(token))
				.with_metadata("tokenOut", json!(token));
		}

		mapped
	}
}

#[async_trait]
impl BridgeAdapter for LayerZeroAdapter {
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
			"LayerZero adapter fetching quotes for {} -> {} (authenticated: {})",
			request.source_chain,
			request.target_chain,
			self.api_key.is_some()
		);

		let url = build_url(&self.api_url, "quotes")?;
		let body = LayerZeroQuoteRequest {
			src_chain: request.source_chain.to_string(),
			dst_chain: request.target_chain.to_string(),
			token: request.token.clone(),
			amount: request
				.amount
				.as_ref()
				.map(|a| a.as_str().to_string())
				.unwrap_or_else(|| "0".to_string()),
			slippage_bps: request.slippage_bps,
		};

		let response: LayerZeroQuoteResponse = match &self.api_key {
			Some(key) => {
				self.client
					.post_json_with_header(&url, API_KEY_HEADER, key.expose_secret(), &body)
					.await?
			},
			None => self.client.post_json(&url, &body).await?,
		};

		Ok(response
			.routes
			.into_iter()
			.map(|route| self.map_route(route, request))
			.collect())
	}
}
