//! Centralized fixtures for integration tests
//!
//! Route and request builders shared across test files to reduce
//! duplication.

#![allow(dead_code)]

use bridge_aggregator::serde_json::json;
use bridge_aggregator::{BridgeRoute, ChainId, Hop, RouteRequest};

/// Standard ethereum -> polygon request used by most tests
pub fn route_request() -> RouteRequest {
	RouteRequest::new(ChainId::ethereum(), ChainId::polygon())
}

/// Single-hop raw route for the standard chain pair
pub fn raw_route(provider: &str, fee: &str, estimated_time_secs: u64) -> BridgeRoute {
	BridgeRoute::new(
		provider,
		ChainId::ethereum(),
		ChainId::polygon(),
		fee,
		estimated_time_secs,
	)
}

/// Raw route with a provider-assigned id
pub fn raw_route_with_id(
	provider: &str,
	id: &str,
	fee: &str,
	estimated_time_secs: u64,
) -> BridgeRoute {
	raw_route(provider, fee, estimated_time_secs).with_id(id)
}

/// Raw route carrying token metadata, the shape providers without an
/// explicit hop breakdown report
pub fn raw_route_with_tokens(
	provider: &str,
	fee: &str,
	estimated_time_secs: u64,
	token_in: &str,
	token_out: &str,
) -> BridgeRoute {
	raw_route(provider, fee, estimated_time_secs)
		.with_metadata("tokenIn", json!(token_in))
		.with_metadata("tokenOut", json!(token_out))
}

/// Two-hop raw route routed through arbitrum
pub fn two_hop_route(provider: &str, fees: [&str; 2], times: [u64; 2]) -> BridgeRoute {
	let hops = vec![
		Hop::new(
			ChainId::ethereum(),
			ChainId::arbitrum(),
			"USDC",
			"USDC",
			fees[0],
			times[0],
			provider,
		),
		Hop::new(
			ChainId::arbitrum(),
			ChainId::polygon(),
			"USDC",
			"USDC",
			fees[1],
			times[1],
			provider,
		),
	];

	BridgeRoute::new(
		provider,
		ChainId::ethereum(),
		ChainId::polygon(),
		"0",
		times.iter().sum(),
	)
	.with_hops(hops)
}
