//! Tests for route normalization and ranking through the public surface

mod mocks;

use std::sync::Arc;
use std::time::Duration;

use bridge_aggregator::mocks::MockBridgeAdapter;
use bridge_aggregator::serde_json::{self, json};
use bridge_aggregator::{ChainId, RouteAggregator, NATIVE_ASSET};

use mocks::{raw_route, raw_route_with_tokens, route_request, two_hop_route};

async fn aggregate(routes: Vec<bridge_aggregator::BridgeRoute>) -> bridge_aggregator::AggregatedRoutes {
	let adapter = MockBridgeAdapter::returning("mock", routes);
	let aggregator =
		RouteAggregator::with_adapters(vec![Arc::new(adapter)], Duration::from_secs(1));
	aggregator.get_routes(&route_request()).await
}

#[tokio::test]
async fn test_hopless_route_gets_one_synthesized_hop() {
	let result = aggregate(vec![raw_route_with_tokens("mock", "2500", 180, "USDC", "USDT")]).await;

	let route = &result.routes[0];
	assert_eq!(route.hops.len(), 1);

	let hop = &route.hops[0];
	assert_eq!(hop.source_chain, ChainId::ethereum());
	assert_eq!(hop.destination_chain, ChainId::polygon());
	assert_eq!(hop.token_in, "USDC");
	assert_eq!(hop.token_out, "USDT");
	assert_eq!(hop.fee, "2500");
	assert_eq!(hop.estimated_time_secs, 180);

	assert_eq!(route.token_in, "USDC");
	assert_eq!(route.token_out, "USDT");
	assert_eq!(route.total_fees, "2500");
}

#[tokio::test]
async fn test_hopless_route_without_token_metadata_uses_native() {
	let result = aggregate(vec![raw_route("mock", "100", 60)]).await;

	let route = &result.routes[0];
	assert_eq!(route.token_in, NATIVE_ASSET);
	assert_eq!(route.token_out, NATIVE_ASSET);
}

#[tokio::test]
async fn test_multi_hop_totals_and_endpoints() {
	let result = aggregate(vec![two_hop_route("mock", ["150", "250"], [30, 45])]).await;

	let route = &result.routes[0];
	assert_eq!(route.hops.len(), 2);
	assert_eq!(route.total_fees, "400");
	assert_eq!(route.estimated_time_secs, 75);
	assert_eq!(route.token_in, route.hops[0].token_in);
	assert_eq!(route.token_out, route.hops[1].token_out);
}

#[tokio::test]
async fn test_fee_sums_survive_u64_range() {
	let result = aggregate(vec![
		two_hop_route("mock", ["999999999999999999", "1"], [10, 10])
	])
	.await;

	assert_eq!(result.routes[0].total_fees, "1000000000000000000");
}

#[tokio::test]
async fn test_ids_are_synthesized_and_unique_within_batch() {
	let result = aggregate(vec![
		raw_route("mock", "1", 10),
		raw_route("mock", "2", 20),
	])
	.await;

	let ids: Vec<&str> = result.routes.iter().map(|route| route.id.as_str()).collect();
	assert!(ids.iter().all(|id| id.starts_with("route-")));
	assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_normalized_marker_is_set() {
	let result = aggregate(vec![raw_route("mock", "1", 10)]).await;

	assert_eq!(result.routes[0].metadata.get("normalized"), Some(&json!(true)));
}

#[tokio::test]
async fn test_ranking_tiebreak_chain() {
	// Same fee everywhere; b beats c on time, c beats d on hop count,
	// d beats e on id. a wins outright on fee.
	let a = raw_route("mock", "100", 500).with_id("a");
	let b = raw_route("mock", "200", 100).with_id("b");
	let c = raw_route("mock", "200", 300).with_id("c");
	let d = two_hop_route("mock", ["100", "100"], [150, 150]).with_id("d");
	let e = two_hop_route("mock", ["100", "100"], [150, 150]).with_id("e");

	let result = aggregate(vec![e, d, c, b, a]).await;

	let ids: Vec<&str> = result.routes.iter().map(|route| route.id.as_str()).collect();
	assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_envelope_serializes_camel_case() {
	let result = aggregate(vec![raw_route_with_tokens("mock", "42", 60, "DAI", "DAI")]).await;
	let value = serde_json::to_value(&result).unwrap();

	assert_eq!(value["providersQueried"], 1);
	assert_eq!(value["providersResponded"], 1);
	assert!(value["timestamp"].is_string());

	let route = &value["routes"][0];
	assert_eq!(route["sourceChain"], "ethereum");
	assert_eq!(route["destinationChain"], "polygon");
	assert_eq!(route["tokenIn"], "DAI");
	assert_eq!(route["totalFees"], "42");
	assert_eq!(route["estimatedTimeSecs"], 60);
	assert!(route["hops"].is_array());
}
