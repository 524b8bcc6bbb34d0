//! Route normalization
//!
//! Raw provider routes vary in shape. Normalization resolves each one to
//! the canonical form: at least one hop, totals recomputed from the hop
//! breakdown, a batch-unique id, and a `normalized` metadata marker.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use bridge_types::fees;
use bridge_types::{BridgeRoute, Hop, NormalizedRoute, RouteMetadata, NATIVE_ASSET};

/// Normalize a batch of raw routes, preserving input order.
///
/// Ids synthesized for routes that arrived without one share a single
/// batch timestamp, so uniqueness within the batch comes from the index.
pub fn normalize_routes(routes: Vec<BridgeRoute>) -> Vec<NormalizedRoute> {
	let batch_stamp = Utc::now().timestamp_millis();

	routes
		.into_iter()
		.enumerate()
		.map(|(index, route)| normalize_route(route, batch_stamp, index))
		.collect()
}

fn normalize_route(route: BridgeRoute, batch_stamp: i64, index: usize) -> NormalizedRoute {
	let BridgeRoute {
		id,
		provider,
		source_chain,
		target_chain,
		fee,
		estimated_time_secs,
		hops,
		mut metadata,
	} = route;

	// A missing or empty breakdown means the route is one implicit hop
	// described by the top-level fields. The route's metadata describes
	// that hop, so it is carried over before the marker is added.
	let hops = match hops {
		Some(explicit) if !explicit.is_empty() => explicit,
		_ => {
			let mut hop = Hop::new(
				source_chain.clone(),
				target_chain.clone(),
				metadata_token(&metadata, "tokenIn"),
				metadata_token(&metadata, "tokenOut"),
				fee.clone(),
				estimated_time_secs,
				provider.clone(),
			);
			hop.metadata = metadata.clone();
			vec![hop]
		},
	};

	let (total_fees, skipped) = fees::sum_fees(hops.iter().map(|hop| hop.fee.as_str()));
	if skipped > 0 {
		debug!(
			"Route from {} has {} unparsable hop fees; total is a partial sum",
			provider, skipped
		);
	}

	let estimated_time_secs = hops.iter().map(|hop| hop.estimated_time_secs).sum();

	let (token_in, token_out) = match hops.as_slice() {
		[only] => (only.token_in.clone(), only.token_out.clone()),
		[first, .., last] => (first.token_in.clone(), last.token_out.clone()),
		[] => (NATIVE_ASSET.to_string(), NATIVE_ASSET.to_string()),
	};

	let id = id.unwrap_or_else(|| format!("route-{}-{}", batch_stamp, index));

	metadata.insert("normalized".to_string(), json!(true));

	NormalizedRoute {
		id,
		source_chain,
		destination_chain: target_chain,
		token_in,
		token_out,
		total_fees: total_fees.to_string(),
		estimated_time_secs,
		hops,
		adapter: provider,
		metadata,
	}
}

fn metadata_token(metadata: &RouteMetadata, key: &str) -> String {
	metadata
		.get(key)
		.and_then(|value| value.as_str())
		.unwrap_or(NATIVE_ASSET)
		.to_string()
}
