//! Core route domain models
//!
//! Raw routes come back from provider adapters in whatever shape the
//! provider reports; normalized routes are the canonical form the
//! aggregator hands to callers.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::adapters::AdapterError;
use crate::chains::ChainId;
use crate::fees;

/// Free-form provider metadata carried alongside a route.
pub type RouteMetadata = HashMap<String, serde_json::Value>;

/// Sentinel asset identifier used when a provider does not report which
/// token a hop moves.
pub const NATIVE_ASSET: &str = "native";

/// A single transfer step within a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
	pub source_chain: ChainId,
	pub destination_chain: ChainId,
	/// Asset entering the hop
	pub token_in: String,
	/// Asset leaving the hop
	pub token_out: String,
	/// Hop fee in base units, as a decimal string
	pub fee: String,
	/// Estimated duration of this hop in seconds
	pub estimated_time_secs: u64,
	/// Provider executing this hop
	pub adapter: String,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub metadata: RouteMetadata,
}

impl Hop {
	pub fn new(
		source_chain: ChainId,
		destination_chain: ChainId,
		token_in: impl Into<String>,
		token_out: impl Into<String>,
		fee: impl Into<String>,
		estimated_time_secs: u64,
		adapter: impl Into<String>,
	) -> Self {
		Self {
			source_chain,
			destination_chain,
			token_in: token_in.into(),
			token_out: token_out.into(),
			fee: fee.into(),
			estimated_time_secs,
			adapter: adapter.into(),
			metadata: HashMap::new(),
		}
	}

	pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.metadata.insert(key.into(), value);
		self
	}
}

/// A route as reported by a provider adapter.
///
/// A route either carries an explicit hop breakdown or is a single
/// implicit hop described by its top-level fields; normalization resolves
/// the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRoute {
	/// Provider-assigned identifier, if any
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,

	/// Provider that produced this route
	pub provider: String,

	pub source_chain: ChainId,
	pub target_chain: ChainId,

	/// Total fee in base units, as a decimal string
	pub fee: String,

	/// Estimated end-to-end duration in seconds
	pub estimated_time_secs: u64,

	/// Explicit hop breakdown, when the provider reports one
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hops: Option<Vec<Hop>>,

	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub metadata: RouteMetadata,
}

impl BridgeRoute {
	/// Create a single-hop route with the given parameters
	pub fn new(
		provider: impl Into<String>,
		source_chain: ChainId,
		target_chain: ChainId,
		fee: impl Into<String>,
		estimated_time_secs: u64,
	) -> Self {
		Self {
			id: None,
			provider: provider.into(),
			source_chain,
			target_chain,
			fee: fee.into(),
			estimated_time_secs,
			hops: None,
			metadata: HashMap::new(),
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_hops(mut self, hops: Vec<Hop>) -> Self {
		self.hops = Some(hops);
		self
	}

	pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.metadata.insert(key.into(), value);
		self
	}
}

/// Canonical route shape produced by normalization.
///
/// Invariants: `hops` is never empty, `token_in`/`token_out` mirror the
/// first and last hop, and `total_fees` is the sum of the parseable hop
/// fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRoute {
	/// Stable identifier, unique within one aggregation batch
	pub id: String,

	pub source_chain: ChainId,
	pub destination_chain: ChainId,

	/// Asset entering the first hop
	pub token_in: String,
	/// Asset leaving the last hop
	pub token_out: String,

	/// Sum of hop fees in base units, as a decimal string
	pub total_fees: String,

	/// Sum of hop durations in seconds
	pub estimated_time_secs: u64,

	pub hops: Vec<Hop>,

	/// Provider that produced this route
	pub adapter: String,

	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub metadata: RouteMetadata,
}

impl NormalizedRoute {
	/// Fee as a percentage of the input amount recorded in metadata,
	/// clamped to 0..=100. The estimated output is the input minus the
	/// total fees; without an input amount this returns 0.
	pub fn fee_percentage(&self) -> f64 {
		let input_amount = self
			.metadata
			.get("inputAmount")
			.and_then(|value| value.as_str())
			.unwrap_or("0");

		let (Some(input), Some(total)) = (
			fees::parse_fee(input_amount),
			fees::parse_fee(&self.total_fees),
		) else {
			return 0.0;
		};

		let output = if total >= input {
			BigUint::from(0u32)
		} else {
			&input - &total
		};

		fees::fee_percentage(input_amount, &output.to_string())
	}
}

/// Failure record for a provider that was queried but produced no routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeError {
	/// Provider that failed
	pub provider: String,
	/// Human-readable failure description
	pub error: String,
	/// Machine-readable code, when the failure carries one
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
}

impl BridgeError {
	pub fn new(provider: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			provider: provider.into(),
			error: error.into(),
			code: None,
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}

	/// Builds the failure record for an adapter error, preserving its code.
	pub fn from_adapter_error(provider: &str, error: &AdapterError) -> Self {
		Self {
			provider: provider.to_string(),
			error: error.to_string(),
			code: error.code(),
		}
	}
}

/// Aggregation envelope: ranked routes plus provenance for the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRoutes {
	/// Normalized routes in ranked order
	pub routes: Vec<NormalizedRoute>,

	/// When aggregation completed
	pub timestamp: DateTime<Utc>,

	/// Number of providers eligible for the requested chain pair
	pub providers_queried: usize,

	/// Number of providers that returned at least one route
	pub providers_responded: usize,

	/// Per-provider failure records for this call
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<BridgeError>,
}

impl AggregatedRoutes {
	/// Empty result for a request no provider can serve.
	pub fn empty() -> Self {
		Self {
			routes: Vec::new(),
			timestamp: Utc::now(),
			providers_queried: 0,
			providers_responded: 0,
			errors: Vec::new(),
		}
	}

	/// True when at least one queried provider failed to produce routes.
	pub fn is_partial(&self) -> bool {
		self.providers_responded < self.providers_queried
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn create_test_route() -> NormalizedRoute {
		NormalizedRoute {
			id: "route-1700000000000-0".to_string(),
			source_chain: ChainId::ethereum(),
			destination_chain: ChainId::polygon(),
			token_in: "USDC".to_string(),
			token_out: "USDC".to_string(),
			total_fees: "3000000".to_string(),
			estimated_time_secs: 300,
			hops: vec![Hop::new(
				ChainId::ethereum(),
				ChainId::polygon(),
				"USDC",
				"USDC",
				"3000000",
				300,
				"hop",
			)],
			adapter: "hop".to_string(),
			metadata: HashMap::new(),
		}
	}

	#[test]
	fn test_route_serde_uses_camel_case() {
		let route = BridgeRoute::new(
			"hop",
			ChainId::ethereum(),
			ChainId::polygon(),
			"1000",
			120,
		);
		let json = serde_json::to_value(&route).unwrap();

		assert_eq!(json["sourceChain"], "ethereum");
		assert_eq!(json["targetChain"], "polygon");
		assert_eq!(json["estimatedTimeSecs"], 120);
		assert!(json.get("hops").is_none());
		assert!(json.get("id").is_none());
	}

	#[test]
	fn test_fee_percentage_reads_input_amount_metadata() {
		let mut route = create_test_route();
		route
			.metadata
			.insert("inputAmount".to_string(), json!("1000000000"));

		// 3_000_000 of 1_000_000_000 is 0.3%.
		assert_eq!(route.fee_percentage(), 0.3);
	}

	#[test]
	fn test_fee_percentage_without_input_amount_is_zero() {
		let route = create_test_route();
		assert_eq!(route.fee_percentage(), 0.0);
	}

	#[test]
	fn test_fee_percentage_caps_when_fees_exceed_input() {
		let mut route = create_test_route();
		route.metadata.insert("inputAmount".to_string(), json!("1000"));

		// Fees above the input leave no output at all.
		assert_eq!(route.fee_percentage(), 100.0);
	}

	#[test]
	fn test_aggregated_routes_partial_detection() {
		let mut result = AggregatedRoutes::empty();
		assert!(!result.is_partial());

		result.providers_queried = 3;
		result.providers_responded = 2;
		assert!(result.is_partial());
	}

	#[test]
	fn test_bridge_error_from_adapter_error_keeps_code() {
		let err = AdapterError::Timeout { timeout_ms: 15000 };
		let record = BridgeError::from_adapter_error("hop", &err);

		assert_eq!(record.provider, "hop");
		assert_eq!(record.code.as_deref(), Some("TIMEOUT"));
		assert!(record.error.contains("15000"));
	}
}
