//! Request and route validation
//!
//! Validation is advisory: route aggregation never gates on it. Callers
//! run these checks before executing a transfer along a selected route,
//! and get every problem back at once rather than the first one found.

use std::collections::HashMap;

use bridge_types::fees;
use bridge_types::{ChainId, ExecutionRequest, NormalizedRoute, ValidationResult};

/// Validates execution requests and selected routes against a chain
/// compatibility table.
#[derive(Debug, Clone)]
pub struct BridgeValidator {
	compatibility: HashMap<ChainId, Vec<ChainId>>,
}

impl BridgeValidator {
	/// Validator over the default compatibility table: EVM mainnets are
	/// fully connected, Stellar reaches a subset of them.
	pub fn new() -> Self {
		Self {
			compatibility: default_compatibility(),
		}
	}

	/// Validator over a custom compatibility table.
	pub fn with_compatibility(compatibility: HashMap<ChainId, Vec<ChainId>>) -> Self {
		Self { compatibility }
	}

	/// Chains reachable from `source`. Unknown chains reach nothing.
	pub fn compatible_chains(&self, source: &ChainId) -> Vec<ChainId> {
		self.compatibility.get(source).cloned().unwrap_or_default()
	}

	pub fn is_compatible(&self, source: &ChainId, target: &ChainId) -> bool {
		self.compatibility
			.get(source)
			.map(|targets| targets.contains(target))
			.unwrap_or(false)
	}

	/// Validate an execution request before quoting or executing it.
	pub fn validate_execution_request(&self, request: &ExecutionRequest) -> ValidationResult {
		let mut result = ValidationResult::ok();

		if request.source_chain == request.target_chain {
			result.push_error("source and target chains must differ");
		} else if !self.is_compatible(&request.source_chain, &request.target_chain) {
			result.push_error(format!(
				"no known bridge connects {} to {}",
				request.source_chain, request.target_chain
			));
		}

		match request.amount.validate() {
			Err(reason) => result.push_error(format!("invalid amount: {}", reason)),
			Ok(()) if request.amount.is_zero() => {
				result.push_error("amount must be greater than zero");
			},
			Ok(()) => {},
		}

		if !is_plausible_address(&request.source_chain, &request.user_address) {
			result.push_error(format!(
				"user address is not valid for {}",
				request.source_chain
			));
		}

		if let Some(recipient) = &request.recipient {
			if !is_plausible_address(&request.target_chain, recipient) {
				result.push_error(format!(
					"recipient address is not valid for {}",
					request.target_chain
				));
			}
		}

		result
	}

	/// Validate a selected route against the request it should serve.
	pub fn validate_route(
		&self,
		route: &NormalizedRoute,
		request: &ExecutionRequest,
	) -> ValidationResult {
		let mut result = ValidationResult::ok();

		if route.source_chain != request.source_chain {
			result.push_error(format!(
				"route starts on {} but the request starts on {}",
				route.source_chain, request.source_chain
			));
		}

		if route.destination_chain != request.target_chain {
			result.push_error(format!(
				"route ends on {} but the request targets {}",
				route.destination_chain, request.target_chain
			));
		}

		match route.hops.as_slice() {
			[] => result.push_error("route has no hops"),
			hops => {
				if let Some(first) = hops.first() {
					if first.source_chain != route.source_chain {
						result.push_error(
							"first hop does not start on the route's source chain",
						);
					}
				}

				if let Some(last) = hops.last() {
					if last.destination_chain != route.destination_chain {
						result.push_error(
							"last hop does not end on the route's destination chain",
						);
					}
				}

				for (index, pair) in hops.windows(2).enumerate() {
					if pair[0].destination_chain != pair[1].source_chain {
						result.push_error(format!(
							"hop {} ends on {} but hop {} starts on {}",
							index,
							pair[0].destination_chain,
							index + 1,
							pair[1].source_chain
						));
					}
				}
			},
		}

		if fees::parse_fee(&route.total_fees).is_none() {
			result.push_error("route total fees are not a valid amount");
		}

		result
	}
}

impl Default for BridgeValidator {
	fn default() -> Self {
		Self::new()
	}
}

fn default_compatibility() -> HashMap<ChainId, Vec<ChainId>> {
	let mut map = HashMap::new();
	let evm = ChainId::evm_mainnets();

	for source in &evm {
		let targets: Vec<ChainId> = evm.iter().filter(|c| *c != source).cloned().collect();
		map.insert(source.clone(), targets);
	}

	// Stellar anchors reach a subset of EVM chains, in both directions.
	let stellar = ChainId::stellar();
	let counterparties = vec![ChainId::ethereum(), ChainId::polygon(), ChainId::base()];

	for chain in &counterparties {
		if let Some(targets) = map.get_mut(chain) {
			targets.push(stellar.clone());
		}
	}
	map.insert(stellar, counterparties);

	map
}

/// Cheap shape check per chain family; not an on-chain account lookup.
fn is_plausible_address(chain: &ChainId, address: &str) -> bool {
	if *chain == ChainId::stellar() {
		return address.len() == 56
			&& address.starts_with('G')
			&& address
				.chars()
				.all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
	}

	if ChainId::evm_mainnets().contains(chain) {
		let hex = match address.strip_prefix("0x") {
			Some(hex) => hex,
			None => return false,
		};
		return hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit());
	}

	// Unknown chain families only get a non-empty check.
	!address.is_empty()
}
