//! Chain identifiers
//!
//! Chains are identified by lowercase slugs (e.g. "ethereum", "stellar")
//! rather than numeric chain IDs, since the aggregator spans non-EVM
//! networks that have no EIP-155 identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a blockchain network, normalized to a lowercase slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String")]
pub struct ChainId(String);

impl ChainId {
	/// Creates a chain identifier, trimming whitespace and lowercasing.
	pub fn new(slug: impl Into<String>) -> Self {
		Self(slug.into().trim().to_ascii_lowercase())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for ChainId {
	fn from(slug: String) -> Self {
		Self::new(slug)
	}
}

impl From<&str> for ChainId {
	fn from(slug: &str) -> Self {
		Self::new(slug)
	}
}

impl std::str::FromStr for ChainId {
	type Err = std::convert::Infallible;

	fn from_str(slug: &str) -> Result<Self, Self::Err> {
		Ok(Self::new(slug))
	}
}

/// Common chain constants
impl ChainId {
	pub fn ethereum() -> Self {
		Self::new("ethereum")
	}

	pub fn polygon() -> Self {
		Self::new("polygon")
	}

	pub fn arbitrum() -> Self {
		Self::new("arbitrum")
	}

	pub fn optimism() -> Self {
		Self::new("optimism")
	}

	pub fn gnosis() -> Self {
		Self::new("gnosis")
	}

	pub fn base() -> Self {
		Self::new("base")
	}

	pub fn avalanche() -> Self {
		Self::new("avalanche")
	}

	pub fn bsc() -> Self {
		Self::new("bsc")
	}

	pub fn stellar() -> Self {
		Self::new("stellar")
	}

	/// EVM mainnets known to the default provider set.
	pub fn evm_mainnets() -> Vec<Self> {
		vec![
			Self::ethereum(),
			Self::polygon(),
			Self::arbitrum(),
			Self::optimism(),
			Self::gnosis(),
			Self::base(),
			Self::avalanche(),
			Self::bsc(),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_chain_id_normalizes_case_and_whitespace() {
		assert_eq!(ChainId::new("  Ethereum "), ChainId::ethereum());
		assert_eq!(ChainId::new("POLYGON").as_str(), "polygon");
	}

	#[test]
	fn test_chain_id_serde_round_trip() {
		let json = serde_json::to_string(&ChainId::stellar()).unwrap();
		assert_eq!(json, "\"stellar\"");

		let parsed: ChainId = serde_json::from_str("\"Arbitrum\"").unwrap();
		assert_eq!(parsed, ChainId::arbitrum());
	}
}
