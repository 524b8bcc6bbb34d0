//! Route and execution request models

use serde::{Deserialize, Serialize};

use crate::chains::ChainId;
use crate::models::Amount;

/// Request for candidate routes between two chains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
	pub source_chain: ChainId,
	pub target_chain: ChainId,

	/// Asset to bridge, when the caller has picked one
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,

	/// Amount to bridge in base units
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,

	/// Address initiating the transfer
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_address: Option<String>,

	/// Acceptable slippage in basis points
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slippage_bps: Option<u32>,
}

impl RouteRequest {
	pub fn new(source_chain: ChainId, target_chain: ChainId) -> Self {
		Self {
			source_chain,
			target_chain,
			token: None,
			amount: None,
			user_address: None,
			slippage_bps: None,
		}
	}

	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	pub fn with_amount(mut self, amount: impl Into<Amount>) -> Self {
		self.amount = Some(amount.into());
		self
	}

	pub fn with_user_address(mut self, user_address: impl Into<String>) -> Self {
		self.user_address = Some(user_address.into());
		self
	}

	pub fn with_slippage_bps(mut self, slippage_bps: u32) -> Self {
		self.slippage_bps = Some(slippage_bps);
		self
	}
}

/// Request to execute a transfer along a previously selected route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
	pub source_chain: ChainId,
	pub target_chain: ChainId,

	/// Asset to bridge
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,

	/// Amount to bridge in base units
	pub amount: Amount,

	/// Address initiating the transfer
	pub user_address: String,

	/// Destination address, when different from the sender
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub recipient: Option<String>,
}

impl ExecutionRequest {
	pub fn new(
		source_chain: ChainId,
		target_chain: ChainId,
		amount: impl Into<Amount>,
		user_address: impl Into<String>,
	) -> Self {
		Self {
			source_chain,
			target_chain,
			token: None,
			amount: amount.into(),
			user_address: user_address.into(),
			recipient: None,
		}
	}

	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
		self.recipient = Some(recipient.into());
		self
	}
}
