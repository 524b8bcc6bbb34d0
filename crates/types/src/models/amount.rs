//! Amount model for handling base-unit token quantities as strings

use num_bigint::BigUint;
use serde;

use crate::fees;

/// Token amount in base units, represented as a decimal string to
/// preserve precision.
///
/// On-chain amounts routinely exceed `u128` (18-decimal tokens), so the
/// canonical representation stays textual and arithmetic goes through
/// [`BigUint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(pub String);

impl Amount {
	/// Create a new Amount from a string
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Get the raw string value
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Parse into an arbitrary-precision integer, if well-formed.
	pub fn to_biguint(&self) -> Option<BigUint> {
		fees::parse_fee(&self.0)
	}

	/// Check if the value is zero
	pub fn is_zero(&self) -> bool {
		!self.0.is_empty() && self.0.chars().all(|c| c == '0')
	}

	/// Validate that the string contains only digits
	pub fn validate(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("amount cannot be empty".to_string());
		}

		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err("amount must contain only digits".to_string());
		}

		Ok(())
	}
}

impl std::fmt::Display for Amount {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for Amount {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Amount {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

// Custom Serde implementation to serialize/deserialize as string
impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		let amount = Self(value);
		amount.validate().map_err(serde::de::Error::custom)?;
		Ok(amount)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_amount_creation() {
		let val = Amount::new("1000000000000000000");
		assert_eq!(val.as_str(), "1000000000000000000");
	}

	#[test]
	fn test_amount_validation() {
		assert!(Amount::new("1234567890").validate().is_ok());
		assert!(Amount::new("abc123").validate().is_err());
		assert!(Amount::new("").validate().is_err());
		assert!(Amount::new("-5").validate().is_err());
	}

	#[test]
	fn test_amount_is_zero() {
		assert!(Amount::new("0").is_zero());
		assert!(Amount::new("000").is_zero());
		assert!(!Amount::new("1").is_zero());
		assert!(!Amount::new("").is_zero());
	}

	#[test]
	fn test_amount_to_biguint() {
		let val = Amount::new("340282366920938463463374607431768211457");
		let parsed = val.to_biguint().unwrap();
		assert_eq!(parsed.to_string(), "340282366920938463463374607431768211457");

		assert!(Amount::new("12.5").to_biguint().is_none());
	}

	#[test]
	fn test_amount_serde_validation() {
		let val: Amount = serde_json::from_str("\"123456789\"").unwrap();
		assert_eq!(val.as_str(), "123456789");

		assert!(serde_json::from_str::<Amount>("\"abc123\"").is_err());
		assert!(serde_json::from_str::<Amount>("\"\"").is_err());

		let json = serde_json::to_string(&val).unwrap();
		assert_eq!(json, "\"123456789\"");
	}
}
