//! Secure string handling for provider API keys
//!
//! Provider credentials are held in a `SecretString` that zeroizes its
//! contents on drop and redacts itself in logs and serialized output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An API key or other credential that is cleared from memory when dropped.
///
/// Debug, Display and Serialize all render `[REDACTED]` so a credential
/// cannot leak through logging or response serialization. Use
/// [`expose_secret`](SecretString::expose_secret) at the single point where
/// the raw value goes onto the wire.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: impl Into<String>) -> Self {
		Self {
			inner: secret.into(),
		}
	}

	/// Expose the raw secret value.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretString")
			.field("inner", &"[REDACTED]")
			.finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret)
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secret = String::deserialize(deserializer)?;
		Ok(SecretString::new(secret))
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	let mut result = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		result |= x ^ y;
	}
	result == 0
}
