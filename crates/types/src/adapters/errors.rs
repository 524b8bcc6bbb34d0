//! Error types for adapter operations

use thiserror::Error;

use crate::chains::ChainId;

/// Adapter operation errors
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Provider returned error: {code} - {message}")]
	ProviderError { code: String, message: String },

	#[error("Chain pair not supported: {source_chain} -> {target_chain} by provider {provider}")]
	ChainPairNotSupported {
		provider: String,
		source_chain: ChainId,
		target_chain: ChainId,
	},

	#[error("Circuit breaker open for provider {provider}")]
	CircuitOpen { provider: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Machine-readable code carried into failure records.
	pub fn code(&self) -> Option<String> {
		match self {
			AdapterError::Timeout { .. } => Some("TIMEOUT".to_string()),
			AdapterError::HttpStatusError { status_code, .. } => {
				Some(format!("HTTP_{}", status_code))
			},
			AdapterError::HttpError(error) => error
				.status()
				.map(|status| format!("HTTP_{}", status.as_u16())),
			AdapterError::InvalidResponse { .. } => Some("INVALID_RESPONSE".to_string()),
			AdapterError::ProviderError { code, .. } => Some(code.clone()),
			AdapterError::ChainPairNotSupported { .. } => {
				Some("CHAIN_PAIR_NOT_SUPPORTED".to_string())
			},
			AdapterError::CircuitOpen { .. } => Some("CIRCUIT_OPEN".to_string()),
			AdapterError::ConfigError { .. } | AdapterError::Serialization(_) => None,
		}
	}

	/// Whether a retry of the same request could plausibly succeed.
	///
	/// Transport failures, timeouts, 5xx responses and 408/429 are
	/// transient; everything else is treated as permanent.
	pub fn is_transient(&self) -> bool {
		match self {
			AdapterError::Timeout { .. } => true,
			AdapterError::HttpError(error) => match error.status() {
				Some(status) => status.is_server_error() || status.as_u16() == 429,
				// Connect/body errors without a status are transport-level.
				None => !error.is_builder() && !error.is_redirect(),
			},
			AdapterError::HttpStatusError { status_code, .. } => {
				*status_code >= 500 || *status_code == 408 || *status_code == 429
			},
			_ => false,
		}
	}

	/// Create an HTTP failure error with the given status code and reason
	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}
