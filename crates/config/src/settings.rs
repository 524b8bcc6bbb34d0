//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use bridge_types::SecretString;
use serde::{Deserialize, Serialize};

/// Main application settings
///
/// Every section has a default, so a missing or partial config file
/// still yields a usable configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub providers: ProviderSettings,
	pub timeouts: TimeoutSettings,
	pub logging: LoggingSettings,
	pub security: SecuritySettings,
}

/// Per-provider enable flags
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
	pub hop: bool,
	pub layerzero: bool,
	pub stellar: bool,
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Per-provider timeout in milliseconds for a single route query
	pub per_provider_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	#[default]
	Pretty,
	Compact,
}

/// Security configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SecuritySettings {
	/// API key for the LayerZero quote endpoint
	///
	/// Example configurations:
	/// - Environment variable: `{"type": "env", "value": "LAYERZERO_API_KEY"}`
	/// - Plain value: `{"type": "plain", "value": "your-key-here"}`
	pub layerzero_api_key: Option<ConfigurableValue>,
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			hop: true,
			layerzero: true,
			stellar: true,
		}
	}
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_provider_ms: 15_000,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

impl Settings {
	/// Names of the providers enabled in this configuration
	pub fn enabled_providers(&self) -> Vec<&'static str> {
		let mut enabled = Vec::new();
		if self.providers.hop {
			enabled.push("hop");
		}
		if self.providers.layerzero {
			enabled.push("layerzero");
		}
		if self.providers.stellar {
			enabled.push("stellar");
		}
		enabled
	}

	/// Resolve the LayerZero API key, if one is configured
	pub fn layerzero_api_key(&self) -> Result<Option<SecretString>, ConfigurableValueError> {
		self.security
			.layerzero_api_key
			.as_ref()
			.map(|value| value.resolve_for_secret())
			.transpose()
	}
}
