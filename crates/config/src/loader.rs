//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, File};

/// Load configuration from the default `config/config.*` file.
///
/// The file is optional; a missing file yields default settings, since
/// every section of [`Settings`] has a default.
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

/// Load configuration from a specific file path (without extension).
///
/// Embedding applications keep their own config layout; this lets them
/// point the loader at it instead of the default location.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.build()?;

	s.try_deserialize()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_file_yields_defaults() {
		let settings = load_config_from("does/not/exist").expect("defaults should load");

		assert!(settings.providers.hop);
		assert_eq!(settings.timeouts.per_provider_ms, 15_000);
	}
}
