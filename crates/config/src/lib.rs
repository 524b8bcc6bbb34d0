//! Bridge Configuration
//!
//! Configuration loading and settings for the bridge route aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from};
pub use settings::{
	LogFormat, LoggingSettings, ProviderSettings, SecuritySettings, Settings, TimeoutSettings,
};
