//! Configuration: TOML file, serde defaults, environment overrides.

mod loader;
mod types;

pub use loader::{ConfigError, ENV_API_URL, ENV_CLOUD_NAME};
pub use types::{ApiConfig, AssetConfig, Config, NotificationConfig};
