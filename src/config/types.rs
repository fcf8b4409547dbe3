use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Portfolio backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every REST path is appended to (e.g., "https://api.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Third-party image host used for avatars, covers and icons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Account name on the image host. Uploads are disabled when empty.
    #[serde(default)]
    pub cloud_name: String,
    /// Upload API root; the cloud name and `/image/upload` are appended.
    #[serde(default = "default_upload_base_url")]
    pub upload_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Auto-close delay in milliseconds (default: 5000).
    #[serde(default = "default_auto_close_ms")]
    pub auto_close_ms: u64,
}

impl NotificationConfig {
    pub fn auto_close(&self) -> Duration {
        Duration::from_millis(self.auto_close_ms)
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_upload_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_auto_close_ms() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            upload_base_url: default_upload_base_url(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_close_ms: default_auto_close_ms(),
        }
    }
}
