use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AssetConfig;

/// Image slot, each with its own upload preset on the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Avatar,
    ProjectCover,
    TechnologyIcon,
}

impl AssetKind {
    pub fn preset(self) -> &'static str {
        match self {
            AssetKind::Avatar => "portfolio_avatar_presets",
            AssetKind::ProjectCover => "portfolio_projects_presets",
            AssetKind::TechnologyIcon => "portfolio_technologies_presets",
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Uploads images to the third-party host.
///
/// Failures are logged and reported as `None`; they never reach the
/// notification channel.
#[derive(Debug, Clone)]
pub struct AssetClient {
    client: Client,
    cloud_name: String,
    upload_base_url: String,
}

impl AssetClient {
    pub(crate) fn new(client: Client, config: &AssetConfig) -> Self {
        Self {
            client,
            cloud_name: config.cloud_name.clone(),
            upload_base_url: config.upload_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn upload_url(&self) -> Option<Url> {
        let raw = format!("{}/{}/image/upload", self.upload_base_url, self.cloud_name);
        match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(url = %raw, error = %e, "invalid asset upload url");
                None
            }
        }
    }

    /// Returns the hosted image URL (`secure_url`).
    pub async fn upload(&self, kind: AssetKind, file_name: &str, bytes: Vec<u8>) -> Option<String> {
        if self.cloud_name.is_empty() {
            warn!("asset upload skipped: no cloud name configured");
            return None;
        }
        let url = self.upload_url()?;

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("upload_preset", kind.preset())
            .text("cloud_name", self.cloud_name.clone());

        let response = match self.client.post(url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, preset = kind.preset(), "asset upload failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), preset = kind.preset(), "asset upload rejected");
            return None;
        }

        match response.json::<UploadResponse>().await {
            Ok(UploadResponse {
                secure_url: Some(url),
            }) => {
                info!(%url, "asset uploaded");
                Some(url)
            }
            Ok(_) => {
                warn!("asset upload response has no secure_url");
                None
            }
            Err(e) => {
                warn!(error = %e, "asset upload response unreadable");
                None
            }
        }
    }
}
