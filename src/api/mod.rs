//! Typed REST clients for the portfolio backend and the image host.
//!
//! Every call is a single attempt: no retries, no client-side timeout.
//! The bearer token is read from session storage when the request is built,
//! so a login or logout takes effect on the very next call.

mod assets;
mod auth;
mod error;
mod resource;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::entity::Entity;
use crate::session::{read_token, SessionStorage};

pub use assets::{AssetClient, AssetKind};
pub use auth::{AuthClient, LoginResponse};
pub use error::ApiError;
pub use resource::{ListQuery, ResourceClient, DEFAULT_LIMIT};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<dyn SessionStorage>,
    assets: AssetClient,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<dyn SessionStorage>) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Setup)?;
        let base_url = parse_base(&config.api.base_url)?;
        let assets = AssetClient::new(client.clone(), &config.assets);

        Ok(Self {
            client,
            base_url,
            session,
            assets,
        })
    }

    pub fn resource<E: Entity>(&self) -> ResourceClient<'_, E> {
        ResourceClient::new(self)
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub fn assets(&self) -> &AssetClient {
        &self.assets
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Adds `Authorization: Bearer <token>`; an absent token sends an empty bearer.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = read_token(self.session.as_ref()).unwrap_or_default();
        builder.header(AUTHORIZATION, format!("Bearer {}", token))
    }

    /// Sends the request and returns the JSON body of a 2xx response.
    ///
    /// An empty success body reads as `null`.
    pub(crate) async fn send(&self, builder: RequestBuilder, context: &str) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(|source| ApiError::Transport {
            context: context.to_string(),
            source,
        })?;

        let status = response.status();
        debug!(context, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(ApiError::Status {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            context: context.to_string(),
            source,
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            context: context.to_string(),
            source,
        })
    }

    pub(crate) async fn send_as<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let value = self.send(builder, context).await?;
        decode(value, context)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        context: context.to_string(),
        source,
    })
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: "cannot be a base".to_string(),
        });
    }
    Ok(url)
}
