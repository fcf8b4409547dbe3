use serde::Deserialize;
use serde_json::json;

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// `/auth/*` endpoints; none of them carry a bearer token.
pub struct AuthClient<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .api
            .client()
            .post(self.api.url(&["auth", "login"])?)
            .json(&json!({ "email": email, "password": password }));
        self.api.send_as(request, "POST /auth/login").await
    }

    pub async fn recover_password(&self, email: &str) -> Result<(), ApiError> {
        let request = self
            .api
            .client()
            .post(self.api.url(&["auth", "recover-password"])?)
            .json(&json!({ "email": email }));
        self.api
            .send(request, "POST /auth/recover-password")
            .await
            .map(drop)
    }

    /// `token` is the reset token delivered by the recovery email.
    pub async fn change_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .api
            .client()
            .post(self.api.url(&["auth", "change-password"])?)
            .json(&json!({ "token": token, "password": password }));
        self.api
            .send(request, "POST /auth/change-password")
            .await
            .map(drop)
    }
}
