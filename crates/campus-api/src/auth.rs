// Authentication endpoints
//
// Login, registration, token refresh, logout, and current-user lookup.
// Login and register return a token pair the session layer persists;
// every other endpoint relies on the client's installed bearer token.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CaptchaResponse, LoginRequest, LoginResponse, RegisterRequest, User};

impl ApiClient {
    /// Fetch a captcha challenge for the login form.
    ///
    /// `GET /auth/captcha`
    pub async fn captcha(&self) -> Result<CaptchaResponse, Error> {
        self.get("/auth/captcha").await
    }

    /// Authenticate with username/password (plus optional captcha).
    ///
    /// `POST /auth/login`
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error> {
        debug!(username = %req.username, "logging in");
        self.post("/auth/login", req).await
    }

    /// Register a new account. Returns the same token pair as login.
    ///
    /// `POST /auth/register`
    pub async fn register(&self, req: &RegisterRequest) -> Result<LoginResponse, Error> {
        debug!(username = %req.username, "registering");
        self.post("/auth/register", req).await
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// `POST /auth/refresh`
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<LoginResponse, Error> {
        self.post("/auth/refresh", &json!({ "refreshToken": refresh_token }))
            .await
    }

    /// Invalidate the current session server-side.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let _: Option<serde_json::Value> = self.post_empty("/auth/logout").await?;
        Ok(())
    }

    /// Fetch the user record for the current token.
    ///
    /// `GET /auth/user`
    pub async fn current_user(&self) -> Result<User, Error> {
        self.get("/auth/user").await
    }
}
