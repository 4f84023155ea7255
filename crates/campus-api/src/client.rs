// HTTP client facade
//
// Wraps `reqwest::Client` with backend-specific URL construction, bearer
// token injection, and envelope unwrapping. All endpoint modules
// (students, courses, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ApiEnvelope;
use crate::transport::TransportConfig;

/// Raw HTTP client for the campus backend API.
///
/// Handles the `{ code, message, data }` envelope and bearer-token
/// injection. All methods return unwrapped `data` payloads -- the
/// envelope is stripped before the caller sees it.
///
/// The token slot is interior-mutable so a single shared client can be
/// handed to the session layer, which pushes tokens in after login and
/// clears them on logout.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should include the API path prefix, e.g.
    /// `http://localhost:8080/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Install the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Remove the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    /// The currently installed bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `/auth/login`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let resp = self.authorize(self.http.get(url)).send().await?;
        self.parse_envelope(resp).await
    }

    /// Send a GET request with query parameters and unwrap the envelope.
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let resp = self
            .authorize(self.http.get(url))
            .query(query)
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request with a JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request with no body and unwrap the envelope.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let resp = self.authorize(self.http.post(url)).send().await?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request whose parameters travel in the query string.
    ///
    /// A handful of backend endpoints (message send) take their input this
    /// way instead of a JSON body.
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url))
            .query(query)
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request with a multipart form body (file uploads).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {} (multipart)", url);
        let resp = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a PUT request with a JSON body and unwrap the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("PUT {}", url);
        let resp = self.authorize(self.http.put(url)).json(body).send().await?;
        self.parse_envelope(resp).await
    }

    /// Send a DELETE request and unwrap the envelope.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url);
        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.parse_envelope(resp).await
    }

    /// Attach `Authorization: Bearer <token>` when a token is installed;
    /// with no token the header is omitted entirely.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Parse the `{ code, message, data }` envelope, returning `data` on
    /// success or the appropriate error otherwise.
    ///
    /// HTTP 401 and envelope `code == 401` both map to
    /// [`Error::Authentication`]; other non-success HTTP statuses map to
    /// [`Error::Http`] carrying the server message when the body held one.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: server_message(&body).unwrap_or_default(),
            });
        }

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        match envelope.code {
            200 => Ok(envelope.data),
            401 => Err(Error::Authentication {
                message: envelope.message,
            }),
            code => Err(Error::Api {
                code,
                message: envelope.message,
            }),
        }
    }
}

/// Best-effort extraction of the envelope `message` from an error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}
