// Platform API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// handling, and envelope unwrapping. All endpoint modules (categories,
// products, etc.) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{Envelope, ListPayload, Page};

/// HTTP client for the Tenra platform REST API.
///
/// Handles the `{success, data, error}` envelope and attaches
/// `Authorization: Bearer <token>` once a token has been installed via
/// [`set_token`](Self::set_token). All methods return unwrapped `data`
/// payloads -- the envelope is stripped before the caller sees it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Bearer token. Absent until sign-in; rotated on re-authentication.
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `https://api.tenra.example`);
    /// endpoint paths are joined onto it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer token management ──────────────────────────────────────

    /// Install the bearer token returned by sign-in.
    pub fn set_token(&self, token: SecretString) {
        debug!("installing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the bearer token (sign-out).
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    /// Apply the stored bearer token to a request builder.
    ///
    /// Returns `Error::NotSignedIn` when no token is installed --
    /// every endpoint except sign-in requires one.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => Ok(builder.bearer_auth(token.expose_secret())),
            None => Err(Error::NotSignedIn),
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the base URL.
    pub(crate) fn url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let mut builder = self.apply_auth(self.http.get(url))?;
        if !params.is_empty() {
            builder = builder.query(params);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_envelope(resp).await
    }

    /// Send an authenticated GET for a list endpoint, normalizing the
    /// payload shape behind [`Page`].
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Page<T>, Error> {
        self.get::<ListPayload<T>>(path, params).await.map(Page::from)
    }

    /// Send an authenticated POST with JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let builder = self.apply_auth(self.http.post(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_envelope(resp).await
    }

    /// POST without caring about the response payload.
    pub(crate) async fn post_ack(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let builder = self.apply_auth(self.http.post(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_ack(resp).await
    }

    /// PUT without caring about the response payload.
    pub(crate) async fn put_ack(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let builder = self.apply_auth(self.http.put(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_ack(resp).await
    }

    /// DELETE without caring about the response payload.
    pub(crate) async fn delete_ack(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let builder = self.apply_auth(self.http.delete(url))?;
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_ack(resp).await
    }

    /// Unauthenticated POST -- only used by the sign-in endpoint.
    pub(crate) async fn post_public<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} (public)");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_envelope(resp).await
    }
}

// ── Envelope parsing ────────────────────────────────────────────────

/// Parse the `{success, data, error}` envelope, returning `data` on
/// `success: true` or `Error::Rejected` on `success: false`.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let envelope: Envelope<T> = read_envelope(resp).await?;

    if envelope.success {
        envelope.data.ok_or_else(|| Error::Deserialization {
            message: "successful envelope is missing its data payload".into(),
            body: String::new(),
        })
    } else {
        Err(rejection(envelope.error))
    }
}

/// Parse the envelope for success/failure only, discarding `data`.
async fn parse_ack(resp: reqwest::Response) -> Result<(), Error> {
    let envelope: Envelope<serde_json::Value> = read_envelope(resp).await?;

    if envelope.success {
        Ok(())
    } else {
        Err(rejection(envelope.error))
    }
}

async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Envelope<T>, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "token expired or invalid credentials".into(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

fn rejection(error: Option<String>) -> Error {
    Error::Rejected {
        message: error.unwrap_or_else(|| "request rejected by server".into()),
    }
}

/// First 200 bytes of a body for error messages, without splitting a
/// UTF-8 character.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
