//! HTTP implementation of [`TarotApi`] backed by reqwest

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::TarotApi;
use crate::error::{ApiError, ConfigError, Result};
use crate::types::{CreateReadingRequest, Deck, DeckId, Reading, ReadingId, Spread, SpreadId};

/// Default service root, matching a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// JSON-over-HTTP client for the reading service
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is empty or not http(s).
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client that reuses a preconfigured reqwest client
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `/decks/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        tracing::debug!(%method, %url, "Sending request");

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(%method, %url, status = status.as_u16(), len = bytes.len(), "Received response");

        Ok(interpret_response(status, &bytes)?)
    }
}

#[async_trait]
impl TarotApi for HttpApi {
    async fn list_decks(&self) -> Result<Vec<Deck>> {
        self.request::<_, ()>(Method::GET, "/decks/", None).await
    }

    async fn list_spreads(&self) -> Result<Vec<Spread>> {
        self.request::<_, ()>(Method::GET, "/spreads/", None).await
    }

    async fn create_reading(
        &self,
        deck_id: DeckId,
        spread_id: SpreadId,
        question: &str,
    ) -> Result<Reading> {
        let body = CreateReadingRequest {
            deck_id,
            spread_id,
            question: question.to_string(),
        };
        self.request(Method::POST, "/readings/", Some(&body)).await
    }

    async fn get_reading(&self, id: ReadingId) -> Result<Reading> {
        self.request::<_, ()>(Method::GET, &format!("/readings/{}/", id), None)
            .await
    }
}

/// Turn a raw status + body into a decoded value or an [`ApiError`]
///
/// Non-success statuses keep the body text for diagnostics; success bodies
/// must decode completely.
pub fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Request {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn normalize_base_url(base_url: &str) -> std::result::Result<String, ConfigError> {
    let trimmed = base_url.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason: format!("'{}' is not an http(s) URL", trimmed),
        });
    }

    Ok(trimmed.to_string())
}
