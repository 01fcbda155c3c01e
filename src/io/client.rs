//! Client for the endpoint that persists newly created items.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::model::{ItemId, WidgetConfig};
use crate::ops::creation::{CreationError, PendingCreation, Resolution};

/// Header carrying the page's anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Creates an item server-side and returns its permanent id
#[async_trait]
pub trait CreationClient: Send + Sync {
    async fn create(&self, item_type: &str, name: &str) -> Result<ItemId, CreationError>;
}

#[derive(Deserialize)]
struct CreatedRecord {
    id: Option<ItemId>,
}

/// `POST <endpoint>` with `{ <item_type>: { "name": <name> } }`
#[derive(Clone)]
pub struct HttpCreationClient {
    client: reqwest::Client,
    endpoint: Url,
    csrf_token: Option<String>,
}

impl HttpCreationClient {
    /// Build a client for `endpoint`. Relative endpoints such as `/tags` are
    /// resolved against `base_url`.
    pub fn new(
        endpoint: &str,
        base_url: Option<&str>,
        csrf_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CreationError> {
        let invalid = |reason: String| CreationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let endpoint_url = match Url::parse(endpoint) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = base_url
                    .ok_or_else(|| invalid("relative endpoint needs a base URL".to_string()))?;
                Url::parse(base)
                    .and_then(|b| b.join(endpoint))
                    .map_err(|e| invalid(e.to_string()))?
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(HttpCreationClient {
            client,
            endpoint: endpoint_url,
            csrf_token,
        })
    }

    /// Client for a widget's configured endpoint, if it has one
    pub fn from_config(
        config: &WidgetConfig,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Option<Result<Self, CreationError>> {
        let endpoint = config.api_endpoint.as_deref()?;
        Some(Self::new(
            endpoint,
            base_url,
            config.csrf_token.clone(),
            timeout,
        ))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CreationClient for HttpCreationClient {
    async fn create(&self, item_type: &str, name: &str) -> Result<ItemId, CreationError> {
        let mut body = serde_json::Map::new();
        body.insert(item_type.to_string(), serde_json::json!({ "name": name }));

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("Accept", "application/json")
            .json(&serde_json::Value::Object(body));
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CreationError::Status(response.status()));
        }
        let record: CreatedRecord = response.json().await?;
        record.id.ok_or(CreationError::MissingId)
    }
}

/// Run the round trip for one pending creation, bounded by `timeout`.
/// Every failure becomes a [`Resolution::Failed`]; nothing here is fatal.
pub async fn resolve_creation(
    client: &dyn CreationClient,
    item_type: &str,
    pending: &PendingCreation,
    timeout: Duration,
) -> Resolution {
    let result = tokio::time::timeout(timeout, client.create(item_type, &pending.name)).await;
    match result {
        Ok(Ok(id)) => Resolution::Created(id),
        Ok(Err(e)) => {
            tracing::warn!(temp_id = %pending.temp_id, error = %e, "creation request failed");
            Resolution::Failed(e)
        }
        Err(_) => {
            let ms = timeout.as_millis() as u64;
            tracing::warn!(temp_id = %pending.temp_id, ms, "creation request timed out");
            Resolution::Failed(CreationError::Timeout(ms))
        }
    }
}
