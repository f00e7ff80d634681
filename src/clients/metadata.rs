use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Metadata response could not be decoded: {0}")]
    Decode(String),
}

/// Free-text title lookup against the external metadata service.
///
/// The raw JSON body is returned untouched: deciding what counts as a usable
/// payload belongs to the caller.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn search_movies(&self, query: &str, limit: usize) -> Result<Value, LookupError>;
}

#[derive(Clone)]
pub struct MetadataClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetadataClient {
    pub fn with_shared_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    #[must_use]
    pub fn search_url(&self, query: &str, limit: usize) -> String {
        let mut url = format!(
            "{}/search?query={}&limit={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            limit
        );

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }

        url
    }
}

#[async_trait]
impl MovieLookup for MetadataClient {
    async fn search_movies(&self, query: &str, limit: usize) -> Result<Value, LookupError> {
        let url = self.search_url(query, limit);
        debug!(query, limit, "Searching metadata service");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| LookupError::Decode(e.to_string()))
    }
}
