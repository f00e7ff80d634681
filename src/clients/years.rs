use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::YearsPayload;

#[derive(Debug, Error)]
pub enum YearsError {
    #[error("Years request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Years endpoint returned {0}")]
    Status(u16),

    #[error("Years response had no year list")]
    MissingYears,
}

/// The internal years-aggregation endpoint behind the navbar menu.
#[async_trait]
pub trait YearsSource: Send + Sync {
    async fn fetch_years(&self) -> Result<YearsPayload, YearsError>;
}

#[derive(Clone)]
pub struct YearsClient {
    client: Client,
    url: String,
}

impl YearsClient {
    pub fn with_shared_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl YearsSource for YearsClient {
    async fn fetch_years(&self) -> Result<YearsPayload, YearsError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(YearsError::Status(response.status().as_u16()));
        }

        let payload: YearsPayload = response.json().await?;
        Ok(payload)
    }
}
