//! Client for the remote downloads API.
//!
//! The service owns the download records; this side only creates them and
//! pushes partial updates:
//! - `POST {base}/api/downloads` -> `{download_id}`
//! - `PUT  {base}/api/downloads/{id}` with a partial body

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::types::download::{
    CreateDownloadRequest, CreateDownloadResponse, RecordId, UpdateDownloadRequest,
};
use crate::types::errors::ApiError;
use crate::types::settings::ApiSettings;

/// Operations the download tracker needs from the remote service.
#[async_trait]
pub trait DownloadsApi: Send + Sync {
    async fn create_download(&self, request: &CreateDownloadRequest) -> Result<RecordId, ApiError>;
    async fn update_download(
        &self,
        id: &RecordId,
        update: &UpdateDownloadRequest,
    ) -> Result<(), ApiError>;
}

/// `reqwest`-backed implementation of [`DownloadsApi`].
#[derive(Debug, Clone)]
pub struct HttpDownloadsApi {
    client: Client,
    base_url: String,
}

impl HttpDownloadsApi {
    /// Creates a client with no request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::with_timeout(
            &settings.base_url,
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/downloads", self.base_url)
    }

    /// Ids are opaque, so they go into the path as a single encoded segment.
    fn record_url(&self, id: &RecordId) -> String {
        format!(
            "{}/api/downloads/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DownloadsApi for HttpDownloadsApi {
    async fn create_download(&self, request: &CreateDownloadRequest) -> Result<RecordId, ApiError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::ensure_success(response).await?;

        let body: CreateDownloadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        debug!(id = %body.download_id, filename = %request.filename, "download record created");
        Ok(body.download_id)
    }

    async fn update_download(
        &self,
        id: &RecordId,
        update: &UpdateDownloadRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(update)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
