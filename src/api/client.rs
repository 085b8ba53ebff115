//! School API client
//!
//! JSON over HTTP against the configured base URL. No retries: every call
//! is issued once and its failure is handed back to the caller.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::ResourceRemover;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{ResourceId, ResourceKind};
use crate::workflow::Target;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Relative path of a collection or of one record in it.
    ///
    /// Ids that would resolve as dot-segments (or to nothing) are rejected so
    /// a request can never land on the collection or a parent path.
    pub fn resource_path(
        kind: ResourceKind,
        id: Option<&ResourceId>,
    ) -> Result<String, ApiError> {
        let Some(id) = id else {
            return Ok(kind.collection().to_string());
        };

        let raw = id.to_string();
        if matches!(raw.as_str(), "" | "." | "..") {
            return Err(ApiError::InvalidId(raw));
        }
        Ok(format!("{}/{}", kind.collection(), encode_segment(&raw)))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        info!("{} {}", method, url);
        Ok(self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json"))
    }

    /// Send a request, turning non-2xx answers into `ApiError::Status`
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed without a response: {}", path, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await, status.as_u16(), path);
            warn!(
                "School API error {} on {}: {}",
                status,
                path,
                body.chars().take(200).collect::<String>()
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        debug!("{} returned {} bytes", path, bytes.len());
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response from {}: {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        let response = self.send(request, path).await?;
        Self::decode(response, path).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let response = self.send(request, path).await?;
        Self::decode(response, path).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        let response = self.send(request, path).await?;
        Self::decode(response, path).await
    }

    /// DELETE a path. Any 2xx counts as success; the body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceRemover for ApiClient {
    async fn remove(&self, target: &Target) -> Result<(), ApiError> {
        let path = Self::resource_path(target.kind, Some(&target.id))?;
        self.delete(&path).await
    }
}

/// Body of an error response; an unreadable body is logged and left empty
fn error_body(read: reqwest::Result<String>, status: u16, path: &str) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not read {} error body from {}: {}", status, path, e);
            String::new()
        }
    }
}

/// Percent-encode one path segment
fn encode_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
