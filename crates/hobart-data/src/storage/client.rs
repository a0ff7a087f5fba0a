//! Google Cloud Storage JSON API client.

use crate::error::{DataError, Result};
use crate::storage::ObjectLocation;
use std::path::Path;
use std::time::Duration;

/// Production JSON API endpoint
const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

/// Request timeout covering the full object transfer
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// User agent sent with every request
const USER_AGENT: &str = "hobart-trainer/0.1";

/// Environment variable overriding the API endpoint, for local emulators
const ENV_EMULATOR_HOST: &str = "STORAGE_EMULATOR_HOST";

/// Environment variable holding an OAuth2 access token
const ENV_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Client for downloading and uploading single objects.
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl StorageClient {
    /// Create a client configured from the environment.
    ///
    /// Uses the production endpoint unless `STORAGE_EMULATOR_HOST` is set,
    /// and sends a bearer token when `GOOGLE_OAUTH_ACCESS_TOKEN` is set.
    ///
    /// # Errors
    /// Returns `DataError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let base_url = match std::env::var(ENV_EMULATOR_HOST) {
            Ok(host) if !host.is_empty() => normalize_endpoint(&host),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        let access_token = std::env::var(ENV_ACCESS_TOKEN)
            .ok()
            .filter(|token| !token.is_empty());
        Self::with_endpoint(base_url, access_token)
    }

    /// Create a client against an explicit endpoint.
    ///
    /// # Arguments
    /// * `base_url` - API endpoint, e.g. `https://storage.googleapis.com`
    /// * `access_token` - Optional OAuth2 bearer token; `None` sends
    ///   anonymous requests
    pub fn with_endpoint(base_url: impl Into<String>, access_token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            access_token,
        })
    }

    /// Download one object into a local file.
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `object` - Object name within the bucket
    /// * `path` - Local file to write; an existing file is overwritten
    ///
    /// # Returns
    /// The number of bytes written.
    ///
    /// # Errors
    /// Returns `DataError::Storage` for any non-success HTTP status.
    ///
    /// # Example
    /// ```no_run
    /// use hobart_data::StorageClient;
    /// use std::path::Path;
    ///
    /// # async fn example() -> hobart_data::Result<()> {
    /// let client = StorageClient::new()?;
    /// let bytes = client
    ///     .download_to_file("census", "adult.data.csv", Path::new("input.data"))
    ///     .await?;
    /// println!("downloaded {} bytes", bytes);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download_to_file(&self, bucket: &str, object: &str, path: &Path) -> Result<u64> {
        if bucket.is_empty() {
            return Err(DataError::InvalidLocation("empty bucket name".to_string()));
        }
        if object.is_empty() {
            return Err(DataError::InvalidLocation("empty object name".to_string()));
        }

        let url = self.media_url(bucket, object)?;
        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(DataError::Network)?;
        if !response.status().is_success() {
            return Err(DataError::Storage(format!(
                "Failed to download gs://{}/{}: HTTP {}",
                bucket,
                object,
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(DataError::Network)?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }

    /// Upload one local file to an object.
    ///
    /// # Arguments
    /// * `path` - Local file to read
    /// * `destination` - Target bucket and object name
    ///
    /// # Returns
    /// The number of bytes uploaded.
    ///
    /// # Errors
    /// Returns `DataError::Storage` for any non-success HTTP status and
    /// `DataError::InvalidLocation` when the destination has no object name.
    ///
    /// # Example
    /// ```no_run
    /// use hobart_data::{ObjectLocation, StorageClient};
    /// use std::path::Path;
    ///
    /// # async fn example() -> hobart_data::Result<()> {
    /// let client = StorageClient::new()?;
    /// let destination = ObjectLocation::parse("gs://models/run-3/model.joblib")?;
    /// client.upload_from_file(Path::new("model.joblib"), &destination).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_from_file(&self, path: &Path, destination: &ObjectLocation) -> Result<u64> {
        if destination.bucket.is_empty() {
            return Err(DataError::InvalidLocation("empty bucket name".to_string()));
        }
        if destination.object.is_empty() {
            return Err(DataError::InvalidLocation(format!(
                "destination {destination} has no object name"
            )));
        }

        let data = std::fs::read(path)?;
        let size = data.len() as u64;

        let url = self.upload_url(&destination.bucket, &destination.object)?;
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(DataError::Network)?;
        if !response.status().is_success() {
            return Err(DataError::Storage(format!(
                "Failed to upload {}: HTTP {}",
                destination,
                response.status()
            )));
        }

        Ok(size)
    }

    /// Media URL for one object, with the object name percent-encoded into
    /// a single path segment.
    fn media_url(&self, bucket: &str, object: &str) -> Result<reqwest::Url> {
        let mut url = self.parse_base()?;
        url.path_segments_mut()
            .map_err(|()| DataError::InvalidLocation(format!("invalid endpoint: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["storage", "v1", "b", bucket, "o", object]);
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    /// Media upload URL; the object name travels in the `name` query
    /// parameter.
    fn upload_url(&self, bucket: &str, object: &str) -> Result<reqwest::Url> {
        let mut url = self.parse_base()?;
        url.path_segments_mut()
            .map_err(|()| DataError::InvalidLocation(format!("invalid endpoint: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["upload", "storage", "v1", "b", bucket, "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object);
        Ok(url)
    }

    fn parse_base(&self) -> Result<reqwest::Url> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| DataError::InvalidLocation(format!("invalid endpoint {}: {e}", self.base_url)))
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

/// Prefix a bare `host:port` emulator address with `http://`.
fn normalize_endpoint(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
