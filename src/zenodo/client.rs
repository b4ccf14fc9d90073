use std::path::Path;

use futures_util::TryStreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use reqwest::header::CONTENT_LENGTH;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::instance::ZenodoInstance;
use crate::metadata::DepositionMetadata;
use crate::zenodo::deposition::{Deposition, DepositionId};
use crate::zenodo::error::ZenodoError;

static DEPOSITIONS: &str = "api/deposit/depositions";

/// One request at a time against a single Zenodo host. There are no retries, every failure is
/// returned to the caller.
pub struct ZenodoClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl ZenodoClient {
    pub fn new(instance: ZenodoInstance, token: impl Into<String>) -> Result<ZenodoClient, ZenodoError> {
        let base_url = instance
            .base_url()
            .map_err(|source| ZenodoError::InvalidUrl { url: instance.host().to_string(), source })?;
        ZenodoClient::with_base_url(base_url, token)
    }

    /// Talk to any host with the Zenodo API, e.g. a local test server
    pub fn with_base_url(base_url: Url, token: impl Into<String>) -> Result<ZenodoClient, ZenodoError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ZenodoError::Client)?;
        Ok(ZenodoClient { http, base_url, token: token.into() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Web page where a draft deposition can be checked
    pub fn deposit_page(&self, id: DepositionId) -> String {
        format!("{}/deposit/{}", self.base_url.as_str().trim_end_matches('/'), id)
    }

    /// `POST /api/deposit/depositions`
    pub async fn create(&self, metadata: &DepositionMetadata) -> Result<DepositionId, ZenodoError> {
        let operation = "creating deposition ID".to_string();
        let url = self.endpoint(DEPOSITIONS)?;
        debug!("Creating deposition \"{}\"", metadata.title);

        let request = self.http.post(url).json(&json!({ "metadata": metadata }));
        let response = self.send(request, &operation).await?;
        if !response.status().is_success() {
            return Err(status_error(operation, response).await);
        }
        let deposition = read_deposition(response, &operation).await?;
        Ok(deposition.id)
    }

    /// `GET /api/deposit/depositions/{id}`
    pub async fn get(&self, id: DepositionId) -> Result<Deposition, ZenodoError> {
        let operation = format!("fetching deposition {id}");
        let url = self.endpoint(&format!("{DEPOSITIONS}/{id}"))?;

        let response = self.send(self.http.get(url), &operation).await?;
        if !response.status().is_success() {
            return Err(status_error(operation, response).await);
        }
        read_deposition(response, &operation).await
    }

    /// Multipart upload to `POST /api/deposit/depositions/{id}/files`
    pub async fn upload_file(&self, id: DepositionId, path: &Path) -> Result<(), ZenodoError> {
        let file_name = file_name(path);
        let operation = format!("uploading {file_name}");
        let url = self.endpoint(&format!("{DEPOSITIONS}/{id}/files"))?;

        let content = tokio::fs::read(path).await.map_err(|source| ZenodoError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let form = Form::new()
            .text("filename", file_name.clone())
            .part("file", Part::bytes(content).file_name(file_name));

        let response = self.send(self.http.post(url).multipart(form), &operation).await?;
        check_upload(operation, response).await
    }

    /// Stream a file to the deposition's bucket with `PUT {bucket}/{filename}`, showing progress
    pub async fn upload_to_bucket(&self, id: DepositionId, path: &Path) -> Result<(), ZenodoError> {
        let file_name = file_name(path);
        let operation = format!("uploading {}", path.display());

        let bucket = self.get(id).await?.links.bucket.ok_or(ZenodoError::MissingBucket { id: id.to_string() })?;
        let mut url = Url::parse(&bucket).map_err(|source| ZenodoError::InvalidUrl { url: bucket.clone(), source })?;
        url.path_segments_mut()
            .map_err(|_| ZenodoError::BucketUrl { url: bucket.clone() })?
            .pop_if_empty()
            .push(&file_name);

        let file_error = |source: std::io::Error| ZenodoError::File { path: path.to_path_buf(), source };
        let file = tokio::fs::File::open(path).await.map_err(file_error)?;
        let size = file.metadata().await.map_err(file_error)?.len();

        let progress = ProgressBar::new(size);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let tracker = progress.clone();
        let stream = ReaderStream::new(file).inspect_ok(move |chunk| tracker.inc(chunk.len() as u64));

        info!("Uploading {} ({} bytes) to {}", file_name, size, url);
        let request = self
            .http
            .put(url)
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(stream));
        let response = self.send(request, &operation).await;
        progress.finish();

        check_upload(operation, response?).await
    }

    /// `POST /api/deposit/depositions/{id}/actions/publish`, succeeds with 202
    pub async fn publish(&self, id: DepositionId) -> Result<(), ZenodoError> {
        let operation = format!("publishing deposition {id}");
        let url = self.endpoint(&format!("{DEPOSITIONS}/{id}/actions/publish"))?;

        let response = self.send(self.http.post(url), &operation).await?;
        match response.status() {
            StatusCode::ACCEPTED => Ok(()),
            _ => Err(status_error(operation, response).await),
        }
    }

    /// `DELETE /api/deposit/depositions/{id}`, succeeds with 204. Zenodo refuses to delete published
    /// depositions.
    pub async fn delete(&self, id: DepositionId) -> Result<(), ZenodoError> {
        let operation = format!("deleting deposition {id}");
        let url = self.endpoint(&format!("{DEPOSITIONS}/{id}"))?;

        let response = self.send(self.http.delete(url), &operation).await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            _ => Err(status_error(operation, response).await),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ZenodoError> {
        self.base_url.join(path).map_err(|source| ZenodoError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            source,
        })
    }

    /// Every request carries the token as the `access_token` query parameter
    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, ZenodoError> {
        request
            .query(&[("access_token", &self.token)])
            .send()
            .await
            .map_err(|source| ZenodoError::Transport { operation: operation.to_string(), source })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_deposition(response: Response, operation: &str) -> Result<Deposition, ZenodoError> {
    response
        .json::<Deposition>()
        .await
        .map_err(|source| ZenodoError::MalformedResponse { operation: operation.to_string(), source })
}

async fn check_upload(operation: String, response: Response) -> Result<(), ZenodoError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(status_error(operation, response).await);
    }
    Ok(())
}

/// Keep the body for the log, except for 500 responses which aren't reliably parseable
async fn status_error(operation: String, response: Response) -> ZenodoError {
    let status = response.status();
    let body = match status {
        StatusCode::INTERNAL_SERVER_ERROR => None,
        _ => response.text().await.ok(),
    };
    ZenodoError::Status { operation, status: status.as_u16(), body }
}
