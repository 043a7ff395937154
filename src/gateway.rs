use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::backend_error;

/// Thin wrapper around one `reqwest::Client`: every backend call goes
/// through here so transport failures, server-reported errors and unreadable
/// bodies come back as the same `AppError` surface. One-shot calls only —
/// no retry, no caching, no deduplication of in-flight requests.
pub struct Gateway {
    client: Client,
    base_url: String,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Gateway {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, AppError> {
        tracing::info!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("GET {} failed: {}", path, e)))?;
        read_json(path, response).await
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        tracing::info!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("POST {} failed: {}", path, e)))?;
        read_json(path, response).await
    }

    /// POST with no body (the reset endpoint takes none).
    pub async fn post_empty(&self, path: &str) -> Result<Value, AppError> {
        tracing::info!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("POST {} failed: {}", path, e)))?;
        read_json(path, response).await
    }

    /// Multipart upload under the given form field name.
    pub async fn post_multipart_file(
        &self,
        path: &str,
        field: &'static str,
        filename: String,
        data: Vec<u8>,
    ) -> Result<Value, AppError> {
        tracing::info!("POST {} (multipart, {}KB)", path, data.len() / 1024);
        let part = Part::bytes(data).file_name(filename);
        let form = Form::new().part(field, part);
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("POST {} failed: {}", path, e)))?;
        read_json(path, response).await
    }

    /// Fetches a binary body (the download-cleaned navigation analog).
    /// Returns the bytes and the filename from Content-Disposition, if any.
    /// An error-bearing JSON body on this endpoint surfaces as a failed
    /// download rather than a file.
    pub async fn get_bytes(&self, path: &str) -> Result<(Bytes, Option<String>), AppError> {
        tracing::info!("GET {} (binary)", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename);

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response bytes: {}", e)))?;

        if !status.is_success() {
            // The backend answers these with its uniform error JSON
            if let Ok(value) = serde_json::from_slice::<Value>(&body) {
                if let Some(message) = backend_error(&value) {
                    return Err(AppError::Backend(message));
                }
            }
            return Err(AppError::Transport(format!("GET {} returned HTTP {}", path, status)));
        }

        Ok((body, filename))
    }
}

/// Reads a JSON body regardless of HTTP status — the backend reports errors
/// as `{error}` JSON on non-2xx statuses and callers must see that verbatim.
async fn read_json(path: &str, response: reqwest::Response) -> Result<Value, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) if status.is_success() => {
            tracing::error!("Unparseable 2xx body from {}: {}", path, e);
            Err(AppError::Decode(format!("{} returned invalid JSON: {}", path, e)))
        }
        Err(_) => Err(AppError::Transport(format!("{} returned HTTP {}", path, status))),
    }
}

/// Pulls `filename="x"` (or the unquoted form) out of a Content-Disposition
/// header value.
fn disposition_filename(header: &str) -> Option<String> {
    let marker = "filename=";
    let idx = header.find(marker)?;
    let raw = header[idx + marker.len()..].trim();
    let raw = raw.split(';').next().unwrap_or(raw).trim();
    let name = raw.trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
