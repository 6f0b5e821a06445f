//! HTTP client wrapper for fetching images.
//!
//! This module provides the `HttpClient` struct which runs the whole
//! download-and-validate pipeline: scheme check, directory preparation,
//! filename resolution, streaming GET, content-type and size gates, and the
//! chunked body write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::constants::{
    CONNECT_TIMEOUT_SECS, MAX_IMAGE_BYTES, READ_TIMEOUT_SECS, WRITE_BUFFER_BYTES,
};
use super::error::DownloadError;
use super::filename::{
    extension_from_image_mime, extension_from_url, is_image_like, replace_extension,
    resolve_provisional_filename,
};

/// HTTP client for fetching images with streaming support.
///
/// Designed to be created once and reused for multiple downloads, taking
/// advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use image_downloader_core::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let path = client
///     .download_image("https://example.com/photo.png", Path::new("./images"), "")
///     .await?;
/// println!("Saved: {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 10-second timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches an image from `url` and saves it under `save_dir`.
    ///
    /// An empty `filename` auto-generates a timestamp name. The extension is
    /// resolved from the filename, the URL path, or the response
    /// content-type, in that order, defaulting to `.jpg`.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is not http/https (no I/O is attempted)
    /// - The save directory cannot be created
    /// - The request fails (network error, timeout, non-2xx status)
    /// - The response is not image-like or declares a size above 10 MiB
    /// - Writing to disk fails (a partial file may remain; it is not removed)
    #[must_use = "download result contains the path to the saved image"]
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_image(
        &self,
        url: &str,
        save_dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, DownloadError> {
        // Scheme gate before any filesystem or network I/O.
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DownloadError::invalid_url(url));
        }

        tokio::fs::create_dir_all(save_dir)
            .await
            .map_err(|e| DownloadError::directory(save_dir, e))?;

        let url_extension = extension_from_url(url);
        let mut filename = resolve_provisional_filename(filename, url_extension.as_deref());
        let mut save_path = save_dir.join(&filename);
        debug!(path = %save_path.display(), "resolved provisional save path");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_image_like(&content_type) {
            return Err(DownloadError::content_type(content_type));
        }

        // The URL hint wins; the server-declared type only fills the gap
        // left by an extensionless URL.
        if url_extension.is_none()
            && let Some(mime_ext) = extension_from_image_mime(&content_type)
            && !filename.ends_with(mime_ext)
        {
            filename = replace_extension(&filename, mime_ext);
            save_path = save_dir.join(&filename);
            debug!(path = %save_path.display(), "extension overridden by content-type");
        }

        // Size gate on the declared length only; the transferred byte count
        // is not reconciled against it.
        let declared_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        if declared_bytes > MAX_IMAGE_BYTES {
            return Err(DownloadError::size_limit(declared_bytes));
        }

        let bytes_written = stream_to_file(response, url, &save_path).await?;

        info!(path = %save_path.display(), bytes = bytes_written, "image saved");
        Ok(save_path)
    }
}

/// Streams the response body to `path` in buffered chunks, truncating any
/// existing file. Returns the number of bytes written.
async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(path)
        .await
        .map_err(|e| DownloadError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| DownloadError::io(path, e))?;
    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_image_rejects_empty_url_without_side_effects() {
        let temp = tempfile::tempdir().unwrap();
        let missing_dir = temp.path().join("never-created");

        let client = HttpClient::new();
        let result = client.download_image("", &missing_dir, "").await;

        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
        assert!(
            !missing_dir.exists(),
            "invalid URL must not create the save directory"
        );
    }

    #[tokio::test]
    async fn test_download_image_rejects_non_http_scheme() {
        let temp = tempfile::tempdir().unwrap();
        let client = HttpClient::new();

        for url in ["ftp://example.com/a.png", "file:///etc/passwd", "example.com/a.png"] {
            let result = client.download_image(url, temp.path(), "").await;
            assert!(
                matches!(result, Err(DownloadError::InvalidUrl { .. })),
                "expected invalid URL for: {url}"
            );
        }
    }

    #[tokio::test]
    async fn test_download_image_creates_missing_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("c");

        let client = HttpClient::new();
        // The request itself fails (nothing listens on this port), but the
        // directory must already exist by then.
        let result = client
            .download_image("http://127.0.0.1:1/pic.png", &nested, "")
            .await;

        assert!(result.is_err());
        assert!(nested.exists(), "save directory should be created");
    }
}
