//! Error types for the download module.
//!
//! Every failure category the pipeline can produce is a variant here; the
//! `Display` strings are the user-visible failure reasons that the tool
//! boundary hands back to the caller.

use std::path::PathBuf;

use thiserror::Error;

use super::constants::MAX_IMAGE_BYTES;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Errors that can occur while fetching an image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The URL is empty or not http/https. Detected before any I/O.
    #[error("invalid URL")]
    InvalidUrl {
        /// The offending URL string (surfaced in logs, not in the message).
        url: String,
    },

    /// The save directory could not be created. Detected before network I/O.
    #[error("failed to create directory {}: {source}", path.display())]
    Directory {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The response arrived but its content-type is not image-like.
    #[error("download failed: not an image content type ({content_type})")]
    ContentType {
        /// The declared content-type (empty string when the header was absent).
        content_type: String,
    },

    /// The declared content-length exceeds the size ceiling.
    #[error(
        "download failed: file size ({:.2}MB) exceeds limit ({:.2}MB)",
        *declared_bytes as f64 / BYTES_PER_MB,
        MAX_IMAGE_BYTES as f64 / BYTES_PER_MB
    )]
    SizeLimit {
        /// The size the server declared in Content-Length.
        declared_bytes: u64,
    },

    /// Network-level error (DNS resolution, connection refused, TLS, etc.)
    #[error("download failed: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("download failed: timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("download failed: HTTP {status} from {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Catch-all filesystem error during the body write (e.g. disk full).
    #[error("unknown error: {source} (writing {})", path.display())]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a directory creation error.
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source,
        }
    }

    /// Creates a content-type rejection error.
    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self::ContentType {
            content_type: content_type.into(),
        }
    }

    /// Creates a size-limit rejection error.
    pub fn size_limit(declared_bytes: u64) -> Self {
        Self::SizeLimit { declared_bytes }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or
// `From<std::io::Error>` because the variants require context (url, path)
// that the source errors don't carry. The helper constructors are the
// pattern here.
