//! HTTP download pipeline for fetching images to disk.
//!
//! This module validates the request, prepares the save directory, resolves
//! the filename and extension, and streams the response body to disk with a
//! content-type filter and a declared-size ceiling.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient, 8 KiB buffered writes)
//! - Filename resolution from the caller, the URL path, or the content-type
//! - Fixed 10-second connect/read timeouts
//! - Structured error types whose `Display` strings are the user-visible
//!   failure reasons
//!
//! # Example
//!
//! ```no_run
//! use image_downloader_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let path = client
//!     .download_image("https://example.com/photo.png", Path::new("./images"), "")
//!     .await?;
//! println!("Saved: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod filename;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, MAX_IMAGE_BYTES, READ_TIMEOUT_SECS};
pub use error::DownloadError;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
