//! Image Downloader Core Library
//!
//! This library provides the core functionality for the image-downloader
//! tool: fetching a remote image over HTTP(S) and persisting it to a local
//! path, exposed as a single callable operation that always returns a
//! descriptive string outcome.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - the download-and-validate pipeline (URL validation,
//!   streaming transfer with size enforcement, content-type filtering,
//!   filename/extension resolution, error classification)
//! - [`tool`] - the boundary adapter that exposes the pipeline as the
//!   `download_image` tool operation and a stdio transport loop

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod tool;

// Re-export commonly used types
pub use download::{DownloadError, HttpClient, MAX_IMAGE_BYTES};
pub use tool::{ImageDownloadTool, ToolRequest};
