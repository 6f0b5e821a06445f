//! Constants for the download module (timeouts, size ceiling, buffering).

/// HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP read timeout (10 seconds).
pub const READ_TIMEOUT_SECS: u64 = 10;

/// Maximum accepted declared payload size (10 MiB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Write buffer capacity for streaming the body to disk (8 KiB).
pub const WRITE_BUFFER_BYTES: usize = 8192;

/// Extension assigned when neither the URL nor the response suggests one.
pub const FALLBACK_EXTENSION: &str = ".jpg";
