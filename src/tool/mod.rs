//! Tool boundary for the `download_image` operation.
//!
//! The host process sees exactly one operation taking three strings and
//! returning one string: the save path on success, a prefixed failure reason
//! otherwise. This module owns that contract plus a line-delimited JSON
//! transport for driving it over stdio.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, warn};

use crate::download::HttpClient;

/// Arguments of one `download_image` call.
///
/// All three fields are required strings; `filename` may be empty, meaning
/// "auto-generate a timestamp name".
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolRequest {
    /// Image URL (must be http/https).
    pub url: String,
    /// Directory to save into, created if absent.
    pub save_dir: String,
    /// Desired filename; empty for auto-generation.
    pub filename: String,
}

/// The single tool this service exposes.
///
/// Wraps an [`HttpClient`] and converts every outcome of the pipeline into
/// the always-string contract: [`call`](Self::call) never panics and never
/// returns an error type.
#[derive(Debug, Clone)]
pub struct ImageDownloadTool {
    client: HttpClient,
}

impl ImageDownloadTool {
    /// Wires the tool to the HTTP client it will download with.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Runs one `download_image` call.
    ///
    /// Returns the saved file's path on success, or the failure reason. The
    /// caller is responsible for telling the two apart (path-like vs. a
    /// known failure prefix); there is no separate success flag.
    pub async fn call(&self, request: &ToolRequest) -> String {
        match self
            .client
            .download_image(
                &request.url,
                std::path::Path::new(&request.save_dir),
                &request.filename,
            )
            .await
        {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                error!(url = %request.url, "{e}");
                e.to_string()
            }
        }
    }
}

/// Serves the tool over a line-delimited JSON protocol.
///
/// Each input line is a JSON [`ToolRequest`]; each output line is
/// `{"result": "<string>"}`, or `{"error": "<reason>"}` for lines that do
/// not parse. Blank lines are skipped. Returns when the input reaches EOF.
///
/// # Errors
///
/// Returns an `std::io::Error` only for transport-level read/write failures;
/// download failures are reported in-band as result strings.
pub async fn serve<R, W>(tool: &ImageDownloadTool, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => json!({ "result": tool.call(&request).await }),
            Err(e) => {
                warn!("malformed tool request: {e}");
                json!({ "error": format!("malformed request: {e}") })
            }
        };
        let encoded = serde_json::to_string(&reply).map_err(std::io::Error::other)?;
        writer.write_all(encoded.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

/// Serves the tool over the process's stdin/stdout until EOF.
///
/// # Errors
///
/// Returns an `std::io::Error` for transport-level read/write failures.
pub async fn serve_stdio(tool: &ImageDownloadTool) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(tool, stdin, stdout).await
}
