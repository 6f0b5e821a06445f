//! CLI entry point for the image-downloader tool.

use anyhow::Result;
use clap::Parser;
use image_downloader_core::tool::serve_stdio;
use image_downloader_core::{HttpClient, ImageDownloadTool, ToolRequest};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr: in serve mode stdout is the transport channel.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    // Explicit wiring: client -> tool -> transport, done once at startup.
    let client = HttpClient::new();
    let tool = ImageDownloadTool::new(client);

    if args.serve {
        info!("serving download_image over stdio");
        serve_stdio(&tool).await?;
        return Ok(());
    }

    let Some(url) = args.url else {
        info!("No URL provided. Pass a URL as an argument or run with --serve.");
        info!("Example: image-downloader https://example.com/photo.png -d ./images");
        return Ok(());
    };

    let request = ToolRequest {
        url,
        save_dir: args.dir,
        filename: args.filename,
    };
    let outcome = tool.call(&request).await;
    println!("{outcome}");

    Ok(())
}
