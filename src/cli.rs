//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Fetch remote images over HTTP(S) and save them locally.
///
/// Runs one `download_image` call from the command line, or serves the
/// operation to a host process as line-delimited JSON over stdio.
#[derive(Parser, Debug)]
#[command(name = "image-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Image URL to download (omit when using --serve)
    #[arg(conflicts_with = "serve")]
    pub url: Option<String>,

    /// Directory to save the image into (created if absent)
    #[arg(short = 'd', long, default_value = ".")]
    pub dir: String,

    /// Filename to save as (empty for a timestamp-based name)
    #[arg(short = 'f', long, default_value = "")]
    pub filename: String,

    /// Serve the download_image tool over stdio (one JSON request per line)
    #[arg(long)]
    pub serve: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
