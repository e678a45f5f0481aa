//! Tracks command: list results from a saved catalog search response.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lyrics_analysis_core::catalog::CatalogResponse;

use super::read_input_file;

/// Arguments for the `tracks` subcommand.
#[derive(Args, Debug)]
pub struct TracksArgs {
    /// Catalog search response (JSON).
    pub file: Utf8PathBuf,

    /// Maximum number of tracks to list.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Print the track summaries in a catalog response file.
#[instrument(name = "cmd_tracks", skip_all, fields(file = %args.file))]
pub fn cmd_tracks(
    args: TracksArgs,
    global_json: bool,
    config_limit: usize,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(config_limit);
    debug!(file = %args.file, limit, "executing tracks command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let mut tracks = CatalogResponse::from_json(&content)
        .with_context(|| format!("failed to decode {}", args.file))?
        .into_summaries();
    tracks.truncate(limit);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    if tracks.is_empty() {
        println!("{}", "No search results found.".yellow());
        return Ok(());
    }
    for track in &tracks {
        println!("{}  {}", track.id.dimmed(), track.track_name.bold());
        println!("    {}", track.byline());
        if !track.album_image.is_empty() {
            println!("    {}", track.album_image.cyan());
        }
    }
    Ok(())
}
