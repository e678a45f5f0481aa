//! Cloud command: word-cloud frequency table for a lyrics payload.
//!
//! Prints the table a renderer would draw, along with the configured canvas.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lyrics_analysis_core::analysis;
use lyrics_analysis_core::cloud::{CloudSource, WordCloudConfig, WordCloudFrequencies};

use super::read_payload;

/// Arguments for the `cloud` subcommand.
#[derive(Args, Debug)]
pub struct CloudArgs {
    /// Lyrics payload (JSON) to analyze.
    pub file: Utf8PathBuf,

    /// Which word list to draw.
    #[arg(long, value_enum, default_value_t)]
    pub kind: CloudSource,

    /// Number of entries in the top-words ranking.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct CloudOutput<'a> {
    #[serde(flatten)]
    canvas: &'a WordCloudConfig,
    kind: CloudSource,
    words: WordCloudFrequencies,
}

/// Print the word-cloud input for a lyrics payload file.
#[instrument(name = "cmd_cloud", skip_all, fields(file = %args.file))]
pub fn cmd_cloud(
    args: CloudArgs,
    global_json: bool,
    config_top_words: usize,
    canvas: &WordCloudConfig,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, kind = ?args.kind, "executing cloud command");

    let payload = read_payload(&args.file, max_input_bytes)?;
    let report = analysis::analyze_payload(&payload, args.top.unwrap_or(config_top_words));
    let words = WordCloudFrequencies::from_report(&report, args.kind);

    if words.is_empty() {
        anyhow::bail!("{} has no words to draw", args.file);
    }

    if global_json {
        let output = CloudOutput {
            canvas,
            kind: args.kind,
            words,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}x{} on {}",
        "Canvas:".cyan(),
        canvas.width,
        canvas.height,
        canvas.background
    );
    for entry in words.entries() {
        println!("  {:>5}  {}", entry.weight, entry.word);
    }
    Ok(())
}
