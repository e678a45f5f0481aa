//! Analyze command: repeated lines, word statistics, script breakdown.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lyrics_analysis_core::analysis::{self, LyricsReport};

use super::read_payload;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Lyrics payload (JSON) to analyze.
    pub file: Utf8PathBuf,

    /// Number of entries in the top-words ranking.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Analyze a lyrics payload file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config_top_words: usize,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, top = ?args.top, "executing analyze command");

    let payload = read_payload(&args.file, max_input_bytes)?;
    let report = analysis::analyze_payload(&payload, args.top.unwrap_or(config_top_words));

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.file, &report);
    }

    Ok(())
}

fn print_report(file: &Utf8Path, report: &LyricsReport) {
    println!("{}", file.bold());
    println!(
        "\n  {} {} lines, {} words",
        "Lyrics:".cyan(),
        report.line_count,
        report.word_count,
    );
    if let Some(ref lang) = report.language {
        let rtl = if report.is_rtl_language { " (RTL)" } else { "" };
        println!("  {} {lang}{rtl}", "Language:".cyan());
    }

    println!("\n  {}", "Repeated lines:".cyan());
    if report.repeated_phrases.is_empty() {
        println!("    {}", "none".dimmed());
    }
    for p in &report.repeated_phrases {
        println!("    {:>3}x  {}", p.count, p.phrase);
    }

    println!("\n  {}", "Top words:".cyan());
    if report.top_words.is_empty() {
        println!("    {}", "none".dimmed());
    }
    for w in &report.top_words {
        println!("    {:>3}  {}", w.count, w.word);
    }

    println!(
        "\n  {} {}",
        "Unique words:".cyan(),
        report.unique_word_count()
    );
    if !report.unique_words.is_empty() {
        println!("    {}", report.unique_words.join(", ").dimmed());
    }

    if !report.script_counts.is_empty() {
        let scripts: Vec<String> = report
            .script_counts
            .iter()
            .map(|(script, count)| format!("{script} {count}"))
            .collect();
        println!("\n  {} {}", "Scripts:".cyan(), scripts.join(", "));
    }
}
