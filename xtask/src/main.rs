//! Development tasks for lyrics-analysis.
//!
//! ```text
//! cargo run -p xtask -- man [--out-dir target/man]
//! cargo run -p xtask -- completions [--out-dir target/completions]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for lyrics-analysis")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = lyrics_analysis::command();
    let bin = cmd.get_name().to_string();

    write_man(out_dir, &bin, cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let name = format!("{bin}-{}", sub.get_name());
        write_man(out_dir, &name, sub.clone().name(name.clone()))?;
    }
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn write_man(out_dir: &Path, name: &str, cmd: clap::Command) -> io::Result<()> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buf)?;
    fs::write(out_dir.join(format!("{name}.1")), buf)
}

fn generate_completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = lyrics_analysis::command();
    let bin = cmd.get_name().to_string();
    for shell in [
        Shell::Bash,
        Shell::Zsh,
        Shell::Fish,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        let path = clap_complete::generate_to(shell, &mut cmd, &bin, out_dir)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
