//! Loopline CLI: inspect and edit loop settings files without the TUI.
//!
//! Commands:
//! - `show`: print a file's in/out range (or the full-range fallback)
//! - `set`: overwrite a file with a new range
//! - `reset`: overwrite a file with the full range
//! - `list`: every settings file in a directory with its range

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use loopline_core::{settings, NormalizedRange};

#[derive(Parser)]
#[command(name = "loopline", about = "Loopline CLI: loop in/out settings files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the saved in/out range of a settings file.
    Show {
        file: PathBuf,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Overwrite a settings file with the given range.
    Set {
        file: PathBuf,

        /// In-point, normalized.
        #[arg(long = "in", allow_negative_numbers = true)]
        in_point: f64,

        /// Out-point, normalized.
        #[arg(long = "out", allow_negative_numbers = true)]
        out_point: f64,
    },
    /// Overwrite a settings file with the full range [0, 1].
    Reset { file: PathBuf },
    /// List every settings file in a directory.
    List {
        dir: PathBuf,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// What a settings file holds, as the editor would load it.
#[derive(Debug, Serialize)]
struct LoopSummary {
    file: PathBuf,
    #[serde(rename = "in")]
    in_point: f64,
    #[serde(rename = "out")]
    out_point: f64,
    /// True when the file was missing or unreadable and the full range stands in.
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl LoopSummary {
    fn describe(path: &Path) -> Self {
        let (range, reason) = match settings::load(path) {
            Ok(range) => (range, None),
            Err(e) => {
                log::debug!("falling back to full range for {}: {e}", path.display());
                (NormalizedRange::full(), Some(e.to_string()))
            }
        };
        Self {
            file: path.to_path_buf(),
            in_point: range.min,
            out_point: range.max,
            fallback: reason.is_some(),
            reason,
        }
    }

    fn line(&self) -> String {
        let mut line = format!(
            "{}  in {:.6}  out {:.6}",
            self.file.display(),
            self.in_point,
            self.out_point
        );
        if let Some(reason) = &self.reason {
            line.push_str(&format!("  (fallback: {reason})"));
        }
        line
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, json } => run_show(&file, json),
        Commands::Set {
            file,
            in_point,
            out_point,
        } => run_set(&file, NormalizedRange::new(in_point, out_point)),
        Commands::Reset { file } => run_set(&file, NormalizedRange::full()),
        Commands::List { dir, json } => run_list(&dir, json),
    }
}

fn run_show(file: &Path, json: bool) -> Result<()> {
    let summary = LoopSummary::describe(file);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.line());
    }
    Ok(())
}

fn run_set(file: &Path, range: NormalizedRange) -> Result<()> {
    let unit = NormalizedRange::full();
    if range.is_inverted() || !unit.contains(range.min) || !unit.contains(range.max) {
        log::warn!(
            "storing out-of-order or out-of-range values [{}, {}] as given",
            range.min,
            range.max
        );
    }
    settings::save(file, range)
        .with_context(|| format!("failed to write {}", file.display()))?;
    println!("{}", LoopSummary::describe(file).line());
    Ok(())
}

fn run_list(dir: &Path, json: bool) -> Result<()> {
    let summaries: Vec<LoopSummary> = settings_files(dir)?
        .iter()
        .map(|path| LoopSummary::describe(path))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if summaries.is_empty() {
        println!("no settings files in {}", dir.display());
    } else {
        for summary in &summaries {
            println!("{}", summary.line());
        }
    }
    Ok(())
}

/// `.toml` files directly inside `dir`, sorted by name.
fn settings_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_accepts_negative_values() {
        let cli = Cli::try_parse_from(["loopline", "set", "a.toml", "--in", "-0.25", "--out", "1.5"])
            .unwrap();
        match cli.command {
            Commands::Set {
                in_point,
                out_point,
                ..
            } => {
                assert_eq!(in_point, -0.25);
                assert_eq!(out_point, 1.5);
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn missing_file_is_reported_as_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let summary = LoopSummary::describe(&dir.path().join("nope.toml"));
        assert!(summary.fallback);
        assert_eq!((summary.in_point, summary.out_point), (0.0, 1.0));
        assert!(summary.line().contains("fallback"));
    }

    #[test]
    fn set_then_show_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("loop_0.toml");
        run_set(&file, NormalizedRange::new(0.125, 0.875)).unwrap();

        let summary = LoopSummary::describe(&file);
        assert!(!summary.fallback);
        assert_eq!((summary.in_point, summary.out_point), (0.125, 0.875));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["in"], 0.125);
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn list_only_picks_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        run_set(&dir.path().join("loop_1.toml"), NormalizedRange::full()).unwrap();
        run_set(&dir.path().join("loop_0.toml"), NormalizedRange::new(0.2, 0.4)).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let files = settings_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["loop_0.toml", "loop_1.toml"]);
    }
}
