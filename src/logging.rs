use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub const STATE_DIR: &str = ".pathkit";
const HISTORY_FILE: &str = "history.jsonl";
const MAX_ENTRIES: usize = 500;

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub timestamp: &'a str,
    pub mode: &'a str,
    pub input_lines: usize,
    pub output_lines: usize,
}

pub fn record_invocation(mode: &str, input_lines: usize, output_lines: usize) -> Result<()> {
    let log_path = ensure_history_file()?;
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".into());
    let entry = HistoryEntry {
        timestamp: &timestamp,
        mode,
        input_lines,
        output_lines,
    };
    let json = serde_json::to_string(&entry)?;
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
        .with_context(|| format!("opening {log_path:?}"))?;
    writeln!(file, "{json}")?;
    truncate_history(&log_path)?;
    Ok(())
}

pub fn read_tail(count: usize) -> Result<Vec<String>> {
    let log_path = PathBuf::from(STATE_DIR).join(HISTORY_FILE);
    if !log_path.exists() {
        return Ok(Vec::new());
    }
    let file = OpenOptions::new()
        .read(true)
        .open(&log_path)
        .with_context(|| format!("reading {log_path:?}"))?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let start = lines.len().saturating_sub(count);
    Ok(lines[start..].to_vec())
}

pub fn state_dir() -> PathBuf {
    PathBuf::from(STATE_DIR)
}

fn ensure_history_file() -> Result<PathBuf> {
    let dir = state_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("creating {dir:?}"))?;
    }
    Ok(dir.join(HISTORY_FILE))
}

fn truncate_history(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("reading {path:?}"))?;
    let reader = BufReader::new(file);
    let lines: Vec<_> = reader.lines().collect::<Result<_, _>>()?;
    if lines.len() <= MAX_ENTRIES {
        return Ok(());
    }
    let keep = &lines[lines.len() - MAX_ENTRIES..];
    fs::write(path, keep.join("\n") + "\n")?;
    Ok(())
}
