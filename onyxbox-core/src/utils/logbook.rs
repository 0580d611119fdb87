// src/utils/logbook.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, io::Write, path::Path};

/// Append one JSON line to `path`, creating parent directories as needed.
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create_dir_all({:?})", parent))?;
    }
    let json = serde_json::to_string(record)?;
    let mut f = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open logbook {:?}", path))?;
    writeln!(f, "{}", json)?;
    Ok(())
}

/// Read every JSON line back. Blank lines are skipped.
pub fn read_jsonl(path: &Path) -> Result<Vec<serde_json::Value>> {
    let text = fs::read_to_string(path).with_context(|| format!("read logbook {:?}", path))?;
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).with_context(|| format!("bad logbook line: {l}")))
        .collect()
}
