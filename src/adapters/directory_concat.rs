//! Concatenate the text files under a directory into one document.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::domain::{AppError, ConcatConfig};

/// Result of concatenating a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatOutput {
    pub document: String,
    /// Relative paths included, in output order.
    pub included: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooLarge(u64),
    Binary,
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooLarge(bytes) => write!(f, "too large ({} bytes)", bytes),
            SkipReason::Binary => write!(f, "binary"),
            SkipReason::Unreadable(reason) => write!(f, "unreadable: {}", reason),
        }
    }
}

struct Candidate {
    relative: String,
    absolute: PathBuf,
}

/// Walk `root`, read every eligible file with bounded parallelism and join them
/// under `--- <relative path> ---` headers, sorted by path.
pub fn concat_directory(root: &Path, config: &ConcatConfig) -> Result<ConcatOutput, AppError> {
    if !root.is_dir() {
        return Err(AppError::NotADirectory(root.display().to_string()));
    }

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    walk(root, config, &mut candidates, &mut skipped);
    candidates.sort_by(|a, b| a.relative.cmp(&b.relative));
    debug!(root = %root.display(), files = candidates.len(), "Collected files to concatenate");

    let outcomes = read_bounded(&candidates, config.max_parallel_reads);

    let mut document = String::new();
    let mut included = Vec::new();
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(content) => {
                document.push_str(&format!("--- {} ---\n", candidate.relative));
                document.push_str(&content);
                if !content.ends_with('\n') {
                    document.push('\n');
                }
                document.push('\n');
                included.push(candidate.relative.clone());
            }
            Err(reason) => {
                skipped.push(SkippedFile { path: candidate.relative.clone(), reason });
            }
        }
    }
    skipped.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ConcatOutput { document, included, skipped })
}

fn walk(
    root: &Path,
    config: &ConcatConfig,
    candidates: &mut Vec<Candidate>,
    skipped: &mut Vec<SkippedFile>,
) {
    let entries = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, config));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(|p| relative_display(root, p)).unwrap_or_default();
                let reason = err.io_error().map_or_else(|| err.to_string(), |e| e.to_string());
                warn!(path = %path, reason = %reason, "Skipping unreadable entry");
                skipped.push(SkippedFile { path, reason: SkipReason::Unreadable(reason) });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_display(root, entry.path());
        match entry.metadata() {
            Ok(meta) if meta.len() > config.max_file_bytes => {
                skipped.push(SkippedFile { path: relative, reason: SkipReason::TooLarge(meta.len()) });
            }
            Ok(_) => candidates.push(Candidate { relative, absolute: entry.into_path() }),
            Err(err) => {
                skipped.push(SkippedFile { path: relative, reason: SkipReason::Unreadable(err.to_string()) });
            }
        }
    }
}

fn is_excluded(entry: &DirEntry, config: &ConcatConfig) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || config.ignore.iter().any(|ignored| ignored.as_str() == &*name)
}

fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

/// Read candidates on a pool of at most `max_parallel` threads, preserving order.
fn read_bounded(candidates: &[Candidate], max_parallel: usize) -> Vec<Result<String, SkipReason>> {
    if candidates.is_empty() {
        return Vec::new();
    }
    match ThreadPoolBuilder::new().num_threads(max_parallel.max(1)).build() {
        Ok(pool) => pool.install(|| candidates.par_iter().map(read_text).collect()),
        Err(err) => {
            warn!(error = %err, "Could not start reader pool; reading sequentially");
            candidates.iter().map(read_text).collect()
        }
    }
}

fn read_text(candidate: &Candidate) -> Result<String, SkipReason> {
    let bytes =
        fs::read(&candidate.absolute).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    if bytes.contains(&0) {
        return Err(SkipReason::Binary);
    }
    String::from_utf8(bytes).map_err(|_| SkipReason::Binary)
}
