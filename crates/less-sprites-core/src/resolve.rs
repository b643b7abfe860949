//! Source file resolution: explicit list or directory scan, then filtering.

use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::config::SpriteConfig;
use crate::error::{Result, SpriteError};
use crate::paths;

/// Ordered list of source names (relative to `cfg.source_dir`) to stack.
///
/// An explicit `files` list is used verbatim, in its order. Otherwise the
/// source directory is scanned. Either way only `.png` names survive, and the
/// sheet itself is dropped so a previous output is never re-ingested.
#[instrument(skip_all, fields(dir = %cfg.source_dir.display()))]
pub fn resolve_sources(cfg: &SpriteConfig) -> Result<Vec<String>> {
    let candidates = match &cfg.files {
        Some(list) => list.clone(),
        None => scan_dir(&cfg.source_dir, cfg.scan_dirs)?,
    };
    let total = candidates.len();
    let sources: Vec<String> = candidates
        .into_iter()
        .filter(|name| is_png(name) && !is_sheet(cfg, name))
        .collect();
    debug!(candidates = total, kept = sources.len(), "resolved sources");
    if sources.is_empty() {
        return Err(SpriteError::NoSourceFiles {
            dir: cfg.source_dir.clone(),
        });
    }
    Ok(sources)
}

/// Lists files under `dir`, sorted by name at each level. With `recursive`
/// unset, subdirectories are skipped entirely.
pub fn scan_dir(dir: &Path, recursive: bool) -> Result<Vec<String>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut list = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SpriteError::invalid_spec(dir, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        list.push(paths::to_slash(rel));
    }
    Ok(list)
}

/// Case-insensitive `.png` suffix check on a source name.
pub fn is_png(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".png")
}

fn is_sheet(cfg: &SpriteConfig, name: &str) -> bool {
    paths::normalize(&cfg.source_dir.join(name)) == cfg.sprite_path
}
