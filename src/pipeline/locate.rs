//! Asset location: map an image reference to a file on disk.
//!
//! ## Why an ancestor search?
//!
//! Obsidian-style vaults reference images by bare filename regardless of
//! where the file actually lives, so a failed direct resolution falls back
//! to searching by filename: first the base directory, then each ancestor,
//! scanning the whole subtree at every level. The search stops at a vault
//! root marker (`.obsidian`, `.git`) so it never escapes the notes project
//! onto the rest of the filesystem.
//!
//! A missing asset is a normal, loggable outcome (`None`), never an error —
//! the embedder decides how to report it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Locate the file behind a local image reference.
///
/// Resolution order:
/// 1. The reference taken as a path — absolute as-is, relative against
///    `base_dir`. An existing file wins immediately.
/// 2. The reference's filename component searched upward from `base_dir`:
///    at each level a flat file with that exact name first (fast path),
///    then a full recursive subtree scan. Ascent stops at a directory
///    containing one of `markers`, or at the filesystem root.
///
/// Closest directory level wins; within a level, flat files beat nested
/// matches. Only the first match is ever returned — there is no attempt to
/// disambiguate multiple same-named files beyond "closest wins".
///
/// `max_depth` caps the per-level subtree scan; `None` scans unbounded.
pub fn locate_asset(
    reference: &str,
    base_dir: &Path,
    markers: &[String],
    max_depth: Option<usize>,
) -> Option<PathBuf> {
    let direct = if Path::new(reference).is_absolute() {
        PathBuf::from(reference)
    } else {
        base_dir.join(reference)
    };
    if direct.is_file() {
        trace!("resolved '{}' directly: {}", reference, direct.display());
        return Some(direct);
    }

    let filename = Path::new(reference).file_name()?;
    let found = find_in_ancestors(filename, base_dir, markers, max_depth);
    match &found {
        Some(path) => debug!(
            "resolved '{}' via ancestor search: {}",
            reference,
            path.display()
        ),
        None => debug!("no match for '{}' in ancestor search", reference),
    }
    found
}

/// Search for `filename` in `base_dir` and its ancestors up to a vault root.
fn find_in_ancestors(
    filename: &OsStr,
    base_dir: &Path,
    markers: &[String],
    max_depth: Option<usize>,
) -> Option<PathBuf> {
    let mut current = base_dir
        .canonicalize()
        .unwrap_or_else(|_| base_dir.to_path_buf());
    loop {
        // Flat file at this level first (fast path).
        let flat = current.join(filename);
        if flat.is_file() {
            return Some(flat);
        }
        if let Some(found) = scan_subtree(&current, filename, max_depth) {
            return Some(found);
        }
        // Stop at the vault root or the filesystem root.
        if markers.iter().any(|m| current.join(m).is_dir()) {
            return None;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Depth-first scan of one directory subtree for an exact filename match.
fn scan_subtree(root: &Path, filename: &OsStr, max_depth: Option<usize>) -> Option<PathBuf> {
    let mut walk = WalkDir::new(root);
    if let Some(depth) = max_depth {
        walk = walk.max_depth(depth);
    }
    walk.into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == filename)
        .map(|entry| entry.into_path())
}
