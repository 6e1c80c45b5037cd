//! Input resolution: read the source document and derive its context.
//!
//! A conversion needs three things from its input: the raw text, the base
//! directory relative image paths resolve against, and a human-readable
//! title. All three live in [`DocumentSource`], created once per conversion
//! and never mutated. A missing or unreadable input document is the only
//! fatal error in the whole pipeline.

use crate::error::Md2HtmlError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The resolved input document: raw text plus resolution context.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    /// Raw Markdown text.
    pub text: String,
    /// Directory relative image references resolve against.
    pub base_dir: PathBuf,
    /// Document title derived from the file stem (overridable via config).
    pub title: String,
}

impl DocumentSource {
    /// Read a Markdown file, validating existence and readability.
    pub fn from_path(path: &Path) -> Result<Self, Md2HtmlError> {
        if !path.exists() {
            return Err(Md2HtmlError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(Md2HtmlError::PermissionDenied {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(Md2HtmlError::InputReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let base_dir = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let title = title_from_stem(&resolved);
        debug!(
            "resolved input: {} ({} bytes, base dir {})",
            resolved.display(),
            text.len(),
            base_dir.display()
        );

        Ok(Self {
            text,
            base_dir,
            title,
        })
    }

    /// Build a source from in-memory text (no file involved).
    pub fn from_text(text: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            base_dir: base_dir.into(),
            title: "Document".to_string(),
        }
    }
}

/// Derive a title from the file stem: separators to spaces, words title-cased.
fn title_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string());
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
