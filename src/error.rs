//! Error types for the md2html library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2HtmlError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing or unreadable input document, output write failure, invalid
//!   configuration). Returned as `Err(Md2HtmlError)` from the top-level
//!   `convert*` functions.
//!
//! * [`AssetError`] — **Non-fatal**: a single image reference could not be
//!   embedded (not found, fetch failure, unreadable file) while the rest of
//!   the document converts fine. Recovered inside the embedder, surfaced as
//!   one `tracing::warn!` per asset, and tallied in
//!   [`crate::output::ConversionStats`].
//!
//! The separation enforces the propagation policy: the pipeline never aborts
//! because one image could not be embedded, and no per-asset failure is
//! silently dropped.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2html library.
///
/// Per-asset failures use [`AssetError`] and are logged rather than
/// propagated here.
#[derive(Debug, Error)]
pub enum Md2HtmlError {
    /// Input document was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input document.
    #[error("permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input document exists but could not be read (not UTF-8, I/O race).
    #[error("failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output HTML file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single image reference.
///
/// The embedder converts every variant into a warning and leaves the
/// original reference untouched in the output; conversion continues with
/// all other references unaffected.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Direct path resolution and the ancestor search both failed.
    #[error("image not found: '{reference}'")]
    NotFound { reference: String },

    /// Remote retrieval failed (network error or timeout).
    #[error("failed to fetch '{url}': {reason}")]
    FetchFailed { url: String, reason: String },

    /// Remote server answered with a non-success status.
    #[error("fetch of '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A located file could not be read (permissions, race).
    #[error("failed to read image '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
