//! Output types: the assembled document plus conversion statistics.

use crate::pipeline::direction::Direction;
use serde::{Deserialize, Serialize};

/// The result of a successful conversion.
///
/// `html` is the complete self-contained document; `direction` and
/// `language` are the attributes it carries on the `<html>` element.
/// Per-asset failures do not fail the conversion — check
/// `stats.unresolved_assets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The complete HTML document.
    pub html: String,
    /// Dominant text direction inferred from the document body.
    pub direction: Direction,
    /// Language hint derived from the direction (`ar` for rtl, `en` for ltr).
    pub language: String,
    /// Tallies and timings for the run.
    pub stats: ConversionStats,
}

/// Statistics for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Image references found in the rendered markup.
    pub total_assets: usize,
    /// References successfully replaced by data URIs.
    pub embedded_assets: usize,
    /// References skipped because they were already data URIs (or empty).
    pub skipped_assets: usize,
    /// References left untouched after resolution failed (warned, non-fatal).
    pub unresolved_assets: usize,
    /// Strongly right-to-left characters counted by the direction classifier.
    pub rtl_chars: usize,
    /// Strongly left-to-right characters counted by the direction classifier.
    pub ltr_chars: usize,
    /// Wall-clock time for the whole conversion.
    pub total_duration_ms: u64,
    /// Time spent rendering Markdown to body HTML.
    pub render_duration_ms: u64,
    /// Time spent locating, fetching, and encoding assets.
    pub embed_duration_ms: u64,
}
