//! Eager (full-document) conversion entry points.
//!
//! The pipeline is synchronous and stateless: one `DocumentSource` in, one
//! self-contained HTML document out. Asset references are processed strictly
//! sequentially in document order; per-asset failures are recovered inside
//! the embedder, so the only fatal errors here are a missing/unreadable
//! input and a failed output write.

use crate::config::ConversionConfig;
use crate::error::Md2HtmlError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::embed::EmbedStats;
use crate::pipeline::input::DocumentSource;
use crate::pipeline::{assemble, direction, embed, render, wikilink};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a Markdown file to a self-contained HTML document.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(Md2HtmlError)` only for fatal errors: input not found or
/// unreadable. Unresolvable images are warnings, not errors — check
/// `output.stats.unresolved_assets`.
pub fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2HtmlError> {
    let input = input.as_ref();
    info!("starting conversion: {}", input.display());
    let source = DocumentSource::from_path(input)?;
    Ok(run_pipeline(&source, config))
}

/// Convert in-memory Markdown text.
///
/// `base_dir` is the directory relative image references resolve against.
/// Infallible: with no input file to read, nothing fatal can happen —
/// per-asset failures degrade to warnings as usual.
pub fn convert_text(
    text: impl Into<String>,
    base_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> ConversionOutput {
    let source = DocumentSource::from_text(text, base_dir.as_ref());
    run_pipeline(&source, config)
}

/// Convert a Markdown file and write the HTML directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial output.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2HtmlError> {
    let output = convert(input, config)?;
    let path = output_path.as_ref();

    let write_err = |source: std::io::Error| Md2HtmlError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp_path = path.with_extension("html.tmp");
    std::fs::write(&tmp_path, &output.html).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;

    Ok(output.stats)
}

/// Run the full pipeline over one resolved source.
fn run_pipeline(source: &DocumentSource, config: &ConversionConfig) -> ConversionOutput {
    let total_start = Instant::now();

    // ── Step 1: Normalise wikilink embeds ────────────────────────────────
    let normalized = wikilink::normalize_wikilinks(&source.text);

    // ── Step 2: Classify the dominant direction (pre-render text) ────────
    let verdict = direction::classify(&normalized);
    debug!(
        "direction: {} ({} rtl / {} ltr strong chars)",
        verdict.direction.as_str(),
        verdict.rtl_count,
        verdict.ltr_count
    );

    // ── Step 3: Render Markdown to body HTML ─────────────────────────────
    let render_start = Instant::now();
    let body = render::render_markdown(&normalized);
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 4: Embed image references ───────────────────────────────────
    let embed_start = Instant::now();
    let (body, embed_stats) = if config.embed_images {
        embed::embed_images(&body, &source.base_dir, config)
    } else {
        (body, EmbedStats::default())
    };
    let embed_duration_ms = embed_start.elapsed().as_millis() as u64;

    // ── Step 5: Assemble the final document ──────────────────────────────
    let title = config.title.as_deref().unwrap_or(&source.title);
    let html = assemble::assemble_document(title, &body, &verdict);

    let stats = ConversionStats {
        total_assets: embed_stats.total,
        embedded_assets: embed_stats.embedded,
        skipped_assets: embed_stats.skipped,
        unresolved_assets: embed_stats.unresolved,
        rtl_chars: verdict.rtl_count,
        ltr_chars: verdict.ltr_count,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
        embed_duration_ms,
    };

    info!(
        "conversion complete: {}/{} assets embedded, {}ms total",
        stats.embedded_assets, stats.total_assets, stats.total_duration_ms
    );

    ConversionOutput {
        html,
        direction: verdict.direction,
        language: verdict.direction.lang_hint().to_string(),
        stats,
    }
}
