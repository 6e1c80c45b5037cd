//! Asset embedding: replace `<img src>` references with base64 data URIs.
//!
//! Embedding is best-effort and never destructive. Each reference moves
//! through `pending → resolving → {embedded | unresolved}` exactly once:
//! references already carrying a `data:` scheme pass through unchanged
//! (repeated runs are idempotent), and a reference that fails to resolve —
//! locally or over the network — keeps its original text and produces one
//! warning with the reference and cause. Partial success is the normal
//! outcome for documents with missing assets.

use crate::config::ConversionConfig;
use crate::error::AssetError;
use crate::pipeline::locate;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::{Lazy, OnceCell};
use regex::{Captures, Regex};
use reqwest::blocking::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Media type used when neither headers nor the filename extension help.
const FALLBACK_MEDIA_TYPE: &str = "image/png";

static RE_IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<img[^>]*?\bsrc=")([^"]*)(")"#).unwrap());

/// Tallies for one embedding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedStats {
    /// Image references examined.
    pub total: usize,
    /// References replaced by data URIs.
    pub embedded: usize,
    /// References skipped (already `data:`, or empty `src`).
    pub skipped: usize,
    /// References left untouched after a resolution failure.
    pub unresolved: usize,
}

/// A located asset: payload bytes plus inferred media type.
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl ResolvedAsset {
    /// Format as a self-contained data URI.
    fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// An image reference classified by how its bytes are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// `http://` or `https://` URL, fetched over the network.
    Remote(String),
    /// Anything else: a path resolved on the local filesystem.
    Local(String),
}

impl AssetSource {
    /// Classify a `src` attribute value.
    pub fn classify(src: &str) -> Self {
        if src.starts_with("http://") || src.starts_with("https://") {
            AssetSource::Remote(src.to_string())
        } else {
            AssetSource::Local(src.to_string())
        }
    }
}

/// Resolver shared across one embedding pass.
///
/// The HTTP client is built lazily on the first remote reference so purely
/// local documents never touch the network stack.
struct AssetResolver<'a> {
    base_dir: &'a Path,
    config: &'a ConversionConfig,
    client: OnceCell<Option<Client>>,
}

impl<'a> AssetResolver<'a> {
    fn new(base_dir: &'a Path, config: &'a ConversionConfig) -> Self {
        Self {
            base_dir,
            config,
            client: OnceCell::new(),
        }
    }

    fn resolve(&self, source: &AssetSource) -> Result<ResolvedAsset, AssetError> {
        match source {
            AssetSource::Remote(url) => self.fetch_remote(url),
            AssetSource::Local(reference) => self.read_local(reference),
        }
    }

    /// One bounded-timeout fetch; any transport or status failure is final.
    fn fetch_remote(&self, url: &str) -> Result<ResolvedAsset, AssetError> {
        let timeout_secs = self.config.fetch_timeout_secs;
        let client = self
            .client
            .get_or_init(|| {
                Client::builder()
                    .timeout(Duration::from_secs(timeout_secs))
                    .build()
                    .ok()
            })
            .as_ref()
            .ok_or_else(|| AssetError::FetchFailed {
                url: url.to_string(),
                reason: "failed to initialise HTTP client".to_string(),
            })?;

        let response = client.get(url).send().map_err(|e| AssetError::FetchFailed {
            url: url.to_string(),
            reason: if e.is_timeout() {
                format!("timed out after {timeout_secs}s")
            } else {
                e.to_string()
            },
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Declared content type first; extension, then generic fallback.
        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or("").trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| media_type_for(url_filename(url)).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());

        let bytes = response
            .bytes()
            .map_err(|e| AssetError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .to_vec();

        debug!("fetched {} ({} bytes, {})", url, bytes.len(), media_type);
        Ok(ResolvedAsset { bytes, media_type })
    }

    fn read_local(&self, reference: &str) -> Result<ResolvedAsset, AssetError> {
        let path = locate::locate_asset(
            reference,
            self.base_dir,
            &self.config.vault_markers,
            self.config.max_search_depth,
        )
        .ok_or_else(|| AssetError::NotFound {
            reference: reference.to_string(),
        })?;

        let bytes = std::fs::read(&path).map_err(|e| AssetError::ReadFailed {
            path: path.clone(),
            source: e,
        })?;
        let media_type = media_type_for(&path.to_string_lossy())
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_string();

        debug!(
            "read {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            media_type
        );
        Ok(ResolvedAsset { bytes, media_type })
    }
}

/// Replace every embeddable `<img src>` in `html` with a data URI.
///
/// Unresolvable references keep their original text and are reported via
/// one `warn!` each; the pass never fails.
pub fn embed_images(
    html: &str,
    base_dir: &Path,
    config: &ConversionConfig,
) -> (String, EmbedStats) {
    let resolver = AssetResolver::new(base_dir, config);
    let mut stats = EmbedStats::default();

    let out = RE_IMG_SRC.replace_all(html, |caps: &Captures| {
        stats.total += 1;
        // The renderer HTML-escapes attribute values; undo that before
        // treating the reference as a path or URL.
        let src = unescape_entities(&caps[2]);

        if src.is_empty() || src.starts_with("data:") {
            stats.skipped += 1;
            return caps[0].to_string();
        }

        match resolver.resolve(&AssetSource::classify(&src)) {
            Ok(asset) => {
                stats.embedded += 1;
                format!("{}{}{}", &caps[1], asset.to_data_uri(), &caps[3])
            }
            Err(e) => {
                warn!("could not embed image '{}': {}", src, e);
                stats.unresolved += 1;
                caps[0].to_string()
            }
        }
    });

    (out.into_owned(), stats)
}

/// Infer a media type from a filename extension.
fn media_type_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(media_type)
}

/// Filename component of a URL, without query or fragment.
fn url_filename(url: &str) -> &str {
    let trimmed = url
        .split_once(['?', '#'])
        .map(|(head, _)| head)
        .unwrap_or(url);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Minimal HTML entity decoding for attribute values.
fn unescape_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
