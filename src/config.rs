//! Configuration types for Markdown-to-HTML conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls and diff two runs to understand
//! why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor breaks on every new field. The builder lets
//! callers set only what they care about and rely on documented defaults.

use crate::error::Md2HtmlError;
use serde::{Deserialize, Serialize};

/// Configuration for a Markdown-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2html::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .fetch_timeout_secs(5)
///     .embed_images(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Inline every image reference as a base64 data URI. Default: true.
    ///
    /// Disabling this skips the embedding pass entirely; the rendered HTML
    /// keeps its original `src` attributes and needs the referenced files
    /// (or network) to display images.
    pub embed_images: bool,

    /// Timeout for each remote image fetch, in seconds. Default: 15.
    ///
    /// One bounded fetch per remote reference, no retries: a timeout is
    /// treated identically to any other fetch failure, so worst-case latency
    /// per asset is capped at this value.
    pub fetch_timeout_secs: u64,

    /// Directory names that mark a vault root. Default: `.obsidian`, `.git`.
    ///
    /// The ancestor search for a missing image stops ascending once it finds
    /// a directory containing one of these markers, keeping the search inside
    /// the notes project instead of scanning the whole filesystem.
    pub vault_markers: Vec<String>,

    /// Depth cap for the per-directory recursive subtree scan. Default: None.
    ///
    /// `None` preserves the unbounded scan of the original tool; a cap trades
    /// completeness on deeply nested matches for bounded I/O on very large
    /// trees. This is a deliberate, observable policy choice, not a tuning
    /// knob — see DESIGN.md.
    pub max_search_depth: Option<usize>,

    /// Document title override. Default: derived from the input file stem
    /// (hyphens and underscores become spaces, words are title-cased).
    pub title: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            embed_images: true,
            fetch_timeout_secs: 15,
            vault_markers: vec![".obsidian".into(), ".git".into()],
            max_search_depth: None,
            title: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn embed_images(mut self, v: bool) -> Self {
        self.config.embed_images = v;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs.max(1);
        self
    }

    pub fn vault_markers(mut self, markers: Vec<String>) -> Self {
        self.config.vault_markers = markers;
        self
    }

    pub fn max_search_depth(mut self, depth: usize) -> Self {
        self.config.max_search_depth = Some(depth.max(1));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2HtmlError> {
        let c = &self.config;
        if c.fetch_timeout_secs == 0 {
            return Err(Md2HtmlError::InvalidConfig(
                "fetch timeout must be ≥ 1 second".into(),
            ));
        }
        if c.vault_markers.iter().any(|m| m.is_empty()) {
            return Err(Md2HtmlError::InvalidConfig(
                "vault markers must be non-empty directory names".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ConversionConfig::builder().build().unwrap();
        assert!(config.embed_images);
        assert_eq!(config.fetch_timeout_secs, 15);
        assert_eq!(config.vault_markers, vec![".obsidian", ".git"]);
        assert_eq!(config.max_search_depth, None);
    }

    #[test]
    fn timeout_is_clamped_to_minimum() {
        let config = ConversionConfig::builder()
            .fetch_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.fetch_timeout_secs, 1);
    }

    #[test]
    fn empty_vault_marker_is_rejected() {
        let result = ConversionConfig::builder()
            .vault_markers(vec![String::new()])
            .build();
        assert!(matches!(result, Err(Md2HtmlError::InvalidConfig(_))));
    }

    #[test]
    fn depth_cap_floor_is_one() {
        let config = ConversionConfig::builder()
            .max_search_depth(0)
            .build()
            .unwrap();
        assert_eq!(config.max_search_depth, Some(1));
    }
}
