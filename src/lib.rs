//! # md2html
//!
//! Convert Markdown documents into single, self-contained HTML files with
//! all referenced images embedded as base64 data URIs.
//!
//! ## Why self-contained?
//!
//! A note exported from a vault stops rendering the moment it leaves the
//! directory its images live in. Inlining every image into the document
//! itself produces one file that can be mailed, archived, or served from
//! anywhere with zero companion assets.
//!
//! ## Pipeline
//!
//! ```text
//! input file ──▶ wikilink ──▶ direction ──▶ render ──▶ embed ──▶ assemble
//!                normalize     classify      markdown    images    document
//! ```
//!
//! - **wikilink** rewrites `![[ref|alt]]` embeds into standard image syntax.
//! - **direction** strips markup and majority-votes the Unicode bidi classes
//!   of the remaining prose to pick `dir="ltr"` or `dir="rtl"`.
//! - **render** is a thin wrapper over `pulldown-cmark`.
//! - **embed** resolves each `<img src>` (local paths via ancestor-directory
//!   search, remote URLs via HTTP) and replaces it with a data URI;
//!   failures degrade to warnings, never errors.
//! - **assemble** wraps the body into a styled document shell.
//!
//! ## Quick start
//!
//! ```no_run
//! use md2html::{convert_to_file, ConversionConfig};
//!
//! # fn main() -> Result<(), md2html::Md2HtmlError> {
//! let config = ConversionConfig::builder()
//!     .fetch_timeout_secs(10)
//!     .build()?;
//! let stats = convert_to_file("notes/meeting.md", "meeting.html", &config)?;
//! println!("embedded {}/{} images", stats.embedded_assets, stats.total_assets);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | yes     | Builds the `md2html` binary (clap, anyhow, tracing-subscriber) |

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_text, convert_to_file};
pub use error::{AssetError, Md2HtmlError};
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::direction::{Direction, DirectionVerdict};
