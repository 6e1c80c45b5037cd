//! CLI binary for md2html.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2html::{convert, convert_to_file, ConversionConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes notes.html next to the input)
  md2html notes.md

  # Explicit output path
  md2html notes.md -o /tmp/notes.html

  # Keep image references as-is (no embedding)
  md2html --no-embed-images notes.md

  # Custom title and a tighter timeout for remote images
  md2html --title "Weekly Report" --fetch-timeout 5 report.md

  # Structured JSON output (document + stats) on stdout
  md2html --json notes.md

IMAGE RESOLUTION:
  Relative references are resolved against the input file's directory first.
  If not found there, each ancestor directory is searched (nearest first,
  including its subtree) until a vault marker (.obsidian, .git) or the
  filesystem root stops the ascent. Remote http(s) images are fetched and
  inlined like local ones; anything unresolvable is left untouched with a
  warning.

ENVIRONMENT VARIABLES:
  MD2HTML_OUTPUT         Default output path (same as -o)
  MD2HTML_FETCH_TIMEOUT  Remote image fetch timeout in seconds
  RUST_LOG               Fine-grained tracing filter (overrides -v/-q)
"#;

/// Convert Markdown to a single self-contained HTML document.
#[derive(Parser, Debug)]
#[command(
    name = "md2html",
    version,
    about = "Convert Markdown to a single self-contained HTML document",
    long_about = "Convert a Markdown document (including Obsidian-style ![[wikilink]] image \
embeds) to one self-contained HTML file: all referenced images are inlined as base64 data \
URIs and the document direction (ltr/rtl) is detected from its text.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,

    /// Write HTML to this file (default: input path with .html extension).
    #[arg(short, long, env = "MD2HTML_OUTPUT")]
    output: Option<PathBuf>,

    /// Leave image references untouched instead of embedding them.
    #[arg(long, env = "MD2HTML_NO_EMBED_IMAGES")]
    no_embed_images: bool,

    /// Document title (default: derived from the input file name).
    #[arg(long, env = "MD2HTML_TITLE")]
    title: Option<String>,

    /// Remote image fetch timeout in seconds.
    #[arg(long, env = "MD2HTML_FETCH_TIMEOUT", default_value_t = 15)]
    fetch_timeout: u64,

    /// Cap the depth of subtree scans during ancestor search.
    #[arg(long, env = "MD2HTML_MAX_SEARCH_DEPTH")]
    max_search_depth: Option<usize>,

    /// Output structured JSON (document + stats) on stdout, write no file.
    #[arg(long, env = "MD2HTML_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2HTML_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2HTML_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if cli.json {
        let output = convert(&cli.input, &config).context("Conversion failed")?;
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("html"));
    let stats = convert_to_file(&cli.input, &output_path, &config).context("Conversion failed")?;

    if !cli.quiet {
        eprintln!(
            "{}  {}/{} images embedded  {}ms  →  {}",
            if stats.unresolved_assets == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            stats.embedded_assets,
            stats.total_assets,
            stats.total_duration_ms,
            bold(&output_path.display().to_string()),
        );
        if stats.unresolved_assets > 0 {
            eprintln!(
                "   {} image(s) could not be resolved and were left as-is",
                stats.unresolved_assets
            );
        }
        if stats.rtl_chars > stats.ltr_chars {
            eprintln!("   {}", dim("right-to-left document (dir=\"rtl\")"));
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .embed_images(!cli.no_embed_images)
        .fetch_timeout_secs(cli.fetch_timeout);

    if let Some(depth) = cli.max_search_depth {
        builder = builder.max_search_depth(depth);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.as_str());
    }

    builder.build().context("Invalid configuration")
}
