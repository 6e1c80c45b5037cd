//! End-to-end integration tests for md2html.
//!
//! Every test builds its own vault fixture in a temp directory, so the suite
//! is hermetic: no fixture files, no network (the one "remote" test points at
//! an unroutable local port and asserts graceful degradation).

use md2html::{convert, convert_text, convert_to_file, ConversionConfig, Direction, Md2HtmlError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

// Smallest valid PNG (1x1 transparent pixel); content is irrelevant to the
// pipeline, which never decodes image bytes.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

fn write_note(dir: &Path, name: &str, markdown: &str) -> PathBuf {
    let path = dir.join(name);
    write_file(&path, markdown.as_bytes());
    path
}

/// Assert the output is a complete, well-formed document shell.
fn assert_document_shell(html: &str, context: &str) {
    assert!(
        html.starts_with("<!DOCTYPE html>"),
        "[{context}] missing doctype"
    );
    assert!(html.contains("<meta charset=\"utf-8\">"), "[{context}]");
    assert!(html.contains("<style>"), "[{context}] stylesheet not embedded");
    assert!(html.trim_end().ends_with("</html>"), "[{context}]");
}

fn count_data_uris(html: &str) -> usize {
    html.matches("data:image/").count()
}

// ── Local embedding ──────────────────────────────────────────────────────────

#[test]
fn local_image_is_embedded_as_data_uri() {
    let vault = TempDir::new().unwrap();
    write_file(&vault.path().join("images/chart.png"), PNG_BYTES);
    let note = write_note(vault.path(), "report.md", "# Report\n\n![chart](images/chart.png)\n");

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    assert_document_shell(&output.html, "local embed");
    assert!(output.html.contains("data:image/png;base64,"));
    assert!(!output.html.contains("images/chart.png"));
    assert_eq!(output.stats.total_assets, 1);
    assert_eq!(output.stats.embedded_assets, 1);
    assert_eq!(output.stats.unresolved_assets, 0);
}

#[test]
fn wikilink_embed_with_alt_text_survives_the_whole_pipeline() {
    let vault = TempDir::new().unwrap();
    write_file(&vault.path().join("shot.png"), PNG_BYTES);
    let note = write_note(
        vault.path(),
        "note.md",
        "before\n\n![[shot.png|login screen]]\n\nafter\n",
    );

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    assert!(output.html.contains(r#"alt="login screen""#));
    assert!(output.html.contains("data:image/png;base64,"));
    assert_eq!(output.stats.embedded_assets, 1);
}

#[test]
fn image_is_found_in_an_ancestor_directory() {
    // Vault layout: note lives two levels deep, image sits at the vault root.
    let vault = TempDir::new().unwrap();
    fs::create_dir_all(vault.path().join(".obsidian")).unwrap();
    write_file(&vault.path().join("assets/logo.png"), PNG_BYTES);
    let note = write_note(
        &vault.path().join("projects/alpha"),
        "status.md",
        "![logo](logo.png)\n",
    );

    let output = convert(&note, &ConversionConfig::default()).unwrap();
    assert_eq!(output.stats.embedded_assets, 1, "{}", output.html);
}

#[test]
fn closest_ancestor_match_wins() {
    let vault = TempDir::new().unwrap();
    fs::create_dir_all(vault.path().join(".git")).unwrap();
    // Same file name at two levels; the nearer copy must be the one embedded.
    write_file(&vault.path().join("pic.png"), b"far away");
    write_file(&vault.path().join("sub/pic.png"), b"nearby");
    let note = write_note(&vault.path().join("sub/notes"), "n.md", "![x](pic.png)\n");

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    use base64::Engine as _;
    let nearby = base64::engine::general_purpose::STANDARD.encode(b"nearby");
    assert!(
        output.html.contains(&nearby),
        "expected the nearer copy: {}",
        output.html
    );
}

#[test]
fn vault_marker_stops_the_ancestor_search() {
    let outer = TempDir::new().unwrap();
    // Image above the marker boundary must stay invisible to the search.
    write_file(&outer.path().join("secret.png"), PNG_BYTES);
    let vault = outer.path().join("vault");
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    let note = write_note(&vault.join("daily"), "today.md", "![s](secret.png)\n");

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    assert_eq!(output.stats.unresolved_assets, 1);
    assert!(output.html.contains(r#"src="secret.png""#));
}

#[test]
fn unresolved_image_is_left_untouched_and_counted() {
    let vault = TempDir::new().unwrap();
    let note = write_note(vault.path(), "n.md", "![gone](missing.png)\n\ntext\n");

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    assert_document_shell(&output.html, "unresolved");
    assert!(output.html.contains(r#"src="missing.png""#));
    assert_eq!(output.stats.total_assets, 1);
    assert_eq!(output.stats.unresolved_assets, 1);
    assert_eq!(output.stats.embedded_assets, 0);
}

// ── Remote references ────────────────────────────────────────────────────────

#[test]
fn unreachable_remote_image_degrades_to_a_warning() {
    // Port 9 (discard) on loopback: connection refused almost instantly.
    let config = ConversionConfig::builder()
        .fetch_timeout_secs(2)
        .build()
        .unwrap();
    let output = convert_text(
        "![remote](http://127.0.0.1:9/logo.png)\n\nprose\n",
        ".",
        &config,
    );

    assert!(output.html.contains(r#"src="http://127.0.0.1:9/logo.png""#));
    assert_eq!(output.stats.unresolved_assets, 1);
    assert_eq!(output.stats.embedded_assets, 0);
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[test]
fn embedding_is_idempotent_on_data_uris() {
    let vault = TempDir::new().unwrap();
    write_file(&vault.path().join("a.png"), PNG_BYTES);
    let config = ConversionConfig::default();

    let first = convert_text("![a](a.png)", vault.path(), &config);
    assert_eq!(count_data_uris(&first.html), 1);

    // Feed the already-embedded markup through again as raw text: the data
    // URI must pass through byte-for-byte, counted as skipped.
    let body_start = first.html.find("<img").unwrap();
    let body_end = first.html[body_start..].find('>').unwrap() + body_start + 1;
    let img_tag = &first.html[body_start..body_end];

    let second = convert_text(img_tag, vault.path(), &config);
    assert!(second.html.contains(img_tag));
    assert_eq!(second.stats.skipped_assets, 1);
    assert_eq!(second.stats.embedded_assets, 0);
}

// ── Direction detection ──────────────────────────────────────────────────────

#[test]
fn arabic_document_gets_rtl_attributes() {
    let output = convert_text(
        "# ملاحظات الاجتماع\n\nنناقش اليوم خطة العمل للأسبوع القادم بالتفصيل.\n",
        ".",
        &ConversionConfig::default(),
    );

    assert_eq!(output.direction, Direction::Rtl);
    assert_eq!(output.language, "ar");
    assert!(output.html.contains(r#"<html lang="ar" dir="rtl">"#));
}

#[test]
fn latin_code_does_not_flip_an_arabic_document_to_ltr() {
    let text = "نص عربي يشرح المثال التالي بإيجاز شديد\n\n\
                ```rust\nfn a_very_long_latin_identifier_name() -> Result<(), Error> { todo!() }\n```\n";
    let output = convert_text(text, ".", &ConversionConfig::default());
    assert_eq!(output.direction, Direction::Rtl, "stats: {:?}", output.stats);
}

// ── Mixed document ───────────────────────────────────────────────────────────

#[test]
fn mixed_document_end_to_end() {
    let vault = TempDir::new().unwrap();
    fs::create_dir_all(vault.path().join(".obsidian")).unwrap();
    write_file(&vault.path().join("media/diagram.png"), PNG_BYTES);
    let note = write_note(
        &vault.path().join("notes"),
        "weekly-status_report.md",
        "## Summary\n\n\
         ![[diagram.png|architecture]]\n\n\
         ![missing](nowhere.jpg)\n\n\
         | col | val |\n|-----|-----|\n| a   | 1   |\n\n\
         - [x] shipped\n- [ ] pending\n",
    );

    let output = convert(&note, &ConversionConfig::default()).unwrap();

    assert_document_shell(&output.html, "mixed");
    // Title derived from the file stem.
    assert!(output.html.contains("<title>Weekly Status Report</title>"));
    // Wikilink resolved via ancestor search and embedded.
    assert!(output.html.contains(r#"alt="architecture""#));
    assert_eq!(count_data_uris(&output.html), 1);
    // Broken reference preserved.
    assert!(output.html.contains(r#"src="nowhere.jpg""#));
    // Markdown extensions rendered.
    assert!(output.html.contains("<table>"));
    assert!(output.html.contains("checkbox"));

    assert_eq!(output.stats.total_assets, 2);
    assert_eq!(output.stats.embedded_assets, 1);
    assert_eq!(output.stats.unresolved_assets, 1);
}

// ── File output and errors ───────────────────────────────────────────────────

#[test]
fn convert_to_file_produces_the_same_document() {
    let vault = TempDir::new().unwrap();
    let note = write_note(vault.path(), "doc.md", "# Doc\n\nbody\n");
    let out = vault.path().join("doc.html");

    let stats = convert_to_file(&note, &out, &ConversionConfig::default()).unwrap();
    assert_eq!(stats.total_assets, 0);

    let html = fs::read_to_string(&out).unwrap();
    assert_document_shell(&html, "file output");
    assert!(html.contains("<h1>Doc</h1>"));
}

#[test]
fn missing_input_is_a_fatal_error() {
    let err = convert("/no/such/file.md", &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, Md2HtmlError::InputNotFound { .. }));
    let msg = err.to_string();
    assert!(msg.contains("/no/such/file.md"), "got: {msg}");
}
