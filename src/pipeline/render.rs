//! Markdown rendering: thin wrapper around pulldown-cmark.
//!
//! The renderer is an external collaborator — the pipeline only relies on
//! its output carrying `<img>` tags whose `src` attribute holds the original
//! reference unchanged (modulo HTML attribute escaping, which the embedder
//! undoes before resolution). The extension set is fixed: tables, footnotes,
//! strikethrough, task lists, smart punctuation, heading attributes.

use pulldown_cmark::{html, Options, Parser};

/// Render Markdown to body HTML with the fixed extension set.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, parser);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markup() {
        let body = render_markdown("# Title\n\nSome *emphasis*.");
        assert!(body.contains("<h1>Title</h1>"));
        assert!(body.contains("<em>emphasis</em>"));
    }

    #[test]
    fn image_src_carries_the_original_reference() {
        let body = render_markdown("![alt text](images/photo.png)");
        assert!(
            body.contains(r#"<img src="images/photo.png" alt="alt text""#),
            "got: {body}"
        );
    }

    #[test]
    fn tables_are_enabled() {
        let body = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(body.contains("<table>"));
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let body = render_markdown("```rust\nfn main() {}\n```");
        assert!(body.contains(r#"<pre><code class="language-rust">"#));
    }

    #[test]
    fn smart_punctuation_produces_typographic_quotes() {
        let body = render_markdown("\"quoted\"");
        assert!(body.contains('\u{201C}'), "got: {body}");
    }
}
