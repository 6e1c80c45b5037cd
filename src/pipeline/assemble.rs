//! Document assembly: wrap body HTML into a complete, styled document.
//!
//! Thin, deliberately dumb stage: the direction verdict picks the `dir` and
//! `lang` attributes, the stylesheet is static (with `[dir="rtl"]` variants
//! for borders and list padding), and the title is escaped into both
//! `<title>` and a leading `<h1>`.

use crate::pipeline::direction::DirectionVerdict;

/// Stylesheet embedded into every produced document.
const EMBEDDED_CSS: &str = "\
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}
body {
    font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Oxygen,
        Ubuntu, Cantarell, \"Fira Sans\", \"Droid Sans\", \"Helvetica Neue\", Arial,
        sans-serif;
    line-height: 1.7;
    color: #1a1a1a;
    background: #fff;
    max-width: 48em;
    margin: 0 auto;
    padding: 2em 1.5em;
}
h1, h2, h3, h4, h5, h6 {
    margin-top: 1.4em;
    margin-bottom: 0.6em;
    font-weight: 600;
    line-height: 1.3;
}
h1 { font-size: 2em; border-bottom: 1px solid #e0e0e0; padding-bottom: 0.3em; }
h2 { font-size: 1.5em; border-bottom: 1px solid #e0e0e0; padding-bottom: 0.25em; }
h3 { font-size: 1.25em; }
p { margin-bottom: 1em; }
a { color: #0366d6; text-decoration: none; }
a:hover { text-decoration: underline; }
img { max-width: 100%; height: auto; display: block; margin: 1em 0; }
pre {
    background: #f6f8fa;
    border: 1px solid #e1e4e8;
    border-radius: 6px;
    padding: 1em;
    overflow-x: auto;
    margin-bottom: 1em;
    direction: ltr;
    text-align: left;
}
code {
    font-family: \"SFMono-Regular\", Consolas, \"Liberation Mono\", Menlo, Courier, monospace;
    font-size: 0.9em;
    direction: ltr;
}
p code, li code {
    background: #f0f0f0;
    padding: 0.15em 0.4em;
    border-radius: 3px;
}
blockquote {
    border-left: 4px solid #dfe2e5;
    padding: 0.5em 1em;
    margin-bottom: 1em;
    color: #555;
    background: #fafafa;
}
[dir=\"rtl\"] blockquote {
    border-left: none;
    border-right: 4px solid #dfe2e5;
}
ul, ol { margin-bottom: 1em; padding-left: 2em; }
[dir=\"rtl\"] ul, [dir=\"rtl\"] ol { padding-left: 0; padding-right: 2em; }
li { margin-bottom: 0.3em; }
table {
    border-collapse: collapse;
    width: 100%;
    margin-bottom: 1em;
    overflow-x: auto;
    display: block;
}
th, td {
    border: 1px solid #dfe2e5;
    padding: 0.6em 1em;
    text-align: start;
}
th { background: #f6f8fa; font-weight: 600; }
tr:nth-child(even) { background: #fafbfc; }
hr { border: none; border-top: 1px solid #e0e0e0; margin: 2em 0; }
";

/// Wrap body HTML, direction attributes, and the stylesheet into a document.
pub fn assemble_document(title: &str, body_html: &str, verdict: &DirectionVerdict) -> String {
    let direction = verdict.direction;
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\" dir=\"{dir}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>\n{css}</style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        lang = direction.lang_hint(),
        dir = direction.as_str(),
        title = title,
        css = EMBEDDED_CSS,
        body = body_html,
    )
}

/// Escape text for interpolation into HTML content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
