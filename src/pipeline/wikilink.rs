//! Wikilink normalisation: Obsidian image embeds → standard Markdown.
//!
//! Obsidian writes embedded images as `![[file.png]]` or
//! `![[file.png|alt text]]`, syntax no CommonMark renderer understands.
//! Rewriting to `![alt](file.png)` before rendering means the rest of the
//! pipeline only ever sees standard image syntax.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// Non-greedy, single-line: a reference may not itself contain `]`.
static RE_WIKILINK_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[([^\]\n]+)\]\]").unwrap());

/// Rewrite every `![[ref]]` / `![[ref|alt]]` occurrence into `![alt](ref)`.
///
/// Text before the first pipe is the asset filename, text after it the alt
/// text; without a pipe the whole content is the filename and alt is empty.
/// No other syntax is touched; absence of matches is a no-op.
pub fn normalize_wikilinks(text: &str) -> Cow<'_, str> {
    RE_WIKILINK_IMAGE.replace_all(text, |caps: &Captures| {
        let content = &caps[1];
        let (filename, alt) = match content.split_once('|') {
            Some((file, alt)) => (file, alt),
            None => (content, ""),
        };
        format!("![{alt}]({filename})")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_embed_gets_empty_alt() {
        assert_eq!(normalize_wikilinks("![[name.png]]"), "![](name.png)");
    }

    #[test]
    fn pipe_separates_filename_and_alt() {
        assert_eq!(
            normalize_wikilinks("![[name.png|alt text]]"),
            "![alt text](name.png)"
        );
    }

    #[test]
    fn only_first_pipe_splits() {
        assert_eq!(
            normalize_wikilinks("![[a.png|alt|with pipe]]"),
            "![alt|with pipe](a.png)"
        );
    }

    #[test]
    fn multiple_embeds_in_one_line() {
        assert_eq!(
            normalize_wikilinks("see ![[a.png]] and ![[b.jpg|B]]"),
            "see ![](a.png) and ![B](b.jpg)"
        );
    }

    #[test]
    fn embed_may_not_span_lines() {
        let text = "![[broken\n.png]]";
        assert_eq!(normalize_wikilinks(text), text);
    }

    #[test]
    fn standard_syntax_is_untouched() {
        let text = "![alt](img.png) and [[a plain wikilink]]";
        assert_eq!(normalize_wikilinks(text), text);
    }

    #[test]
    fn no_matches_is_borrowed() {
        assert!(matches!(
            normalize_wikilinks("nothing here"),
            Cow::Borrowed(_)
        ));
    }
}
