//! Direction classification: dominant writing direction from bidi classes.
//!
//! The output document needs exactly one `dir` attribute, so a full Unicode
//! bidi paragraph analysis would be wasted work. Instead we strip Markdown
//! and HTML syntax from the raw text, then count strongly-directional
//! characters by their Unicode bidirectional class: a simple majority vote
//! decides the document direction.
//!
//! Known simplification, by policy: majority rules, ties go left-to-right.
//! A document mixing scripts resolves by count, not by first-strong-character
//! as a conforming bidi implementation would. This is a deliberate scope
//! limitation — do not "fix" it silently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_bidi::{bidi_class, BidiClass};

/// Dominant writing direction of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Language hint for the HTML `lang` attribute, derived from direction.
    pub fn lang_hint(self) -> &'static str {
        match self {
            Direction::Ltr => "en",
            Direction::Rtl => "ar",
        }
    }
}

/// A classification verdict plus the tallies that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionVerdict {
    pub direction: Direction,
    pub rtl_count: usize,
    pub ltr_count: usize,
}

// Stripping order matters: fences before inline code, images before links
// (image syntax is link syntax with a leading `!`), and punctuation runs
// last so earlier patterns still see their delimiters.
static RE_FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").unwrap());
static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_MD_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*_~>`|\\\-]+").unwrap());
static RE_BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Remove Markdown syntax and HTML tags, leaving prose for classification.
///
/// Every stripped region is replaced by a single space, never concatenated,
/// so unrelated words on either side of a removed span stay separate and
/// raw syntax characters cannot bias the tally.
pub fn strip_markup(text: &str) -> String {
    let text = RE_FENCED_CODE.replace_all(text, " ");
    let text = RE_INLINE_CODE.replace_all(&text, " ");
    let text = RE_IMAGE.replace_all(&text, " ");
    let text = RE_LINK.replace_all(&text, " ");
    let text = RE_HTML_TAG.replace_all(&text, " ");
    let text = RE_MD_PUNCT.replace_all(&text, " ");
    RE_BARE_URL.replace_all(&text, " ").into_owned()
}

/// Classify the dominant writing direction of raw document text.
///
/// Strongly right-to-left classes (`R`, `AL`, `AN`) and the strongly
/// left-to-right class (`L`) are counted; every other class — neutral
/// punctuation, whitespace, European digits, combining marks — is ignored.
/// The verdict is `rtl` iff the rtl count strictly exceeds the ltr count.
pub fn classify(text: &str) -> DirectionVerdict {
    let clean = strip_markup(text);
    let mut rtl_count = 0usize;
    let mut ltr_count = 0usize;
    for ch in clean.chars() {
        match bidi_class(ch) {
            BidiClass::R | BidiClass::AL | BidiClass::AN => rtl_count += 1,
            BidiClass::L => ltr_count += 1,
            _ => {}
        }
    }
    let direction = if rtl_count > ltr_count {
        Direction::Rtl
    } else {
        Direction::Ltr
    };
    DirectionVerdict {
        direction,
        rtl_count,
        ltr_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_defaults_ltr() {
        let v = classify("");
        assert_eq!(v.direction, Direction::Ltr);
        assert_eq!((v.rtl_count, v.ltr_count), (0, 0));
    }

    #[test]
    fn digits_and_punctuation_are_neutral() {
        let v = classify("1234 5678 !? ... 42");
        assert_eq!(v.direction, Direction::Ltr);
        assert_eq!((v.rtl_count, v.ltr_count), (0, 0));
    }

    #[test]
    fn english_prose_is_ltr() {
        let v = classify("# Heading\n\nSome plain English prose.");
        assert_eq!(v.direction, Direction::Ltr);
        assert!(v.ltr_count > 0);
        assert_eq!(v.rtl_count, 0);
    }

    #[test]
    fn arabic_prose_is_rtl() {
        let v = classify("مرحبا بالعالم، هذا نص عربي طويل نسبيا");
        assert_eq!(v.direction, Direction::Rtl);
        assert!(v.rtl_count > v.ltr_count);
    }

    #[test]
    fn hebrew_is_rtl() {
        assert_eq!(classify("שלום עולם").direction, Direction::Rtl);
    }

    #[test]
    fn majority_wins_in_mixed_text() {
        // More Arabic letters than Latin ones.
        let v = classify("hi مرحبا بالعالم الواسع الكبير");
        assert_eq!(v.direction, Direction::Rtl);
        // And the other way around.
        let v = classify("مرحبا hello there dear world");
        assert_eq!(v.direction, Direction::Ltr);
    }

    #[test]
    fn tie_defaults_ltr() {
        // One strong character each.
        let v = classify("a א");
        assert_eq!((v.rtl_count, v.ltr_count), (1, 1));
        assert_eq!(v.direction, Direction::Ltr);
    }

    #[test]
    fn code_and_urls_do_not_bias_the_count() {
        // Latin-heavy code block and URL around a short Arabic sentence:
        // stripping must prevent the syntax from flipping the verdict.
        let text = "```\nlet total_latin_identifier = compute();\n```\n\n\
                    مرحبا بالعالم\n\nhttps://example.com/very/long/latin/path";
        let v = classify(text);
        assert_eq!(v.direction, Direction::Rtl);
    }

    #[test]
    fn link_labels_are_stripped() {
        let v = classify("[an english label](https://example.com) العربية هنا");
        assert_eq!(v.direction, Direction::Rtl);
    }

    #[test]
    fn stripped_regions_become_single_spaces() {
        let clean = strip_markup("foo`code`bar");
        assert!(clean.contains("foo bar"), "got: {clean:?}");
    }

    #[test]
    fn lang_hint_follows_direction() {
        assert_eq!(Direction::Rtl.lang_hint(), "ar");
        assert_eq!(Direction::Ltr.lang_hint(), "en");
    }
}
