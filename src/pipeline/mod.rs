//! Pipeline stages for Markdown-to-HTML conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the Markdown renderer) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ wikilink ──▶ direction ──▶ render ──▶ embed ──▶ assemble
//! (file)    (![[..]])    (ltr/rtl)    (cmark)    (data:)   (document)
//! ```
//!
//! 1. [`input`]     — read the source document and derive its base directory
//!    and title
//! 2. [`wikilink`]  — rewrite `![[file|alt]]` embeds into standard Markdown
//!    image syntax
//! 3. [`direction`] — strip markup and classify the dominant writing
//!    direction from Unicode bidi classes
//! 4. [`render`]    — Markdown → body HTML via pulldown-cmark (thin
//!    collaborator, fixed extension set)
//! 5. [`locate`]    — map a local image reference to a file, falling back to
//!    an ancestor-directory search
//! 6. [`embed`]     — replace every `<img src>` with a base64 data URI; the
//!    only stage with network I/O
//! 7. [`assemble`]  — wrap body HTML, direction attributes, and the static
//!    stylesheet into a complete document

pub mod assemble;
pub mod direction;
pub mod embed;
pub mod input;
pub mod locate;
pub mod render;
pub mod wikilink;
