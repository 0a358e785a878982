//! Comment text cleanup.
//!
//! YouTube returns `textDisplay` as HTML-ish text: entities, links wrapped in
//! anchor tags, line breaks as `<br>`. [`normalize`] reduces it to plain
//! prose suitable for chunking and embedding.

use regex::Regex;
use std::sync::LazyLock;

/// Any token starting with `http` is treated as a link, malformed or not.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\.\S+").expect("valid URL regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^a-zA-Z0-9\s.,!?'"]"#).expect("valid charset regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Clean a raw comment.
///
/// Decodes HTML entities, strips URLs and tags, drops everything outside
/// ASCII letters, digits, whitespace and `.,!?'"`, then collapses whitespace.
/// Never fails; the result may be empty.
pub fn normalize(raw: &str) -> String {
    let text = html_escape::decode_html_entities(raw);
    let text = URL_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, "");
    let text = DISALLOWED_RE.replace_all(&text, "");
    // Dropping tags or characters can splice a link back together.
    let text = URL_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}
