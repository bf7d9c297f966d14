//! `[INFO]` block extraction and splicing.
//!
//! The INFO block is the text between the first `[INFO]` marker and the first
//! `[AIRPORT]` marker that follows it. Its content is opaque here.

use regex::Regex;
use std::sync::LazyLock;

static INFO_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[INFO\]\s*(.*?)\s*\[AIRPORT\]").expect("info pattern is a valid regex")
});

// Groups 1 and 2 keep each marker together with the whitespace hugging it.
static INFO_SPLICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(\[INFO\]\s*).*?(\s*\[AIRPORT\])").expect("splice pattern is a valid regex")
});

/// Trimmed content of the first INFO block, or `None` when the markers are
/// missing, out of order, or enclose only whitespace.
pub fn extract_info(text: &str) -> Option<&str> {
    let caps = INFO_BLOCK.captures(text)?;
    let content = caps.get(1)?.as_str().trim();
    if content.is_empty() { None } else { Some(content) }
}

/// Replace the first INFO block of `target` with `content`, inserted verbatim.
/// Returns `None` when `target` has no `[INFO]`…`[AIRPORT]` pair.
pub fn splice_info(target: &str, content: &str) -> Option<String> {
    let caps = INFO_SPLICE.captures(target)?;
    let whole = caps.get(0)?;
    let head = caps.get(1)?.as_str();
    let tail = caps.get(2)?.as_str();

    let mut out = String::with_capacity(target.len() + content.len());
    out.push_str(&target[..whole.start()]);
    out.push_str(head);
    out.push_str(content);
    out.push_str(tail);
    out.push_str(&target[whole.end()..]);
    Some(out)
}
