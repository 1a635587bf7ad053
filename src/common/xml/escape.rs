use aho_corasick::{AhoCorasick, MatchKind};
use memchr::memchr;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Built once on first use, shared across threads
static XML_ESCAPER: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| AhoCorasick::builder().build(["&", "<", ">", "\"", "'"]).ok());

static XML_UNESCAPER: Lazy<Option<AhoCorasick>> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .ok()
});

const ESCAPED: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];
const UNESCAPED: [&str; 5] = ["&", "<", ">", "\"", "'"];

/// Escape XML special characters for use in text or attribute values.
///
/// # Examples
///
/// ```
/// use lectern::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<t>\"x\"</t>"), "&lt;t&gt;&quot;x&quot;&lt;/t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    match XML_ESCAPER.as_ref() {
        Some(ac) => ac.replace_all(s, &ESCAPED),
        None => s
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    }
}

/// Unescape the five predefined entities and numeric character references.
///
/// Unknown or malformed references are left as written. Input without any
/// `&` is returned borrowed.
///
/// # Examples
///
/// ```
/// use lectern::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("caf&#233; &#x2013;"), "café –");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if memchr(b'&', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }
    let named = match XML_UNESCAPER.as_ref() {
        Some(ac) => ac.replace_all(s, &UNESCAPED),
        None => s.to_string(),
    };
    // Numeric references survive the named pass untouched, except that a
    // `&amp;#..;` sequence has now become `&#..;`. Resolve numeric references
    // on the original text to avoid double-unescaping.
    if !s.contains("&#") {
        return Cow::Owned(named);
    }
    Cow::Owned(unescape_with_char_refs(s))
}

fn unescape_with_char_refs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.find(';') {
            Some(end) => match resolve_entity(&tail[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[end + 1..];
                },
                None => {
                    out.push('&');
                    rest = &tail[1..];
                },
            },
            None => {
                out.push_str(tail);
                rest = "";
            },
        }
    }
    out.push_str(rest);
    out
}

/// Character for an entity name as it appears between `&` and `;`.
pub(crate) fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        },
    }
}
