//! Text helpers for page rendering

use regex::Regex;
use std::sync::LazyLock;

/// Sub-elements that carry tags or code inside a description
static MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?s)\s*<span\s+class="tag"[^>]*>.*?</span>"#,
        r#"(?s)\s*<code\s+class="snippet"[^>]*>.*?</code>"#,
        r"(?s)\s*<pre\b[^>]*>.*?</pre>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Valid regex"))
    .collect()
});

/// Whitespace runs that contain a line break
static SOURCE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\r?\n\s*").expect("Valid regex"));

/// Remove tag/code sub-elements and source-formatting line breaks
pub fn strip_markers(description: &str) -> String {
    let mut text = description.to_string();
    for marker in MARKERS.iter() {
        text = marker.replace_all(&text, "").into_owned();
    }
    SOURCE_BREAKS.replace_all(&text, " ").trim().to_string()
}

/// Remove the indentation shared by every non-blank line.
///
/// Leading and trailing blank lines are dropped, as is trailing whitespace.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l[indent..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape text for use in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Anchor-safe form of a free-form string
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Decorative comment banner placed before a page block
pub fn banner(name: &str) -> String {
    let rule = "=".repeat(name.chars().count() + 8);
    format!("<!-- {rule} -->\n<!-- ==== {name} ==== -->\n<!-- {rule} -->")
}
