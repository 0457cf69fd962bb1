//! Helpers for writing markup from `Brick::to_html`.

use std::fmt::Write;

/// Escape text for use in element content or a double-quoted attribute.
#[must_use]
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

/// Render ` name="value"` pairs, escaping values. Empty values are skipped.
#[must_use]
pub fn attributes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::new();
    for (name, value) in pairs {
        if value.is_empty() {
            continue;
        }
        let _ = write!(out, r#" {name}="{}""#, escape_html(value));
    }
    out
}
