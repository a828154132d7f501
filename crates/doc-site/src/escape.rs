//! HTML escaping for text and attribute contexts.

/// Escape for HTML attribute values (`href`, `id`, ...).
///
/// Escapes: `& < > " '`
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape for element content. Quotes are safe in element text.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape JSON for embedding inside a `<script>` element.
///
/// `</` could close the element early; `<\/` means the same thing to JSON.
pub fn escape_script_content(s: &str) -> String {
    s.replace("</", r"<\/")
}
