//! Escaping utilities for report generation.
//!
//! Paths, media types and schema names come straight from the compared
//! documents and must be escaped before they are embedded in HTML.

/// Escape a string for inclusion in HTML content.
///
/// # Examples
///
/// ```
/// use openapi_delta::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
/// assert_eq!(escape_html("/pets/{id}"), "/pets/{id}");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an optional string, rendering `None` as `default`.
#[must_use]
pub fn escape_html_opt(s: Option<&str>, default: &str) -> String {
    escape_html(s.unwrap_or(default))
}

/// Strip ASCII control characters except newline and tab.
///
/// Used on text written to a terminal, where an escape sequence inside a
/// description would otherwise be interpreted.
#[must_use]
pub fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html_opt(None, "-"), "-");
        assert_eq!(escape_html_opt(Some("<b>"), "-"), "&lt;b&gt;");
    }

    #[test]
    fn test_strip_control_chars() {
        assert_eq!(strip_control_chars("ok\x1b[31mred"), "ok[31mred");
        assert_eq!(strip_control_chars("a\tb\nc"), "a\tb\nc");
    }
}
