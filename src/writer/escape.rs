//! Escaping of text and attribute values for markup output.

/// Escapes text content: `&`, `<` and `>`.
///
/// # Examples
/// ```
/// # use relab::writer::escape::escape_text;
/// assert_eq!(escape_text("ADV ALGORITHMS"), "ADV ALGORITHMS");
/// assert_eq!(escape_text("R&D <lab>"), "R&amp;D &lt;lab&gt;");
/// ```
pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Escapes an attribute value for use in double quotes:
/// `&`, `<`, `>`, `"` and `'`.
///
/// # Examples
/// ```
/// # use relab::writer::escape::escape_attribute;
/// assert_eq!(escape_attribute("1,001010,1"), "1,001010,1");
/// assert_eq!(escape_attribute("Baillon's \"Crake\""), "Baillon&apos;s &quot;Crake&quot;");
/// ```
pub fn escape_attribute(value: &str) -> String {
    escape(value, true)
}

/// Returns `true` if `s` contains no character that needs escaping in an attribute.
pub fn needs_no_escaping(s: &str) -> bool {
    !s.chars().any(|c| matches!(c, '&' | '<' | '>' | '"' | '\''))
}

fn escape(s: &str, in_attribute: bool) -> String {
    // Don't allocate twice for the common case
    if needs_no_escaping(s) {
        return s.to_string();
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            '\'' if in_attribute => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
