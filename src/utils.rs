/// Escape a string for use inside a quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a string for use as element text content.
///
/// The reader drops whitespace-only character data as inter-element
/// formatting, so leading and trailing whitespace is emitted as numeric
/// character references to keep it addressable on the way back in.
pub fn escape_text(s: &str) -> String {
    let lead_end = s.len() - s.trim_start().len();
    let trail_start = s.trim_end().len();

    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.char_indices() {
        let boundary = i < lead_end || i >= trail_start;
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if boundary && c.is_whitespace() => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
