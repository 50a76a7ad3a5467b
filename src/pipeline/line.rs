//! # Line Compactor
//!
//! Puts the whole document on a single line. Applied last, and only when the
//! output does not need to stay readable.

/// Collapse the document onto one line.
///
/// ```
/// use svg_minifier::pipeline::line::compact_lines;
///
/// assert_eq!(compact_lines("<svg>\n  <g >\n  <rect />\n</g></svg>\n"), "<svg><g><rect/></g></svg>");
/// ```
pub fn compact_lines(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut pending_space = false;
    let mut chars = doc.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            let between_tags = out.ends_with('>') && c == '<';
            let closes_tag = c == '>' || (c == '/' && chars.peek() == Some(&'>'));
            if !between_tags && !closes_tag {
                out.push(' ');
            }
        }
        pending_space = false;
        out.push(c);
    }

    out
}
