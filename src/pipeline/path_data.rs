//! # Path Data Compactor
//!
//! Rewrites the value of a `d` attribute without re-serializing the path:
//! whitespace is collapsed, separators around command letters are dropped and
//! fractional numbers go through the numeric normalizer.

use super::number::normalize_number;

/// The SVG path command letters: ten commands, absolute and relative.
pub const PATH_COMMANDS: &str = "MLHVCSQTAZmlhvcsqtaz";

pub fn is_path_command(c: char) -> bool {
    PATH_COMMANDS.contains(c)
}

/// Compact path data.
///
/// Numbers are rewritten in place while scanning, so two literals sharing a
/// textual prefix (`1.5` and `1.55`) are handled independently.
pub fn compact_path_data(d: &str) -> String {
    let bytes = d.as_bytes();
    let mut out = String::with_capacity(d.len());
    let mut pending_space = false;
    let mut after_command = false;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c.is_ascii_whitespace() {
            pending_space = true;
            i += 1;
            continue;
        }

        if is_path_command(c as char) {
            out.push(c as char);
            pending_space = false;
            after_command = true;
            i += 1;
            continue;
        }

        if pending_space && !after_command && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        after_command = false;

        let starts_number = c.is_ascii_digit()
            || (c == b'-' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()));

        if starts_number {
            let end = number_end(bytes, i);
            let token = &d[i..end];
            if token.contains('.') && !has_exponent(bytes, end) {
                out.push_str(&normalize_number(token));
            } else {
                out.push_str(token);
            }
            i = end;
        } else {
            // Multi-byte characters are copied whole.
            let ch = d[i..].chars().next().unwrap_or(' ');
            out.push(ch);
            i += ch.len_utf8();
        }
    }

    out
}

/// End of a `-?\d+(\.\d*)?` token starting at `start`.
fn number_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if bytes[i] == b'-' {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    i
}

fn has_exponent(bytes: &[u8], end: usize) -> bool {
    match bytes.get(end) {
        Some(b'e') | Some(b'E') => {
            let next = match bytes.get(end + 1) {
                Some(b'+') | Some(b'-') => bytes.get(end + 2),
                other => other,
            };
            next.is_some_and(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}
