//! # CSS Compactor
//!
//! Whitespace and comment removal for the content of `<style>` elements.
//! Selector and declaration text is never reordered or deduplicated.

/// Characters that never need surrounding whitespace.
const PUNCTUATION: &[char] = &['{', '}', ':', ';', ',', '>'];

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Walks CSS text, separating comments and quoted strings from plain code.
///
/// A comment ends at the first `*/` found after its opening `/*`, so stars
/// inside the comment (`/* a * b */`, `/**/`, `/*/ x */`) never confuse the
/// pairing. An unterminated comment runs to the end of the input.
struct CssScanner<'a> {
    src: &'a str,
    pos: usize,
}

enum CssPiece<'a> {
    Code(char),
    Comment,
    Str(&'a str),
}

impl<'a> CssScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for CssScanner<'a> {
    type Item = CssPiece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let c = rest.chars().next()?;

        if rest.starts_with("/*") {
            self.pos = match rest[2..].find("*/") {
                Some(close) => self.pos + 2 + close + 2,
                None => self.src.len(),
            };
            return Some(CssPiece::Comment);
        }

        if c == '"' || c == '\'' {
            let end = string_end(rest, c);
            let piece = &rest[..end];
            self.pos += end;
            return Some(CssPiece::Str(piece));
        }

        self.pos += c.len_utf8();
        Some(CssPiece::Code(c))
    }
}

/// Length of the quoted string at the start of `rest`, quotes included.
fn string_end(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    rest.len()
}

/// Remove `/* ... */` comments, leaving everything else untouched.
pub fn strip_css_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    for piece in CssScanner::new(css) {
        match piece {
            CssPiece::Code(c) => out.push(c),
            CssPiece::Str(s) => out.push_str(s),
            CssPiece::Comment => {}
        }
    }
    out
}

/// Minify CSS text.
///
/// ```
/// use svg_minifier::pipeline::css::minify_css;
///
/// assert_eq!(minify_css("a { color : red ; }"), "a{color:red}");
/// ```
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut pending_space = false;
    // Last emitted character was code punctuation (not part of a string).
    let mut after_punctuation = false;
    // Last emitted character was a code `;`.
    let mut trailing_semicolon = false;

    for piece in CssScanner::new(css) {
        match piece {
            CssPiece::Comment => {}
            CssPiece::Code(c) if c.is_whitespace() => pending_space = true,
            CssPiece::Code(c) => {
                let punct = is_punctuation(c);
                if pending_space && !out.is_empty() && !after_punctuation && !punct {
                    out.push(' ');
                }
                if c == '}' && trailing_semicolon {
                    out.pop();
                }
                out.push(c);
                pending_space = false;
                after_punctuation = punct;
                trailing_semicolon = c == ';';
            }
            CssPiece::Str(s) => {
                if pending_space && !out.is_empty() && !after_punctuation {
                    out.push(' ');
                }
                out.push_str(s);
                pending_space = false;
                after_punctuation = false;
                trailing_semicolon = false;
            }
        }
    }

    out
}
