//! # Markup Scanner
//!
//! A lossless segmenter for SVG text built on `quick_xml::Reader`. It does not
//! build a tree and does not validate anything: it only tells apart the regions
//! where each rewriting rule is allowed to act (text, comments, CDATA sections,
//! declarations, start tags and end tags) and exposes the attributes of a start
//! tag together with the byte span of each value.
//!
//! Every segment is sliced from the source between two reader positions, so
//! concatenating the raw text of every segment yields the input unchanged.
//! Once the reader hits a syntax error the remainder is one text segment.

use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

/// A region of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Character data between tags.
    Text(&'a str),
    /// `<!-- ... -->`
    Comment(&'a str),
    /// `<![CDATA[ ... ]]>`
    CData(&'a str),
    /// `<? ... ?>` and `<! ... >` (DOCTYPE and friends).
    Declaration(&'a str),
    /// `<name ...>` or `<name .../>`
    StartTag(&'a str),
    /// `</name>`
    EndTag(&'a str),
}

impl<'a> Segment<'a> {
    /// The exact source text of the segment.
    pub fn raw(&self) -> &'a str {
        match *self {
            Segment::Text(s)
            | Segment::Comment(s)
            | Segment::CData(s)
            | Segment::Declaration(s)
            | Segment::StartTag(s)
            | Segment::EndTag(s) => s,
        }
    }
}

/// Iterator over the segments of a document.
pub struct Segments<'a> {
    src: &'a str,
    reader: Reader<&'a [u8]>,
    pos: usize,
}

/// Split `doc` into segments.
pub fn segments(doc: &str) -> Segments<'_> {
    let mut reader = Reader::from_str(doc);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    Segments { src: doc, reader, pos: 0 }
}

impl<'a> Segments<'a> {
    fn take_rest(&mut self) -> Segment<'a> {
        let src = self.src;
        let start = self.pos;
        self.pos = src.len();
        Segment::Text(&src[start..])
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        if self.pos >= src.len() {
            return None;
        }
        let start = self.pos;

        let event = match self.reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                trace!("Markup scan stopped at byte {}: {}", start, e);
                return Some(self.take_rest());
            }
        };

        let end = self.reader.buffer_position() as usize;
        let Some(raw) = src.get(start..end).filter(|raw| !raw.is_empty()) else {
            return Some(self.take_rest());
        };
        self.pos = end;

        let segment = match event {
            Event::Eof => {
                self.pos = start;
                return Some(self.take_rest());
            }
            Event::Start(_) | Event::Empty(_) if !tag_name(raw).is_empty() => Segment::StartTag(raw),
            Event::End(_) => Segment::EndTag(raw),
            Event::Comment(_) => Segment::Comment(raw),
            Event::CData(_) => Segment::CData(raw),
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => Segment::Declaration(raw),
            _ => Segment::Text(raw),
        };

        Some(segment)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.') || !c.is_ascii()
}

/// Name of a start or end tag (`<svg:rect ...>` gives `svg:rect`).
pub fn tag_name(raw: &str) -> &str {
    let body = raw.trim_start_matches('<').trim_start_matches('/');
    let end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    &body[..end]
}

/// Tag name without its namespace prefix.
pub fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

pub fn is_self_closing(raw: &str) -> bool {
    raw.ends_with("/>")
}

/// An attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Byte range of `value` inside the raw tag text.
    pub value_span: Range<usize>,
}

/// Byte range of `part` inside `raw`, when `part` borrows from it.
fn span_in(raw: &str, part: &[u8]) -> Option<Range<usize>> {
    let start = (part.as_ptr() as usize).checked_sub(raw.as_ptr() as usize)?;
    let end = start + part.len();
    (end <= raw.len() && raw.is_char_boundary(start) && raw.is_char_boundary(end)).then_some(start..end)
}

/// Parse the attributes of a start tag.
///
/// Malformed attributes (no value, unquoted value) are skipped and never
/// rewritten.
pub fn attributes(raw: &str) -> Vec<Attribute<'_>> {
    let body = raw.strip_prefix('<').unwrap_or(raw);
    let content = body
        .strip_suffix("/>")
        .or_else(|| body.strip_suffix('>'))
        .unwrap_or(body);
    let start = BytesStart::from_content(content, tag_name(raw).len());
    let mut iter = start.attributes();
    iter.with_checks(false);

    let parsed: Vec<Attribute<'_>> = iter
        .filter_map(Result::ok)
        .filter_map(|attr| {
            let name = span_in(raw, attr.key.as_ref())?;
            let value_span = span_in(raw, &attr.value)?;
            Some(Attribute {
                name: &raw[name],
                value: &raw[value_span.clone()],
                value_span,
            })
        })
        .collect();
    parsed
}

/// Rebuild a start tag, letting `rewrite` replace attribute values.
///
/// `rewrite(name, value)` returns `Some(new_value)` to replace the value or
/// `None` to keep it. Everything else in the tag is copied verbatim.
pub fn rewrite_attributes<F>(raw: &str, mut rewrite: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut copied = 0;

    for attr in attributes(raw) {
        if let Some(new_value) = rewrite(attr.name, attr.value) {
            out.push_str(&raw[copied..attr.value_span.start]);
            out.push_str(&new_value);
            copied = attr.value_span.end;
        }
    }

    out.push_str(&raw[copied..]);
    out
}

/// Apply [`rewrite_attributes`] to every start tag of a document.
pub fn rewrite_document_attributes<F>(doc: &str, mut rewrite: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut out = String::with_capacity(doc.len());
    for segment in segments(doc) {
        match segment {
            Segment::StartTag(raw) => out.push_str(&rewrite_attributes(raw, &mut rewrite)),
            other => out.push_str(other.raw()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0"?>
<!DOCTYPE svg [<!ENTITY a "b">]>
<svg width="10" data-x='a > b'>
  <!-- note <rect/> -->
  <style><![CDATA[ .a > .b { } ]]></style>
  <rect x="1"/>
  <text x="2">a &lt; b, héllo</text>
</svg>"#;

    #[test]
    fn test_lossless() {
        let rebuilt: String = segments(DOC).map(|s| s.raw()).collect();
        assert_eq!(rebuilt, DOC);
    }

    #[test]
    fn test_segment_kinds() {
        let kinds: Vec<_> = segments(DOC)
            .filter(|s| !matches!(s, Segment::Text(_)))
            .collect();
        assert_eq!(kinds[0], Segment::Declaration(r#"<?xml version="1.0"?>"#));
        assert_eq!(kinds[1], Segment::Declaration(r#"<!DOCTYPE svg [<!ENTITY a "b">]>"#));
        assert_eq!(kinds[2], Segment::StartTag(r#"<svg width="10" data-x='a > b'>"#));
        assert_eq!(kinds[3], Segment::Comment("<!-- note <rect/> -->"));
        assert_eq!(kinds[4], Segment::StartTag("<style>"));
        assert_eq!(kinds[5], Segment::CData("<![CDATA[ .a > .b { } ]]>"));
        assert_eq!(kinds[6], Segment::EndTag("</style>"));
        assert_eq!(kinds[7], Segment::StartTag(r#"<rect x="1"/>"#));
        assert_eq!(kinds[8], Segment::StartTag(r#"<text x="2">"#));
        assert_eq!(kinds[9], Segment::EndTag("</text>"));
        assert_eq!(kinds[10], Segment::EndTag("</svg>"));
    }

    #[test]
    fn test_unterminated_comment_is_text() {
        let parts: Vec<_> = segments("<a/><!-- open").collect();
        assert_eq!(parts, vec![Segment::StartTag("<a/>"), Segment::Text("<!-- open")]);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_name("<svg:rect x='1'/>"), "svg:rect");
        assert_eq!(tag_name("</metadata>"), "metadata");
        assert_eq!(local_name("svg:metadata"), "metadata");
        assert_eq!(local_name("title"), "title");
    }

    #[test]
    fn test_attributes() {
        let raw = r#"<rect id="a" class = 'b c' width="10"/>"#;
        let attrs = attributes(raw);
        let pairs: Vec<_> = attrs.iter().map(|a| (a.name, a.value)).collect();
        assert_eq!(pairs, vec![("id", "a"), ("class", "b c"), ("width", "10")]);
        assert_eq!(&raw[attrs[1].value_span.clone()], "b c");
    }

    #[test]
    fn test_rewrite_attributes_keeps_quotes() {
        let out = rewrite_attributes(r#"<rect x='1.50' y="2" dx="3.0"/>"#, |name, value| {
            (name == "x").then(|| value.trim_end_matches('0').to_string())
        });
        assert_eq!(out, r#"<rect x='1.5' y="2" dx="3.0"/>"#);
    }
}
