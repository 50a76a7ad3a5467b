//! # Structural Stripper
//!
//! The built-in document optimizer: drops comments and non-rendering
//! elements, compacts `<style>` content and whitespace between tags, and
//! reduces numeric precision in path data and in a fixed set of presentation
//! attributes.

use super::css::{minify_css, strip_css_comments};
use super::markup::{self, local_name, segments, tag_name, Segment};
use super::number::normalize_if_fractional;
use super::path_data::compact_path_data;
use super::MinifyOptions;

/// Presentation attributes whose fractional values are rounded.
pub const NUMERIC_ATTRIBUTES: &[&str] = &[
    "x", "y", "width", "height", "cx", "cy", "r", "rx", "ry", "x1", "y1", "x2", "y2", "opacity",
    "stroke-width",
];

/// Run the full structural pass.
pub fn strip_structure(doc: &str, options: &MinifyOptions) -> String {
    let stripped = strip_markup(doc, options, minify_css, true);
    let collapsed = collapse_tag_whitespace(&stripped);
    let trimmed = drop_blank_lines(&collapsed);
    rewrite_numeric_attributes(&trimmed)
}

/// Remove CSS comments from `<style>` content and leave everything else as is.
///
/// External optimizers keep comments inside style blocks, so this always runs
/// on their output.
pub fn strip_style_comments(doc: &str) -> String {
    let options = MinifyOptions {
        remove_metadata: false,
        remove_descriptive_elements: false,
        ..MinifyOptions::default()
    };
    strip_markup(doc, &options, strip_css_comments, false)
}

/// Single pass over the segments: drops XML comments (when `drop_comments`),
/// rewrites style content with `style` and removes the configured elements.
fn strip_markup(
    doc: &str,
    options: &MinifyOptions,
    style: fn(&str) -> String,
    drop_comments: bool,
) -> String {
    let parts: Vec<Segment<'_>> = segments(doc).collect();
    let mut out = String::with_capacity(doc.len());
    let mut in_style = false;
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i];
        i += 1;

        match part {
            Segment::Comment(_) if drop_comments => {}
            Segment::StartTag(raw) => {
                let name = tag_name(raw);
                if is_removed(local_name(name), options) {
                    if markup::is_self_closing(raw) {
                        continue;
                    }
                    if let Some(close) = matching_end(&parts, i, name) {
                        i = close + 1;
                        continue;
                    }
                }
                if local_name(name) == "style" && !markup::is_self_closing(raw) {
                    in_style = true;
                }
                out.push_str(raw);
            }
            Segment::EndTag(raw) => {
                if local_name(tag_name(raw)) == "style" {
                    in_style = false;
                }
                out.push_str(raw);
            }
            Segment::Text(text) if in_style => out.push_str(&style(text)),
            Segment::CData(raw) if in_style => {
                let inner = &raw["<![CDATA[".len()..raw.len() - "]]>".len()];
                out.push_str("<![CDATA[");
                out.push_str(&style(inner));
                out.push_str("]]>");
            }
            other => out.push_str(other.raw()),
        }
    }

    out
}

fn is_removed(local: &str, options: &MinifyOptions) -> bool {
    match local {
        "metadata" => options.remove_metadata,
        "title" | "desc" => options.remove_descriptive_elements,
        _ => false,
    }
}

/// Index of the end tag closing the element opened just before `from`.
fn matching_end(parts: &[Segment<'_>], from: usize, name: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, part) in parts[from..].iter().enumerate() {
        match *part {
            Segment::StartTag(raw) if tag_name(raw) == name && !markup::is_self_closing(raw) => depth += 1,
            Segment::EndTag(raw) if tag_name(raw) == name => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// `>` whitespace `<` becomes `><`.
pub fn collapse_tag_whitespace(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut rest = doc;

    while let Some(gt) = rest.find('>') {
        out.push_str(&rest[..=gt]);
        rest = &rest[gt + 1..];
        let trimmed = rest.trim_start();
        if trimmed.len() != rest.len() && trimmed.starts_with('<') {
            rest = trimmed;
        }
    }

    out.push_str(rest);
    out
}

/// Trim every line and drop the empty ones.
pub fn drop_blank_lines(doc: &str) -> String {
    doc.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compact `d` values and round the listed presentation attributes.
pub fn rewrite_numeric_attributes(doc: &str) -> String {
    markup::rewrite_document_attributes(doc, |name, value| {
        if name == "d" {
            Some(compact_path_data(value))
        } else if NUMERIC_ATTRIBUTES.contains(&name) {
            normalize_if_fractional(value)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_options() -> MinifyOptions {
        MinifyOptions {
            remove_metadata: true,
            remove_descriptive_elements: true,
            ..MinifyOptions::default()
        }
    }

    #[test]
    fn test_strips_comments_and_metadata() {
        let svg = r#"<svg>
  <!-- drawn by hand -->
  <metadata><rdf:RDF><cc:Work/></rdf:RDF></metadata>
  <rect width="10" height="10"/>
</svg>"#;
        let out = strip_structure(svg, &all_options());
        assert_eq!(out, r#"<svg><rect width="10" height="10"/></svg>"#);
    }

    #[test]
    fn test_keeps_metadata_when_disabled() {
        let svg = "<svg><metadata>m</metadata><title>T</title></svg>";
        let out = strip_structure(svg, &MinifyOptions {
            remove_metadata: false,
            remove_descriptive_elements: false,
            ..MinifyOptions::default()
        });
        assert_eq!(out, svg);
    }

    #[test]
    fn test_removes_title_desc_and_self_closing_metadata() {
        let svg = "<svg><title>Hero</title><desc>A <b>bold</b> hero</desc><svg:metadata/><g/></svg>";
        assert_eq!(strip_structure(svg, &all_options()), "<svg><g/></svg>");
    }

    #[test]
    fn test_unclosed_element_is_kept() {
        let svg = "<svg><title>Hero</svg>";
        assert_eq!(strip_structure(svg, &all_options()), svg);
    }

    #[test]
    fn test_minifies_style_keeping_opening_tag() {
        let svg = "<svg>\n<style type=\"text/css\">\n  .a { fill : red ; } /* note */\n</style>\n</svg>";
        assert_eq!(
            strip_structure(svg, &all_options()),
            "<svg><style type=\"text/css\">.a{fill:red}</style></svg>"
        );
    }

    #[test]
    fn test_minifies_style_inside_cdata() {
        let svg = "<style><![CDATA[\n .a { fill: red; }\n]]></style>";
        assert_eq!(strip_structure(svg, &all_options()), "<style><![CDATA[.a{fill:red}]]></style>");
    }

    #[test]
    fn test_rewrites_numeric_attributes_only() {
        let svg = r#"<rect id="r1.50" x="1.5000" dx="2.5000" width="100" stroke-width="0.12345" stroke-dasharray="1.000"/>"#;
        assert_eq!(
            rewrite_numeric_attributes(svg),
            r#"<rect id="r1.50" x="1.5" dx="2.5000" width="100" stroke-width="0.123" stroke-dasharray="1.000"/>"#
        );
    }

    #[test]
    fn test_rewrites_path_data() {
        let svg = r#"<path d="M 10.00 20 L 30.55567 40" id="d"/>"#;
        assert_eq!(rewrite_numeric_attributes(svg), r#"<path d="M10 20L30.556 40" id="d"/>"#);
    }

    #[test]
    fn test_text_content_untouched() {
        let svg = "<text x=\"1.0\">width=\"1.000\"</text>";
        assert_eq!(rewrite_numeric_attributes(svg), "<text x=\"1\">width=\"1.000\"</text>");
    }

    #[test]
    fn test_style_comments_only() {
        let svg = "<svg>\n  <!-- keep -->\n  <style>\n .a { fill: red; } /* a * b */\n</style>\n</svg>";
        assert_eq!(
            strip_style_comments(svg),
            "<svg>\n  <!-- keep -->\n  <style>\n .a { fill: red; } \n</style>\n</svg>"
        );
    }

    #[test]
    fn test_collapse_and_blank_lines() {
        assert_eq!(collapse_tag_whitespace("<a>  \n <b> x </b>"), "<a><b> x </b>");
        assert_eq!(drop_blank_lines("  a\n\n   \n b  "), "a\nb");
    }
}
