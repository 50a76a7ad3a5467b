//! # Identifier Renamer
//!
//! Replaces every `id` and `class` name with a short alias and rewrites the
//! references to them so that the document keeps rendering the same way.
//!
//! ## Reference contexts
//! - `id="X"`: full-value match.
//! - `class="X Y"`: token by token, separators preserved.
//! - `href` / `xlink:href` values of the form `#X`.
//! - `url(#X)` (optionally quoted) in any other attribute and in CSS declarations.
//! - `#X` and `.X` selectors in CSS rule preludes (at-rule preludes excluded).
//! - SMIL sync-base timing values (`begin="X.end+1s"`).
//! - `aria-labelledby` / `aria-describedby` id lists.
//!
//! Names are always read as a maximal identifier run and looked up exactly,
//! so `#hero-bg` is never treated as `#hero` followed by `-bg`.

use std::collections::{BTreeMap, BTreeSet};

use super::markup::{attributes, is_self_closing, local_name, rewrite_attributes, segments, tag_name, Segment};

/// Alias for the `index`-th name: `a`..`z`, then `aa`, `ab`, ...
pub fn alias(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Whether `name` can appear unescaped after `#` or `.` in a selector.
///
/// Other names are still renamed in attributes but never matched in CSS.
pub fn is_css_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let start_ok = match chars.next() {
        None => false,
        Some('-') => chars.next().is_some_and(|c| is_ident_char(c) && !c.is_ascii_digit()),
        Some(c) => !c.is_ascii_digit(),
    };
    start_ok && name.chars().all(is_ident_char)
}

/// End of the identifier run starting at byte `start`.
fn ident_run_end(text: &str, start: usize) -> usize {
    text[start..]
        .find(|c: char| !is_ident_char(c))
        .map_or(text.len(), |i| start + i)
}

/// Original name to alias, for ids and for classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierTable {
    ids: BTreeMap<String, String>,
    classes: BTreeMap<String, String>,
}

/// Result of a renaming pass.
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub document: String,
    pub ids_renamed: usize,
    pub classes_renamed: usize,
}

fn assign_aliases(names: BTreeSet<String>) -> BTreeMap<String, String> {
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| (name, alias(index)))
        .collect()
}

/// Rename ids and classes of a document.
pub fn rename_identifiers(doc: &str) -> RenameOutcome {
    let table = IdentifierTable::scan(doc);
    let document = if table.is_empty() {
        doc.to_string()
    } else {
        table.apply(doc)
    };

    RenameOutcome {
        document,
        ids_renamed: table.ids.len(),
        classes_renamed: table.classes.len(),
    }
}

impl IdentifierTable {
    /// Collect every id and class token and assign aliases in sorted order.
    pub fn scan(doc: &str) -> Self {
        let mut ids = BTreeSet::new();
        let mut classes = BTreeSet::new();

        for segment in segments(doc) {
            let Segment::StartTag(raw) = segment else {
                continue;
            };
            for attr in attributes(raw) {
                match attr.name {
                    "id" if !attr.value.is_empty() => {
                        ids.insert(attr.value.to_string());
                    }
                    "class" => {
                        for token in attr.value.split_whitespace() {
                            classes.insert(token.to_string());
                        }
                    }
                    _ => {}
                }
            }
        }

        Self {
            ids: assign_aliases(ids),
            classes: assign_aliases(classes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.classes.is_empty()
    }

    pub fn id_alias(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    pub fn class_alias(&self, name: &str) -> Option<&str> {
        self.classes.get(name).map(String::as_str)
    }

    /// Rewrite all reference contexts of `doc`.
    pub fn apply(&self, doc: &str) -> String {
        let mut out = String::with_capacity(doc.len());
        let mut in_style = false;

        for segment in segments(doc) {
            match segment {
                Segment::StartTag(raw) => {
                    if local_name(tag_name(raw)) == "style" && !is_self_closing(raw) {
                        in_style = true;
                    }
                    out.push_str(&rewrite_attributes(raw, |name, value| self.rewrite_attribute(name, value)));
                }
                Segment::EndTag(raw) => {
                    if local_name(tag_name(raw)) == "style" {
                        in_style = false;
                    }
                    out.push_str(raw);
                }
                Segment::Text(css) if in_style => out.push_str(&self.rewrite_stylesheet(css)),
                Segment::CData(raw) if in_style => {
                    let inner = &raw["<![CDATA[".len()..raw.len() - "]]>".len()];
                    out.push_str("<![CDATA[");
                    out.push_str(&self.rewrite_stylesheet(inner));
                    out.push_str("]]>");
                }
                other => out.push_str(other.raw()),
            }
        }

        out
    }

    fn rewrite_attribute(&self, name: &str, value: &str) -> Option<String> {
        let rewritten = match name {
            "id" => self.id_alias(value).map(str::to_string),
            "class" => Some(map_tokens(value, |token| self.class_alias(token))),
            "href" | "xlink:href" => value
                .strip_prefix('#')
                .and_then(|fragment| self.id_alias(fragment))
                .map(|alias| format!("#{}", alias)),
            "begin" | "end" => Some(self.rewrite_timing(value)),
            "aria-labelledby" | "aria-describedby" => Some(map_tokens(value, |token| self.id_alias(token))),
            _ => Some(self.rewrite_urls(value)),
        };
        rewritten.filter(|new_value| new_value != value)
    }

    /// `url(#X)` references anywhere in `text`.
    fn rewrite_urls(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find("url(") {
            let open = pos + "url(".len();
            out.push_str(&rest[..open]);
            rest = &rest[open..];

            let skipped = rest.len()
                - rest
                    .trim_start_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
                    .len();
            out.push_str(&rest[..skipped]);
            rest = &rest[skipped..];

            if let Some(fragment) = rest.strip_prefix('#') {
                let end = fragment
                    .find(|c: char| c == ')' || c == '"' || c == '\'' || c.is_whitespace())
                    .unwrap_or(fragment.len());
                let name = &fragment[..end];
                out.push('#');
                out.push_str(self.id_alias(name).unwrap_or(name));
                rest = &fragment[end..];
            }
        }

        out.push_str(rest);
        out
    }

    /// `begin`/`end` lists: `hero.end; 2s; other.begin+0.5s`.
    fn rewrite_timing(&self, value: &str) -> String {
        value
            .split(';')
            .map(|part| {
                let lead = part.len() - part.trim_start().len();
                match part[lead..].split_once('.') {
                    Some((target, event)) => match self.id_alias(target) {
                        Some(alias) => format!("{}{}.{}", &part[..lead], alias, event),
                        None => part.to_string(),
                    },
                    None => part.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Walk a stylesheet, rewriting selectors in rule preludes and `url(#X)`
    /// in declarations. Strings and comments are copied verbatim.
    fn rewrite_stylesheet(&self, css: &str) -> String {
        let mut out = String::with_capacity(css.len());
        let mut chunk_start = 0;
        let mut i = 0;

        while i < css.len() {
            let rest = &css[i..];
            let c = rest.chars().next().unwrap_or(' ');

            if rest.starts_with("/*") {
                i = rest[2..].find("*/").map_or(css.len(), |p| i + 2 + p + 2);
                continue;
            }
            if c == '"' || c == '\'' {
                i += quoted_len(rest, c);
                continue;
            }
            if matches!(c, '{' | '}' | ';') {
                let chunk = &css[chunk_start..i];
                if c == '{' && !chunk.trim_start().starts_with('@') {
                    out.push_str(&self.rewrite_selector(chunk));
                } else {
                    out.push_str(&self.rewrite_urls(chunk));
                }
                out.push(c);
                chunk_start = i + 1;
            }
            i += c.len_utf8();
        }

        out.push_str(&self.rewrite_urls(&css[chunk_start..]));
        out
    }

    /// `#X` and `.X` in a selector list; attribute selectors, strings and
    /// escaped names are left alone.
    fn rewrite_selector(&self, selector: &str) -> String {
        let mut out = String::with_capacity(selector.len());
        let mut i = 0;

        while i < selector.len() {
            let rest = &selector[i..];
            let c = rest.chars().next().unwrap_or(' ');

            let copy_len = match c {
                '"' | '\'' => quoted_len(rest, c),
                '[' => rest.find(']').map_or(rest.len(), |p| p + 1),
                '\\' => 1 + rest[1..].chars().next().map_or(0, char::len_utf8),
                '#' | '.' => {
                    let end = ident_run_end(selector, i + 1);
                    let name = &selector[i + 1..end];
                    let escaped = selector[end..].starts_with('\\');
                    let alias = if c == '#' { self.id_alias(name) } else { self.class_alias(name) };
                    match alias {
                        Some(alias) if !escaped && is_css_identifier(name) => {
                            out.push(c);
                            out.push_str(alias);
                            i = end;
                            continue;
                        }
                        _ => end - i,
                    }
                }
                _ => c.len_utf8(),
            };

            out.push_str(&rest[..copy_len]);
            i += copy_len;
        }

        out
    }
}

/// Length of the quoted string at the start of `rest`, quotes included.
fn quoted_len(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + 1;
        }
    }
    rest.len()
}

/// Map whitespace-separated tokens, keeping the separators as they are.
fn map_tokens<'m, F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'m str>,
{
    let mut out = String::with_capacity(value.len());
    let mut token_start: Option<usize> = None;

    for (i, c) in value.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = token_start.take() {
                let token = &value[start..i];
                out.push_str(lookup(token).unwrap_or(token));
            }
            out.push(c);
        } else if token_start.is_none() {
            token_start = Some(i);
        }
    }
    if let Some(start) = token_start {
        let token = &value[start..];
        out.push_str(lookup(token).unwrap_or(token));
    }

    out
}
