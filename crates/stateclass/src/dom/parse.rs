//! Forgiving tag-stack HTML parser
//!
//! This is not the HTML5 tree-construction algorithm. It keeps a stack of
//! open elements, closes up to the matching element on an end tag, and
//! ignores end tags that match nothing open. Unclosed comments, tags and
//! quoted attribute values are errors.

use super::{Attributes, Document, NodeId};
use crate::error::{Result, StateclassError};

pub(crate) const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Parse markup into a new [`Document`].
pub fn parse_html(html: &str) -> Result<Document> {
    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = vec![doc.root()];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let parent = current(&stack)?;

        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| parse_error("unclosed HTML comment"))?;
            doc.create_comment(parent, &html[i + 4..end]);
            i = end + 3;
            continue;
        }

        if starts_with_ignore_case(bytes, i, b"<!doctype") {
            let end = find_byte(bytes, i, b'>').ok_or_else(|| parse_error("unclosed doctype"))?;
            doc.create_doctype(parent, html[i + 9..end].trim());
            i = end + 1;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1) == Some(&b'/') {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            close_element(&doc, &mut stack, &tag);
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            let (tag, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;
            let node = doc.create_element(parent, tag.as_str(), attrs);

            if RAW_TEXT_TAGS.contains(&tag.as_str()) {
                let close = find_end_tag(bytes, i, tag.as_bytes())
                    .ok_or_else(|| parse_error(format!("unclosed <{}>", tag)))?;
                if close > i {
                    doc.create_text(node, &html[i..close]);
                }
                let (_, after) = parse_end_tag(html, close)?;
                i = after;
                continue;
            }

            if !self_closing && !VOID_TAGS.contains(&tag.as_str()) {
                stack.push(node);
            }
            continue;
        }

        // Text runs to the next '<' that could open markup; a lone '<' is text.
        let start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        doc.create_text(parent, decode_character_references(&html[start..i]));
    }

    Ok(doc)
}

fn current(stack: &[NodeId]) -> Result<NodeId> {
    stack
        .last()
        .copied()
        .ok_or_else(|| parse_error("open element stack is empty"))
}

fn close_element(doc: &Document, stack: &mut Vec<NodeId>, tag: &str) {
    let Some(pos) = stack
        .iter()
        .rposition(|id| doc.tag_name(*id) == Some(tag))
    else {
        return;
    };
    // Position 0 is the document root and never matches a tag.
    stack.truncate(pos.max(1));
}

fn parse_start_tag(html: &str, at: usize) -> Result<(String, Attributes, bool, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();

    let mut attrs = Attributes::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(parse_error(format!("unclosed start tag <{}>", tag)));
        }

        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        if bytes[i] == b'/' {
            i += 1;
            if bytes.get(i) == Some(&b'>') {
                self_closing = true;
                i += 1;
                break;
            }
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        if i == name_start {
            return Err(parse_error(format!(
                "invalid attribute name in <{}> at byte {}",
                tag, i
            )));
        }
        let name = html[name_start..i].to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, &mut i)?
        } else {
            String::new()
        };

        // First occurrence wins, as in browsers.
        attrs.entry(name).or_insert(value);
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();

    let end = find_byte(bytes, i, b'>').ok_or_else(|| parse_error("unclosed end tag"))?;
    Ok((tag, end + 1))
}

fn parse_attr_value(html: &str, i: &mut usize) -> Result<String> {
    let bytes = html.as_bytes();
    match bytes.get(*i) {
        None => Err(parse_error("missing attribute value")),
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            let start = *i + 1;
            let end = find_byte(bytes, start, quote)
                .ok_or_else(|| parse_error("unclosed quoted attribute value"))?;
            *i = end + 1;
            Ok(decode_character_references(&html[start..end]))
        }
        Some(_) => {
            let start = *i;
            while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
                *i += 1;
            }
            Ok(decode_character_references(&html[start..*i]))
        }
    }
}

/// Decode the common named references and numeric references.
///
/// Unknown or malformed references are kept verbatim.
pub fn decode_character_references(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|ch| (ch, semi + 1))
        });

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Byte Helpers
// ═══════════════════════════════════════════════════════════════════════

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.get(at..at + needle.len()) == Some(needle)
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(needle))
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| from + pos)
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|pos| from + pos)
}

/// Find `</tag` (case-insensitive) at or after `from`.
fn find_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while let Some(pos) = find_subslice(bytes, i, b"</") {
        if starts_with_ignore_case(bytes, pos + 2, tag) {
            return Some(pos);
        }
        i = pos + 2;
    }
    None
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

fn is_attr_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
}

fn parse_error(message: impl Into<String>) -> StateclassError {
    StateclassError::HtmlParse(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode_character_references("a &amp; b"), "a & b");
        assert_eq!(decode_character_references("&lt;p&gt;"), "<p>");
        assert_eq!(decode_character_references("&#65;&#x42;"), "AB");
    }

    #[test]
    fn test_decode_keeps_unknown() {
        assert_eq!(decode_character_references("&bogus; & x"), "&bogus; & x");
        assert_eq!(decode_character_references("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_close_element_ignores_unmatched() {
        let doc = parse_html("<div><span>a</p>b</span></div>").unwrap();
        let span = doc.elements().nth(1).unwrap();
        assert_eq!(doc.tag_name(span), Some("span"));
        // "b" still lands inside the span
        assert_eq!(doc.children(span).len(), 2);
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let doc = parse_html("<p>1 < 2</p>").unwrap();
        let p = doc.elements().next().unwrap();
        assert_eq!(doc.children(p).len(), 2);
    }
}
