//! Markup serializer

use super::parse::VOID_TAGS;
use super::{Document, NodeId, NodeKind};

/// Serialize the whole document.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    write_subtree(doc, doc.root(), &mut out);
    out
}

/// Serialize a single node and its subtree.
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_subtree(doc, id, &mut out);
    out
}

enum Frame {
    Open(NodeId),
    Close(NodeId),
}

/// Pre-order walk with an explicit stack, so nesting depth is bounded by
/// the heap rather than the call stack.
fn write_subtree(doc: &Document, id: NodeId, out: &mut String) {
    let mut stack = vec![Frame::Open(id)];

    while let Some(frame) = stack.pop() {
        let id = match frame {
            Frame::Open(id) => id,
            Frame::Close(id) => {
                if let Some(tag) = doc.tag_name(id) {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                continue;
            }
        };
        let Some(node) = doc.node(id) else {
            continue;
        };

        match &node.kind {
            NodeKind::Document => {
                stack.extend(node.children.iter().rev().map(|c| Frame::Open(*c)));
            }
            NodeKind::Doctype(body) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(body);
                out.push('>');
            }
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeKind::Text(text) => {
                let raw = node
                    .parent
                    .and_then(|p| doc.tag_name(p))
                    .is_some_and(|tag| tag == "script" || tag == "style");
                if raw {
                    out.push_str(text);
                } else {
                    escape_text(text, out);
                }
            }
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag_name.as_str()) {
                    continue;
                }
                stack.push(Frame::Close(id));
                stack.extend(node.children.iter().rev().map(|c| Frame::Open(*c)));
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Concatenated text of a subtree.
pub fn text_content(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for node in std::iter::once(id).chain(doc.descendants(id)) {
        if let Some(NodeKind::Text(text)) = doc.node(node).map(|n| &n.kind) {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Attributes;

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut doc = Document::new();
        let mut attrs = Attributes::new();
        attrs.insert("title".into(), "a \"b\" & c".into());
        let root = doc.root();
        let p = doc.create_element(root, "p", attrs);
        doc.create_text(p, "1 < 2 & 3");
        assert_eq!(
            to_html(&doc),
            r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3</p>"#
        );
    }

    #[test]
    fn test_void_element_has_no_end_tag() {
        let mut doc = Document::new();
        let root = doc.root();
        let br = doc.create_element(root, "br", Attributes::new());
        assert_eq!(outer_html(&doc, br), "<br>");
    }

    #[test]
    fn test_text_content_concatenates() {
        let doc = Document::parse("<div>a<b>b</b>c</div>").unwrap();
        let div = doc.elements().next().unwrap();
        assert_eq!(text_content(&doc, div), "abc");
    }
}
