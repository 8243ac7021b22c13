//! Document parsing and serialization tests

use pretty_assertions::assert_eq;
use stateclass::*;

fn parse(html: &str) -> Document {
    Document::parse(html).expect("parse failed")
}

// ═══════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_nested_elements() {
    let doc = parse(r#"<div id="a"><p id="b"><span id="c">x</span></p></div>"#);
    let a = doc.element_by_id("a").unwrap();
    let b = doc.element_by_id("b").unwrap();
    let c = doc.element_by_id("c").unwrap();

    assert_eq!(doc.parent(a), Some(doc.root()));
    assert_eq!(doc.parent(b), Some(a));
    assert_eq!(doc.parent(c), Some(b));
}

#[test]
fn test_parse_attribute_forms() {
    let doc = parse(r#"<input id=i type='text' disabled data-x="a &amp; b">"#);
    let i = doc.element_by_id("i").unwrap();

    assert_eq!(doc.get_attribute(i, "type"), Some("text"));
    assert_eq!(doc.get_attribute(i, "disabled"), Some(""));
    assert_eq!(doc.get_attribute(i, "data-x"), Some("a & b"));
}

#[test]
fn test_parse_attribute_names_lowercased() {
    let doc = parse(r#"<DIV ID="x" Data-Class="open"></DIV>"#);
    let x = doc.element_by_id("x").unwrap();
    assert_eq!(doc.tag_name(x), Some("div"));
    assert_eq!(doc.get_attribute(x, "data-class"), Some("open"));
}

#[test]
fn test_parse_duplicate_attribute_first_wins() {
    let doc = parse(r#"<p id="x" class="a" class="b"></p>"#);
    let x = doc.element_by_id("x").unwrap();
    assert_eq!(doc.get_attribute(x, "class"), Some("a"));
}

#[test]
fn test_parse_void_elements_do_not_nest() {
    let doc = parse(r#"<div id="d"><br><img src="x.png"><span id="s"></span></div>"#);
    let d = doc.element_by_id("d").unwrap();
    let s = doc.element_by_id("s").unwrap();
    assert_eq!(doc.parent(s), Some(d));
    assert_eq!(doc.children(d).len(), 3);
}

#[test]
fn test_parse_self_closing() {
    let doc = parse(r#"<div id="d"><widget id="w"/><span id="s"></span></div>"#);
    let d = doc.element_by_id("d").unwrap();
    assert_eq!(doc.parent(doc.element_by_id("s").unwrap()), Some(d));
}

#[test]
fn test_parse_script_is_raw_text() {
    let doc = parse(r#"<script id="s">if (a < b && c) { x("</div>") }</script><p id="p"></p>"#);
    let s = doc.element_by_id("s").unwrap();
    // raw text stops at the first end tag for the element, not for other tags
    assert_eq!(doc.children(s).len(), 1);
    assert_eq!(doc.parent(doc.element_by_id("p").unwrap()), Some(doc.root()));
}

#[test]
fn test_parse_comment_and_doctype() {
    let doc = parse("<!DOCTYPE html><!-- note --><p></p>");
    let kinds: Vec<_> = doc
        .children(doc.root())
        .iter()
        .map(|id| doc.node(*id).unwrap().kind.clone())
        .collect();

    assert_eq!(kinds[0], NodeKind::Doctype("html".into()));
    assert_eq!(kinds[1], NodeKind::Comment(" note ".into()));
    assert!(matches!(kinds[2], NodeKind::Element(_)));
}

#[test]
fn test_parse_stray_end_tag_ignored() {
    let doc = parse(r#"</section><div id="d">x</div>"#);
    assert!(doc.element_by_id("d").is_some());
}

#[test]
fn test_parse_unclosed_element_implicitly_closed() {
    let doc = parse(r#"<div id="d"><p id="p">text"#);
    let d = doc.element_by_id("d").unwrap();
    assert_eq!(doc.parent(doc.element_by_id("p").unwrap()), Some(d));
}

#[test]
fn test_parse_errors() {
    for bad in [
        "<!-- never closed",
        r#"<div class="open"#,
        "<div",
        "<script>var x;",
        "<p></p",
    ] {
        assert!(
            matches!(Document::parse(bad), Err(StateclassError::HtmlParse(_))),
            "expected parse error for {:?}",
            bad
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Serialization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_serialize_round_trip_canonical_markup() {
    let html = concat!(
        "<!DOCTYPE html>",
        r#"<ul class="menu" data-class="open"><li>a &amp; b</li><li><br></li></ul>"#,
        "<!-- end -->",
        "<script>if (a < b) {}</script>",
    );
    assert_eq!(parse(html).to_html(), html);
}

#[test]
fn test_serialize_normalizes_attribute_quoting() {
    let doc = parse(r#"<input type=checkbox checked>"#);
    assert_eq!(doc.to_html(), r#"<input type="checkbox" checked="">"#);
}

#[test]
fn test_serialize_reflects_class_mutation() {
    let mut doc = parse(r#"<div id="d" class="a">x</div>"#);
    let d = doc.element_by_id("d").unwrap();
    doc.add_class(d, "b").unwrap();
    doc.remove_class(d, "a").unwrap();
    assert_eq!(doc.to_html(), r#"<div id="d" class="b">x</div>"#);
}

#[test]
fn test_serialize_new_class_attribute_appended_last() {
    let mut doc = parse(r#"<div id="d" title="t"></div>"#);
    let d = doc.element_by_id("d").unwrap();
    doc.toggle_class(d, "on").unwrap();
    assert_eq!(doc.to_html(), r#"<div id="d" title="t" class="on"></div>"#);
}

#[test]
fn test_serialize_deeply_nested_document() {
    const DEPTH: usize = 200_000;
    let html = format!("{}x{}", "<div>".repeat(DEPTH), "</div>".repeat(DEPTH));
    let doc = parse(&html);
    assert_eq!(doc.len(), DEPTH + 2);

    let out = doc.to_html();
    assert_eq!(out.len(), html.len());
    assert!(out == html, "deep document did not round-trip");

    let innermost = doc.elements().last().unwrap();
    assert_eq!(dom::serialize::outer_html(&doc, innermost), "<div>x</div>");
}
