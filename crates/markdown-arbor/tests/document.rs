//! Parsing and rendering through the document root.

use markdown_arbor::{
    Block, Container, Document, DocumentError, ParseOptions, Position, RenderFormat,
    RenderOptions, TypedNode,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn empty_source_parses_to_an_empty_document() {
    let doc = Document::parse("", ParseOptions::default()).unwrap();
    assert_eq!(doc.children().count(), 0);
}

#[test]
fn parsing_builds_typed_blocks() {
    let doc = Document::parse("# Title\n\nBody text.\n", ParseOptions::default()).unwrap();
    let children: Vec<Block> = doc.children().collect();
    assert_eq!(children.len(), 2);

    match &children[0] {
        Block::Heading(h) => {
            assert_eq!(h.level(), 1);
            assert_eq!(h.as_node().start(), Some(Position::new(1, 1)));
        }
        other => panic!("expected a heading, got {other:?}"),
    }
    assert!(matches!(children[1], Block::Paragraph(_)));
}

#[test]
fn nul_bytes_are_invalid_input() {
    let result = Document::parse("before\0after", ParseOptions::default());
    assert_eq!(result.unwrap_err(), DocumentError::Invalid);
}

#[test]
fn smart_punctuation_is_opt_in() {
    let source = "\"quoted\" -- dashed...\n";
    let plain = Document::parse(source, ParseOptions::default()).unwrap();
    let smart = Document::parse(source, ParseOptions { smart: true }).unwrap();

    let plain_html = plain.render(RenderFormat::Html, RenderOptions::default());
    let smart_html = smart.render(RenderFormat::Html, RenderOptions::default());
    assert!(plain_html.contains("\"quoted\""));
    assert!(smart_html.contains("\u{201c}quoted\u{201d}"));
    assert!(smart_html.contains("\u{2013}"));
    assert!(smart_html.contains("\u{2026}"));
}

#[rstest]
#[case::commonmark(RenderFormat::CommonMark, "# Hello\n")]
#[case::html(RenderFormat::Html, "<h1>Hello</h1>\n")]
#[case::xml(RenderFormat::Xml, "<heading level=\"1\">")]
#[case::latex(RenderFormat::Latex, "\\section{Hello}")]
#[case::man(RenderFormat::Man, ".SH Hello\n")]
fn every_format_renders_a_heading(#[case] format: RenderFormat, #[case] expected: &str) {
    let doc = Document::parse("# Hello\n", ParseOptions::default()).unwrap();
    let output = doc.render(format, RenderOptions::default());
    assert!(
        output.contains(expected),
        "{format:?} output {output:?} missing {expected:?}"
    );
}

#[test]
fn unsafe_links_are_stripped_unless_allowed() {
    let doc = Document::parse("[x](javascript:alert(1))\n", ParseOptions::default()).unwrap();

    let safe = doc.render(RenderFormat::Html, RenderOptions::default());
    assert_eq!(safe, "<p><a href=\"\">x</a></p>\n");

    let unsafe_html = doc.render(
        RenderFormat::Html,
        RenderOptions {
            allow_unsafe: true,
            ..RenderOptions::default()
        },
    );
    assert!(unsafe_html.contains("javascript:alert(1)"));
}

#[test]
fn source_positions_annotate_html_blocks() {
    let doc = Document::parse("first\n\nsecond\n", ParseOptions::default()).unwrap();
    let html = doc.render(
        RenderFormat::Html,
        RenderOptions {
            source_positions: true,
            ..RenderOptions::default()
        },
    );
    assert!(html.contains("data-sourcepos=\"1:1-1:5\""));
    assert!(html.contains("data-sourcepos=\"3:1-3:6\""));
}

#[test]
fn commonmark_output_reparses_to_the_same_output() {
    let source = "# Title\n\nSome *emphasis* and a [link](https://example.com).\n\n- one\n- two\n";
    let doc = Document::parse(source, ParseOptions::default()).unwrap();
    let first = doc.render(RenderFormat::CommonMark, RenderOptions::default());

    let again = Document::parse(&first, ParseOptions::default()).unwrap();
    let second = again.render(RenderFormat::CommonMark, RenderOptions::default());
    assert_eq!(first, second);
}

#[test]
fn a_new_document_renders_to_nothing() {
    let doc = Document::new();
    assert_eq!(
        doc.render(RenderFormat::Html, RenderOptions::default()),
        ""
    );
}
