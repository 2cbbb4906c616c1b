//! Structural edits through the container capability: ownership transfer,
//! sibling ordering, and failure modes that leave the tree untouched.

use markdown_arbor::{
    Block, Container, Document, Inline, Item, List, ListKind, Paragraph, ParseOptions,
    RenderFormat, RenderOptions, Text, TypedNode,
};
use pretty_assertions::assert_eq;

fn paragraph(text: &str) -> Block {
    Block::Paragraph(Paragraph::with_text(text))
}

/// The first text run of each top-level paragraph, in document order.
fn paragraph_texts(doc: &Document) -> Vec<String> {
    doc.children()
        .map(|block| match block {
            Block::Paragraph(p) => match p.children().next() {
                Some(Inline::Text(t)) => t.literal(),
                other => panic!("expected a text run, got {other:?}"),
            },
            other => panic!("expected a paragraph, got {other:?}"),
        })
        .collect()
}

#[test]
fn linking_transfers_ownership_to_the_tree() {
    let doc = Document::new();
    let child = paragraph("content");
    assert!(child.as_node().is_owned());

    assert!(doc.append(&child));
    assert!(!child.as_node().is_owned());

    let parent = child.as_node().parent();
    assert_eq!(parent.as_ref(), Some(doc.as_node()));
}

#[test]
fn removing_returns_ownership_to_the_wrapper() {
    let doc = Document::new();
    let child = paragraph("movable");
    assert!(doc.append(&child));
    assert!(!child.as_node().is_owned());

    assert!(doc.remove(&child));
    assert!(child.as_node().is_owned());
    assert_eq!(doc.children().count(), 0);

    // The detached node is fully reusable.
    let other = Document::new();
    assert!(other.append(&child));
    assert_eq!(other.children().count(), 1);
}

#[test]
fn remove_refuses_children_of_other_containers() {
    let doc = Document::new();
    let other = Document::new();
    let child = paragraph("belongs to doc");
    assert!(doc.append(&child));

    assert!(!other.remove(&child));
    assert!(!child.as_node().is_owned());
    assert_eq!(doc.children().count(), 1);
}

#[test]
fn remove_refuses_detached_nodes() {
    let doc = Document::new();
    let stray = paragraph("never linked");

    assert!(!doc.remove(&stray));
    assert!(stray.as_node().is_owned());
}

#[test]
fn append_refuses_an_already_linked_child() {
    let doc = Document::new();
    let other = Document::new();
    let child = paragraph("one home only");
    assert!(doc.append(&child));

    assert!(!other.append(&child));
    assert_eq!(doc.children().count(), 1);
    assert_eq!(other.children().count(), 0);
}

#[test]
fn insertion_preserves_sibling_order() {
    let doc = Document::new();
    let a = paragraph("a");
    let b = paragraph("b");
    let c = paragraph("c");
    assert!(doc.append(&a));
    assert!(doc.append(&b));
    assert!(doc.append(&c));

    let d = paragraph("d");
    assert!(doc.insert_after(&d, &b));
    assert_eq!(paragraph_texts(&doc), ["a", "b", "d", "c"]);

    let e = paragraph("e");
    assert!(doc.insert_before(&e, &a));
    assert_eq!(paragraph_texts(&doc), ["e", "a", "b", "d", "c"]);
}

#[test]
fn prepend_links_as_first_child() {
    let doc = Document::new();
    assert!(doc.append(&paragraph("second")));
    assert!(doc.prepend(&paragraph("first")));

    assert_eq!(paragraph_texts(&doc), ["first", "second"]);
}

#[test]
fn insert_relative_to_a_detached_sibling_fails() {
    let doc = Document::new();
    let anchor = paragraph("never linked");
    let child = paragraph("homeless");

    assert!(!doc.insert_before(&child, &anchor));
    assert!(child.as_node().is_owned());
    assert_eq!(doc.children().count(), 0);
}

#[test]
fn set_children_hands_back_the_old_children_detached() {
    let doc = Document::new();
    assert!(doc.append(&paragraph("old one")));
    assert!(doc.append(&paragraph("old two")));

    let removed = doc.set_children(vec![paragraph("new one")]);

    assert_eq!(removed.len(), 2);
    for old in &removed {
        assert!(old.as_node().is_owned());
        assert!(old.as_node().parent().is_none());
    }
    assert_eq!(paragraph_texts(&doc), ["new one"]);
}

#[test]
fn inline_children_keep_append_order_and_detach_on_remove() {
    let paragraph = Paragraph::new();
    let hello = Inline::Text(Text::new("Hello"));
    let world = Inline::Text(Text::new(" world"));
    assert!(paragraph.append(&hello));
    assert!(paragraph.append(&world));

    let literals = |p: &Paragraph| -> Vec<String> {
        p.children()
            .map(|inline| match inline {
                Inline::Text(t) => t.literal(),
                other => panic!("expected a text run, got {other:?}"),
            })
            .collect()
    };
    assert_eq!(literals(&paragraph), ["Hello", " world"]);

    assert!(paragraph.remove(&hello));
    assert!(hello.as_node().is_owned());
    assert!(hello.as_node().parent().is_none());
    assert_eq!(literals(&paragraph), [" world"]);
}

#[test]
fn appending_to_a_parsed_tree_shows_up_in_output() {
    let doc = Document::parse("Hello\n", ParseOptions::default()).unwrap();

    let first = doc.children().next().unwrap();
    if let Block::Paragraph(p) = &first {
        assert!(p.append(&Inline::Text(Text::new(", world!"))));
    } else {
        panic!("expected a paragraph");
    }

    let html = doc.render(RenderFormat::Html, RenderOptions::default());
    assert_eq!(html, "<p>Hello, world!</p>\n");
}

#[test]
fn items_hold_mixed_content() {
    let list = List::new(ListKind::Bullet);
    let item = Item::new();
    assert!(list.append(&item));

    let inner = List::new(ListKind::Ordered);
    assert!(item.append(&Block::Paragraph(Paragraph::with_text("lead")).into_node()));
    assert!(item.append(&Block::List(inner).into_node()));

    assert_eq!(item.children().count(), 2);
}

#[test]
fn views_go_inert_when_the_document_drops() {
    let doc = Document::parse("a paragraph\n", ParseOptions::default()).unwrap();
    let child = doc.children().next().unwrap();
    drop(doc);

    assert_eq!(child.as_node().kind(), None);
    if let Block::Paragraph(p) = &child {
        // Edits through a dead view are refused, not undefined.
        assert!(!p.append(&Inline::Text(Text::new("too late"))));
    }
}
