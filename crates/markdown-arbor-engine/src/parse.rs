//! Text-to-tree conversion.
//!
//! The CommonMark grammar itself is `pulldown-cmark`'s job; this module
//! replays its event stream into the arena, producing the linked node tree
//! the rest of the engine operates on. Source extents are recovered from the
//! byte ranges of the offset iterator.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::flags;
use crate::store::{self, Extent, ListKind, NodeHandle, NodeType};

/// Parse CommonMark text into a new tree, returning its root.
///
/// Returns `None` when the source cannot be represented as a tree at all;
/// the empty string is representable and parses to an empty document.
pub fn parse_document(source: &str, option_flags: u32) -> Option<NodeHandle> {
    // U+0000 cannot be stored as node content.
    if source.contains('\0') {
        return None;
    }

    let mut options = Options::empty();
    if option_flags & flags::SMART != 0 {
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }

    let lines = LineIndex::new(source);
    let root = store::create(NodeType::Document);
    store::set_extent(root, lines.extent(0..source.len()));

    let mut builder = TreeBuilder {
        root,
        stack: vec![],
        lines,
    };
    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        builder.visit(event, range);
    }
    Some(root)
}

struct TreeBuilder<'a> {
    root: NodeHandle,
    /// One entry per open tag. `None` marks tags with no node of their own;
    /// their content attaches to the nearest enclosing node.
    stack: Vec<Option<NodeHandle>>,
    lines: LineIndex<'a>,
}

impl TreeBuilder<'_> {
    fn visit(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let node = self.open(tag, range);
                self.stack.push(node);
            }
            Event::End(_) => {
                if let Some(Some(closed)) = self.stack.pop()
                    && store::node_type(closed) == Some(NodeType::List)
                {
                    self.finish_list(closed);
                }
            }
            Event::Text(text) => {
                let parent = self.attach_point();
                if store::node_type(parent) == Some(NodeType::CodeBlock) {
                    store::push_literal(parent, &text);
                } else {
                    let node = self.node(NodeType::Text, range);
                    store::set_literal(node, &text);
                }
            }
            Event::Code(text) => {
                let node = self.node(NodeType::Code, range);
                store::set_literal(node, &text);
            }
            Event::Html(text) | Event::InlineHtml(text) => {
                let parent = self.attach_point();
                if store::node_type(parent) == Some(NodeType::HtmlBlock) {
                    store::push_literal(parent, &text);
                } else {
                    let node = self.node(NodeType::HtmlInline, range);
                    store::set_literal(node, &text);
                }
            }
            Event::SoftBreak => {
                self.node(NodeType::SoftBreak, range);
            }
            Event::HardBreak => {
                self.node(NodeType::LineBreak, range);
            }
            Event::Rule => {
                self.node(NodeType::ThematicBreak, range);
            }
            // Extensions are disabled, so task markers, footnotes, tables
            // and math never reach here.
            _ => {}
        }
    }

    /// Open a container/leaf node for a start tag. Tags outside the core
    /// CommonMark set get no node; their children fall through to the
    /// enclosing one.
    fn open(&mut self, tag: Tag<'_>, range: Range<usize>) -> Option<NodeHandle> {
        match tag {
            Tag::Paragraph => Some(self.node(NodeType::Paragraph, range)),
            Tag::Heading { level, .. } => {
                let node = self.node(NodeType::Heading, range);
                store::set_heading_level(node, level as u32);
                Some(node)
            }
            Tag::BlockQuote(_) => Some(self.node(NodeType::BlockQuote, range)),
            Tag::CodeBlock(kind) => {
                let node = self.node(NodeType::CodeBlock, range);
                if let CodeBlockKind::Fenced(info) = kind {
                    store::set_fence_info(node, &info);
                }
                Some(node)
            }
            Tag::HtmlBlock => Some(self.node(NodeType::HtmlBlock, range)),
            Tag::List(start) => {
                let node = self.node(NodeType::List, range);
                if let Some(start) = start {
                    store::set_list_kind(node, ListKind::Ordered);
                    store::set_list_start(node, start);
                }
                Some(node)
            }
            Tag::Item => Some(self.node(NodeType::Item, range)),
            Tag::Emphasis => Some(self.node(NodeType::Emphasis, range)),
            Tag::Strong => Some(self.node(NodeType::Strong, range)),
            Tag::Link {
                dest_url, title, ..
            } => {
                let node = self.node(NodeType::Link, range);
                store::set_url(node, &dest_url);
                store::set_title(node, &title);
                Some(node)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let node = self.node(NodeType::Image, range);
                store::set_url(node, &dest_url);
                store::set_title(node, &title);
                Some(node)
            }
            _ => None,
        }
    }

    fn node(&mut self, node_type: NodeType, range: Range<usize>) -> NodeHandle {
        let node = store::create(node_type);
        store::set_extent(node, self.lines.extent(range));
        let status = store::append_child(self.attach_point(), node);
        debug_assert!(status.succeeded());
        node
    }

    fn attach_point(&self) -> NodeHandle {
        self.stack
            .iter()
            .rev()
            .flatten()
            .copied()
            .next()
            .unwrap_or(self.root)
    }

    /// A list is tight unless any of its items wraps content in paragraphs;
    /// the event stream only produces paragraphs inside items of loose lists.
    fn finish_list(&self, list: NodeHandle) {
        let mut tight = true;
        let mut item = store::first_child(list);
        while let Some(i) = item {
            let mut child = store::first_child(i);
            while let Some(c) = child {
                if store::node_type(c) == Some(NodeType::Paragraph) {
                    tight = false;
                }
                child = store::next_sibling(c);
            }
            item = store::next_sibling(i);
        }
        store::set_list_tight(list, tight);
    }
}

/// Byte-offset to (line, column) conversion, both one-based.
struct LineIndex<'a> {
    text: &'a [u8],
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineIndex {
            text: text.as_bytes(),
            line_starts,
        }
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.line_starts[line] + 1;
        (line as u32 + 1, column as u32)
    }

    fn extent(&self, range: Range<usize>) -> Extent {
        let (start_line, start_column) = self.position(range.start);
        // Event ranges run through the trailing newline; the extent ends at
        // the last content byte.
        let mut end = range.end;
        while end > range.start && matches!(self.text.get(end - 1), Some(b'\n' | b'\r')) {
            end -= 1;
        }
        let last = end.saturating_sub(1).max(range.start);
        let (end_line, end_column) = self.position(last);
        Extent {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn child_types(node: NodeHandle) -> Vec<NodeType> {
        let mut out = vec![];
        let mut cursor = store::first_child(node);
        while let Some(h) = cursor {
            out.push(store::node_type(h).expect("live child"));
            cursor = store::next_sibling(h);
        }
        out
    }

    #[test]
    fn empty_source_parses_to_empty_document() {
        let root = parse_document("", flags::DEFAULT).expect("parse");
        assert_eq!(store::node_type(root), Some(NodeType::Document));
        assert_eq!(store::first_child(root), None);
        store::free(root);
    }

    #[test]
    fn nul_bytes_are_unrepresentable() {
        assert!(parse_document("hello\0world", flags::DEFAULT).is_none());
    }

    #[test]
    fn heading_and_paragraph_shape() {
        let root = parse_document("# Hello\n\nSome *emphatic* text.\n", flags::DEFAULT)
            .expect("parse");
        assert_eq!(
            child_types(root),
            vec![NodeType::Heading, NodeType::Paragraph]
        );

        let heading = store::first_child(root).expect("heading");
        assert_eq!(store::heading_level(heading), Some(1));
        let text = store::first_child(heading).expect("heading text");
        assert_eq!(store::literal(text), Some("Hello".to_owned()));

        let paragraph = store::next_sibling(heading).expect("paragraph");
        assert_eq!(
            child_types(paragraph),
            vec![NodeType::Text, NodeType::Emphasis, NodeType::Text]
        );
        store::free(root);
    }

    #[test]
    fn fenced_code_keeps_info_and_literal() {
        let root = parse_document("```rust\nfn main() {}\n```\n", flags::DEFAULT)
            .expect("parse");
        let code = store::first_child(root).expect("code block");
        assert_eq!(store::node_type(code), Some(NodeType::CodeBlock));
        assert_eq!(store::fence_info(code), Some("rust".to_owned()));
        assert_eq!(store::literal(code), Some("fn main() {}\n".to_owned()));
        store::free(root);
    }

    #[test]
    fn ordered_list_start_and_tightness() {
        let root = parse_document("3. three\n4. four\n", flags::DEFAULT).expect("parse");
        let list = store::first_child(root).expect("list");
        assert_eq!(store::list_kind(list), Some(ListKind::Ordered));
        assert_eq!(store::list_start(list), Some(3));
        assert_eq!(store::list_tight(list), Some(true));
        store::free(root);
    }

    #[test]
    fn blank_separated_list_is_loose() {
        let root = parse_document("- one\n\n- two\n", flags::DEFAULT).expect("parse");
        let list = store::first_child(root).expect("list");
        assert_eq!(store::list_tight(list), Some(false));
        store::free(root);
    }

    #[rstest]
    #[case::smart(flags::SMART, "\u{201c}quoted\u{201d}")]
    #[case::plain(flags::DEFAULT, "\"quoted\"")]
    fn smart_punctuation_is_opt_in(#[case] option_flags: u32, #[case] expected: &str) {
        let root = parse_document("\"quoted\"", option_flags).expect("parse");
        let paragraph = store::first_child(root).expect("paragraph");
        let text = store::first_child(paragraph).expect("text");
        assert_eq!(store::literal(text), Some(expected.to_owned()));
        store::free(root);
    }

    #[test]
    fn extents_are_one_based_lines_and_columns() {
        let root = parse_document("# Title\n\nbody text\n", flags::DEFAULT).expect("parse");
        let heading = store::first_child(root).expect("heading");
        let heading_extent = store::extent(heading).expect("extent");
        assert_eq!(heading_extent.start_line, 1);
        assert_eq!(heading_extent.start_column, 1);

        let paragraph = store::next_sibling(heading).expect("paragraph");
        let paragraph_extent = store::extent(paragraph).expect("extent");
        assert_eq!(paragraph_extent.start_line, 3);
        assert_eq!(paragraph_extent.start_column, 1);
        store::free(root);
    }

    #[test]
    fn html_block_collects_raw_lines() {
        let root = parse_document("<div>\n<p>hi</p>\n</div>\n", flags::DEFAULT).expect("parse");
        let html = store::first_child(root).expect("html block");
        assert_eq!(store::node_type(html), Some(NodeType::HtmlBlock));
        assert_eq!(
            store::literal(html),
            Some("<div>\n<p>hi</p>\n</div>\n".to_owned())
        );
        store::free(root);
    }
}
