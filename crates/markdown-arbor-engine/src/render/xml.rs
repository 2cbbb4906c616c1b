//! XML target: one element per node, in the style of the reference
//! CommonMark DTD. Break-rendering flags do not apply here; soft and hard
//! breaks always appear as their own elements.

use crate::flags;
use crate::render::children;
use crate::store::{self, ListKind, NodeHandle, NodeType};

pub(crate) fn render(root: NodeHandle, option_flags: u32) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<!DOCTYPE document SYSTEM \"CommonMark.dtd\">\n");
    walk(root, option_flags, 0, &mut out);
    out
}

fn walk(node: NodeHandle, option_flags: u32, depth: usize, out: &mut String) {
    let Some(node_type) = store::node_type(node) else {
        return;
    };
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(element_name(node_type));
    if node_type == NodeType::Document {
        out.push_str(" xmlns=\"http://commonmark.org/xml/1.0\"");
    }
    out.push_str(&attributes(node, node_type, option_flags));

    let literal = if node_type.has_literal() {
        store::literal(node).unwrap_or_default()
    } else {
        String::new()
    };
    let has_children = store::first_child(node).is_some();

    if node_type.has_literal() {
        out.push_str(" xml:space=\"preserve\">");
        out.push_str(&html_escape::encode_text(&literal));
        out.push_str(&format!("</{}>\n", element_name(node_type)));
    } else if has_children {
        out.push_str(">\n");
        for child in children(node) {
            walk(child, option_flags, depth + 1, out);
        }
        out.push_str(&indent);
        out.push_str(&format!("</{}>\n", element_name(node_type)));
    } else {
        out.push_str(" />\n");
    }
}

fn element_name(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Document => "document",
        NodeType::BlockQuote => "block_quote",
        NodeType::List => "list",
        NodeType::Item => "item",
        NodeType::CodeBlock => "code_block",
        NodeType::HtmlBlock => "html_block",
        NodeType::Paragraph => "paragraph",
        NodeType::Heading => "heading",
        NodeType::ThematicBreak => "thematic_break",
        NodeType::Text => "text",
        NodeType::SoftBreak => "softbreak",
        NodeType::LineBreak => "linebreak",
        NodeType::Code => "code",
        NodeType::HtmlInline => "html_inline",
        NodeType::Emphasis => "emph",
        NodeType::Strong => "strong",
        NodeType::Link => "link",
        NodeType::Image => "image",
    }
}

fn attributes(node: NodeHandle, node_type: NodeType, option_flags: u32) -> String {
    let mut out = String::new();
    match node_type {
        NodeType::Heading => {
            out.push_str(&format!(
                " level=\"{}\"",
                store::heading_level(node).unwrap_or(1)
            ));
        }
        NodeType::List => {
            match store::list_kind(node) {
                Some(ListKind::Ordered) => {
                    out.push_str(&format!(
                        " type=\"ordered\" start=\"{}\"",
                        store::list_start(node).unwrap_or(1)
                    ));
                }
                _ => out.push_str(" type=\"bullet\""),
            }
            out.push_str(&format!(
                " tight=\"{}\"",
                store::list_tight(node).unwrap_or(true)
            ));
        }
        NodeType::CodeBlock => {
            let info = store::fence_info(node).unwrap_or_default();
            if !info.is_empty() {
                out.push_str(&format!(
                    " info=\"{}\"",
                    html_escape::encode_double_quoted_attribute(&info)
                ));
            }
        }
        NodeType::Link | NodeType::Image => {
            out.push_str(&format!(
                " destination=\"{}\" title=\"{}\"",
                html_escape::encode_double_quoted_attribute(&store::url(node).unwrap_or_default()),
                html_escape::encode_double_quoted_attribute(&store::title(node).unwrap_or_default())
            ));
        }
        _ => {}
    }
    if option_flags & flags::SOURCE_POS != 0
        && let Some(e) = store::extent(node)
    {
        out.push_str(&format!(
            " sourcepos=\"{}:{}-{}:{}\"",
            e.start_line, e.start_column, e.end_line, e.end_column
        ));
    }
    out
}
